use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Unique listing identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Unit a palm-oil listing is priced and sold in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Litre,
    Kilogram,
    Tonne,
    /// 200-litre steel drum.
    Drum,
    /// 25-litre jerrycan.
    Jerrycan,
    Other(String),
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Litre => write!(f, "litre"),
            Unit::Kilogram => write!(f, "kg"),
            Unit::Tonne => write!(f, "tonne"),
            Unit::Drum => write!(f, "drum"),
            Unit::Jerrycan => write!(f, "jerrycan"),
            Unit::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A seller's listing on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    /// Price per unit in kobo.
    pub price_per_unit_kobo: u64,
    pub unit: Unit,
    /// Free-form place name, e.g. "Ikorodu, Lagos".
    pub location: String,
    pub seller_id: UserId,
    /// Seller display name captured at creation (not looked up live).
    pub seller_name: String,
    /// Total units the seller put up. Availability subtracts active orders.
    pub quantity_total: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field-wise partial update for a listing. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_per_unit_kobo: Option<u64>,
    pub unit: Option<Unit>,
    pub location: Option<String>,
    pub quantity_total: Option<u32>,
}

impl ListingPatch {
    /// Apply the set fields to `listing` and stamp `updated_at`.
    pub fn apply(self, listing: &mut Listing) {
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(description) = self.description {
            listing.description = description;
        }
        if let Some(price) = self.price_per_unit_kobo {
            listing.price_per_unit_kobo = price;
        }
        if let Some(unit) = self.unit {
            listing.unit = unit;
        }
        if let Some(location) = self.location {
            listing.location = location;
        }
        if let Some(quantity) = self.quantity_total {
            listing.quantity_total = quantity;
        }
        listing.updated_at = Utc::now();
    }
}
