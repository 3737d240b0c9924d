use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::listing::ListingId;

/// Unique order identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

/// Lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed by the buyer, awaiting the seller.
    Pending,
    /// Accepted by the seller.
    Confirmed,
    /// Handed over to the buyer.
    Delivered,
    /// Cancelled by either side.
    Cancelled,
}

impl OrderStatus {
    /// Returns true if transitioning from self to `next` is valid.
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Confirmed, OrderStatus::Delivered)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
        )
    }

    /// True while the order still holds stock against its listing.
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// An order placed by a buyer against a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing reference, e.g. "ORD-2026-014".
    pub order_number: String,
    pub listing_id: ListingId,
    /// Listing title captured at placement (not looked up live).
    pub listing_title: String,
    pub quantity: u32,
    pub total_price_kobo: u64,
    pub status: OrderStatus,
    pub seller_id: UserId,
    pub seller_name: String,
    pub buyer_id: UserId,
    pub buyer_name: String,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
