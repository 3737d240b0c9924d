use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::listing::ListingId;

/// Star rating bounds.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Unique review identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub String);

/// A buyer's review of a listing after a completed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub listing_id: ListingId,
    pub seller_id: UserId,
    pub buyer_id: UserId,
    /// Buyer display name captured at submission.
    pub buyer_name: String,
    /// Star rating, 1–5.
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Whether the rating falls within the 1–5 star range.
    pub fn rating_valid(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating)
    }
}
