use serde::{Deserialize, Serialize};

use palmtrade_common::listing::ListingId;

use crate::favorites::FavoriteStore;
use crate::listings::ListingStore;
use crate::messages::MessageStore;
use crate::notifications::NotificationStore;
use crate::orders::OrderStore;
use crate::reviews::ReviewStore;

/// The whole in-memory marketplace state for one app session.
///
/// Constructed explicitly and passed by reference to whatever owns the
/// session. Independent instances never share state, so tests can build
/// as many markets as they need.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Market {
    pub listings: ListingStore,
    pub orders: OrderStore,
    pub reviews: ReviewStore,
    pub favorites: FavoriteStore,
    pub notifications: NotificationStore,
    pub messages: MessageStore,
}

impl Market {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units of `listing` still available: the listed total minus what
    /// pending and confirmed orders hold. Derived on read, never stored.
    pub fn available_quantity(&self, listing: &ListingId) -> u32 {
        let total = self
            .listings
            .get(listing)
            .map(|l| l.quantity_total)
            .unwrap_or(0);
        total.saturating_sub(self.orders.quantity_reserved(listing))
    }
}
