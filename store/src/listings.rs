use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use palmtrade_common::identity::UserId;
use palmtrade_common::listing::{Listing, ListingId, ListingPatch};

/// Every listing currently on the marketplace, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingStore {
    listings: BTreeMap<ListingId, Listing>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a listing, replacing any previous one with the same id.
    pub fn insert(&mut self, listing: Listing) {
        self.listings.insert(listing.id.clone(), listing);
    }

    /// Replace the whole catalogue (bulk load).
    pub fn replace_all(&mut self, listings: impl IntoIterator<Item = Listing>) {
        self.listings = listings
            .into_iter()
            .map(|listing| (listing.id.clone(), listing))
            .collect();
    }

    pub fn get(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.get(id)
    }

    /// Apply a partial update. Returns whether a listing was found;
    /// unknown ids are a no-op.
    pub fn update(&mut self, id: &ListingId, patch: ListingPatch) -> bool {
        match self.listings.get_mut(id) {
            Some(listing) => {
                patch.apply(listing);
                true
            }
            None => false,
        }
    }

    /// Remove a listing, returning it if it existed.
    pub fn remove(&mut self, id: &ListingId) -> Option<Listing> {
        self.listings.remove(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Listing> {
        self.listings.values()
    }

    /// Listings owned by `seller`.
    pub fn by_seller(&self, seller: &UserId) -> impl Iterator<Item = &Listing> + '_ {
        let seller = seller.clone();
        self.listings
            .values()
            .filter(move |listing| listing.seller_id == seller)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
