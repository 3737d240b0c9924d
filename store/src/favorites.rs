use serde::{Deserialize, Serialize};

use palmtrade_common::listing::{Listing, ListingId};

/// The signed-in user's saved listings, in the order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoriteStore {
    favorites: Vec<Listing>,
}

impl FavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a listing. A listing already saved (same id) is ignored.
    pub fn add(&mut self, listing: Listing) {
        if self.contains(&listing.id) {
            return;
        }
        self.favorites.push(listing);
    }

    pub fn remove(&mut self, id: &ListingId) {
        self.favorites.retain(|l| l.id != *id);
    }

    pub fn contains(&self, id: &ListingId) -> bool {
        self.favorites.iter().any(|l| l.id == *id)
    }

    pub fn clear(&mut self) {
        self.favorites.clear();
    }

    pub fn all(&self) -> impl Iterator<Item = &Listing> {
        self.favorites.iter()
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }
}
