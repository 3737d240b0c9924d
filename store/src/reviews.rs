use serde::{Deserialize, Serialize};

use palmtrade_common::identity::UserId;
use palmtrade_common::listing::ListingId;
use palmtrade_common::review::Review;

/// Reviews left by buyers, kept in submission order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewStore {
    reviews: Vec<Review>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, review: Review) {
        self.reviews.push(review);
    }

    /// Reviews for one listing, oldest first.
    pub fn by_listing(&self, listing: &ListingId) -> impl Iterator<Item = &Review> + '_ {
        let listing = listing.clone();
        self.reviews.iter().filter(move |r| r.listing_id == listing)
    }

    /// Reviews across all of one seller's listings, oldest first.
    pub fn by_seller(&self, seller: &UserId) -> impl Iterator<Item = &Review> + '_ {
        let seller = seller.clone();
        self.reviews.iter().filter(move |r| r.seller_id == seller)
    }

    /// Mean star rating for a listing, 0.0 when unreviewed.
    pub fn average_rating(&self, listing: &ListingId) -> f64 {
        let mut count = 0u32;
        let mut sum = 0u32;
        for review in self.by_listing(listing) {
            count += 1;
            sum += u32::from(review.rating);
        }
        if count == 0 {
            0.0
        } else {
            f64::from(sum) / f64::from(count)
        }
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}
