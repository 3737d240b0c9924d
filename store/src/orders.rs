use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use palmtrade_common::identity::UserId;
use palmtrade_common::listing::ListingId;
use palmtrade_common::order::{Order, OrderId, OrderStatus};

/// Why an order mutation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("unknown order {0:?}")]
    UnknownOrder(OrderId),
    #[error("invalid status transition {from:?} -> {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

/// All orders placed on the marketplace, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStore {
    orders: BTreeMap<OrderId, Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly placed order.
    pub fn place(&mut self, order: Order) {
        self.orders.insert(order.id.clone(), order);
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Orders placed by `buyer`.
    pub fn by_buyer(&self, buyer: &UserId) -> impl Iterator<Item = &Order> + '_ {
        let buyer = buyer.clone();
        self.orders.values().filter(move |o| o.buyer_id == buyer)
    }

    /// Orders received by `seller`.
    pub fn by_seller(&self, seller: &UserId) -> impl Iterator<Item = &Order> + '_ {
        let seller = seller.clone();
        self.orders.values().filter(move |o| o.seller_id == seller)
    }

    /// Move an order to `next`, enforcing the transition table.
    pub fn set_status(&mut self, id: &OrderId, next: OrderStatus) -> Result<(), OrderError> {
        let order = self
            .orders
            .get_mut(id)
            .ok_or_else(|| OrderError::UnknownOrder(id.clone()))?;
        if !order.status.can_transition_to(&next) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }
        order.status = next;
        Ok(())
    }

    /// Units of `listing` currently held by active (pending or confirmed)
    /// orders.
    pub fn quantity_reserved(&self, listing: &ListingId) -> u32 {
        self.orders
            .values()
            .filter(|o| o.listing_id == *listing && o.status.is_active())
            .map(|o| o.quantity)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
