//! Mutating operations: add, remove and size changes

use super::book::OrderBook;
use super::error::OrderBookError;
use super::index::{PriceKey, PriceLevelIndex};
use super::locator::RestingOrder;
use super::order::{Order, OrderId};
use std::sync::atomic::Ordering;
use tracing::{trace, warn};

impl OrderBook {
    /// Add a new order to the book.
    ///
    /// Fails with [`OrderBookError::DuplicateOrderId`] if an order with the same id is
    /// already resting; the book is left unchanged in that case.
    pub fn add(&self, order: Order) -> Result<(), OrderBookError> {
        trace!(
            "Order book {}: Adding {} order {} at price {} size {}",
            self.symbol,
            order.side(),
            order.id(),
            order.price(),
            order.size()
        );
        let index = self.side_index(order.side());

        self.locks
            .with_level(order.side(), order.price(), || {
                let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
                let resting = RestingOrder { order, sequence };
                self.locator
                    .insert_new(resting, || index.insert(sequence, order))
            })
            .inspect_err(|err| warn!("Order book {}: Rejected add: {}", self.symbol, err))
    }

    /// Remove a resting order by id, returning the removed value
    pub fn remove(&self, order_id: OrderId) -> Result<Order, OrderBookError> {
        trace!("Order book {}: Removing order {}", self.symbol, order_id);
        self.with_located(order_id, |index, resting| {
            index.remove_order(resting.sequence, &resting.order);
            self.locator.remove(order_id, resting.sequence);
            resting.order
        })
    }

    /// Replace a resting order with one of the same id, price and side carrying
    /// `new_size`, returning the replacement.
    ///
    /// Whether the replacement keeps the original arrival slot is decided by the
    /// book's [`SizeChangePolicy`](super::policy::SizeChangePolicy).
    pub fn change_size(&self, order_id: OrderId, new_size: u64) -> Result<Order, OrderBookError> {
        trace!(
            "Order book {}: Changing size of order {} to {}",
            self.symbol, order_id, new_size
        );
        let policy = self.size_change_policy;

        self.with_located(order_id, |index, resting| {
            let replacement = resting.order.with_size(new_size);
            if policy.retains_priority(resting.order.size(), new_size) {
                index.replace_in_place(resting.sequence, replacement);
                self.locator.replace(RestingOrder {
                    order: replacement,
                    sequence: resting.sequence,
                });
            } else {
                // the new slot goes in before the old one leaves so the level never empties
                let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
                index.insert(sequence, replacement);
                index.remove_order(resting.sequence, &resting.order);
                self.locator.replace(RestingOrder {
                    order: replacement,
                    sequence,
                });
            }
            replacement
        })
    }

    /// Run `f` on the current resting value of `order_id` while holding its level guard.
    ///
    /// The locator is consulted again once the guard is held. If the id was removed in
    /// between the call fails with `OrderNotFound`; if it was re-added at another level
    /// the lookup is retried against the new level.
    fn with_located<R>(
        &self,
        order_id: OrderId,
        mut f: impl FnMut(&PriceLevelIndex, RestingOrder) -> R,
    ) -> Result<R, OrderBookError> {
        loop {
            let located = self.locator.lookup(order_id)?;
            let side = located.order.side();
            let price = located.order.price();

            let attempt = self.locks.with_level(
                side,
                price,
                || -> Result<Option<R>, OrderBookError> {
                    let current = self.locator.lookup(order_id)?;
                    let same_level = current.order.side() == side
                        && PriceKey::new(current.order.price()) == PriceKey::new(price);
                    if !same_level {
                        return Ok(None);
                    }
                    Ok(Some(f(self.side_index(side), current)))
                },
            )?;

            match attempt {
                Some(result) => return Ok(result),
                None => trace!(
                    "Order book {}: Order {} moved while waiting, retrying",
                    self.symbol, order_id
                ),
            }
        }
    }
}
