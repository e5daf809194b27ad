//! Order id to resting order lookup

use super::error::OrderBookError;
use super::order::{Order, OrderId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// A resting order together with the arrival slot it occupies in its level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestingOrder {
    pub order: Order,
    pub sequence: u64,
}

/// Concurrent map from order id to the order's current value.
///
/// An id is present here exactly when its order rests in one level of one side.
/// The map is sharded and safe for concurrent insert, remove and lookup from writers
/// holding guards on different levels.
#[derive(Debug, Default)]
pub struct OrderLocator {
    entries: DashMap<OrderId, RestingOrder>,
}

impl OrderLocator {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Current value for `id`
    pub fn lookup(&self, id: OrderId) -> Result<RestingOrder, OrderBookError> {
        self.entries
            .get(&id)
            .map(|entry| *entry.value())
            .ok_or(OrderBookError::OrderNotFound(id))
    }

    /// Record a new resting order, running `place` only if the id is unknown.
    ///
    /// The shard holding `id` stays locked while `place` runs so two adds of the same
    /// id can never both land in the index.
    pub fn insert_new<F>(&self, resting: RestingOrder, place: F) -> Result<(), OrderBookError>
    where
        F: FnOnce(),
    {
        let id = resting.order.id();
        match self.entries.entry(id) {
            Entry::Occupied(_) => Err(OrderBookError::DuplicateOrderId(id)),
            Entry::Vacant(vacant) => {
                place();
                vacant.insert(resting);
                Ok(())
            }
        }
    }

    /// Overwrite the value for an id that is already present
    pub fn replace(&self, resting: RestingOrder) {
        self.entries.insert(resting.order.id(), resting);
    }

    /// Forget `id` if it still occupies arrival slot `sequence`
    pub fn remove(&self, id: OrderId, sequence: u64) -> Option<RestingOrder> {
        self.entries
            .remove_if(&id, |_, resting| resting.sequence == sequence)
            .map(|(_, resting)| resting)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
