//! A single price level: every resting order on one side at one price, in arrival order

use super::order::Order;
use crossbeam_skiplist::SkipMap;

/// Arrival-ordered collection of the orders resting at one price.
///
/// Orders are keyed by the sequence number they were given on arrival, so iteration
/// yields them in time priority and removal by sequence is `O(log n)`. The collection
/// is lock-free for readers; writers are serialized by the level guard held in the book.
#[derive(Debug)]
pub struct PriceLevel {
    price: f64,
    orders: SkipMap<u64, Order>,
}

impl PriceLevel {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            orders: SkipMap::new(),
        }
    }

    /// The price shared by every order at this level
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Place an order in the arrival slot `sequence`, replacing whatever occupied it
    pub fn insert(&self, sequence: u64, order: Order) {
        self.orders.insert(sequence, order);
    }

    /// Remove the order in arrival slot `sequence` if it still carries `order`'s id
    pub fn remove(&self, sequence: u64, order: &Order) -> Option<Order> {
        let entry = self.orders.get(&sequence)?;
        if entry.value().id() != order.id() {
            return None;
        }
        entry.remove();
        Some(*entry.value())
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Sum of the sizes of every order at this level
    pub fn total_size(&self) -> u64 {
        self.orders.iter().map(|entry| entry.value().size()).sum()
    }

    /// The order with the best time priority
    pub fn front(&self) -> Option<Order> {
        self.orders.front().map(|entry| *entry.value())
    }

    /// Copy of the orders at this level, earliest arrival first
    pub fn orders(&self) -> Vec<Order> {
        self.orders.iter().map(|entry| *entry.value()).collect()
    }
}
