//! Core OrderBook implementation for managing price levels and orders

use super::error::OrderBookError;
use super::index::PriceLevelIndex;
use super::level::PriceLevel;
use super::locator::OrderLocator;
use super::locks::LevelLockTable;
use super::order::{Order, OrderId, Side};
use super::policy::SizeChangePolicy;
use super::snapshot::{LevelSnapshot, OrderBookSnapshot};
use crate::utils::current_time_millis;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tracing::trace;

/// The OrderBook keeps the resting orders of one instrument on a bid and an offer side.
///
/// Writers serialize per (side, price) level through a [`LevelLockTable`]; writers on
/// different levels run concurrently. Readers take no level guard and see a weakly
/// consistent view of the book.
#[derive(Debug)]
pub struct OrderBook {
    /// The symbol or identifier for this order book
    pub(super) symbol: String,

    /// Bid levels, best (highest) price at rank 1
    pub(super) bids: PriceLevelIndex,

    /// Offer levels, best (lowest) price at rank 1
    pub(super) offers: PriceLevelIndex,

    /// Order id to current order value and arrival slot
    pub(super) locator: OrderLocator,

    /// Lazily allocated guards, one per side and price
    pub(super) locks: LevelLockTable,

    /// Source of arrival sequence numbers, drawn under the level guard
    pub(super) next_sequence: AtomicU64,

    /// Time priority rule applied by `change_size`
    pub(super) size_change_policy: SizeChangePolicy,
}

impl OrderBook {
    /// Create an empty order book for the given symbol
    pub fn new(symbol: &str) -> Self {
        Self::with_size_change_policy(symbol, SizeChangePolicy::default())
    }

    /// Create an empty order book that resizes orders according to `policy`
    pub fn with_size_change_policy(symbol: &str, policy: SizeChangePolicy) -> Self {
        trace!("Order book {}: created with policy {}", symbol, policy);
        Self {
            symbol: symbol.to_string(),
            bids: PriceLevelIndex::new(Side::Bid),
            offers: PriceLevelIndex::new(Side::Offer),
            locator: OrderLocator::new(),
            locks: LevelLockTable::new(),
            next_sequence: AtomicU64::new(0),
            size_change_policy: policy,
        }
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn size_change_policy(&self) -> SizeChangePolicy {
        self.size_change_policy
    }

    pub(super) fn side_index(&self, side: Side) -> &PriceLevelIndex {
        match side {
            Side::Bid => &self.bids,
            Side::Offer => &self.offers,
        }
    }

    fn level(&self, side: Side, level: usize) -> Option<Arc<PriceLevel>> {
        self.side_index(side).level_at_rank(level)
    }

    /// Number of orders at 1-based rank `level` on `side`, 0 if there is no such level
    pub fn order_count(&self, side: Side, level: usize) -> usize {
        let count = self
            .level(side, level)
            .map(|price_level| price_level.order_count())
            .unwrap_or(0);
        trace!(
            "Order book {}: {} level {} holds {} orders",
            self.symbol, side, level, count
        );
        count
    }

    /// Price of the orders at 1-based rank `level` on `side`
    pub fn price_at(&self, side: Side, level: usize) -> Result<f64, OrderBookError> {
        trace!(
            "Order book {}: Getting price for {} level {}",
            self.symbol, side, level
        );
        self.level(side, level)
            .and_then(|price_level| price_level.front())
            .map(|order| order.price())
            .ok_or(OrderBookError::EmptyLevel { side, level })
    }

    /// Orders at 1-based rank `level` on `side`, earliest arrival first
    pub fn orders_at_level(&self, side: Side, level: usize) -> Vec<Order> {
        self.side_index(side).orders_at_rank(level)
    }

    /// Sum of order sizes at 1-based rank `level` on `side`
    pub fn total_size_at(&self, side: Side, level: usize) -> u64 {
        self.level(side, level)
            .map(|price_level| price_level.total_size())
            .unwrap_or(0)
    }

    /// Every order on `side`, best level first and by arrival within a level.
    ///
    /// The sequence is lazy and computed afresh on each call.
    pub fn all_orders(&self, side: Side) -> impl Iterator<Item = Order> + '_ {
        trace!("Order book {}: Getting all {} orders", self.symbol, side);
        self.side_index(side).all_orders_in_rank_order()
    }

    /// Number of populated price levels on `side`
    pub fn depth(&self, side: Side) -> usize {
        self.side_index(side).depth()
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Option<f64> {
        self.price_at(Side::Bid, 1).ok()
    }

    /// Get the best offer price, if any
    pub fn best_offer(&self) -> Option<f64> {
        self.price_at(Side::Offer, 1).ok()
    }

    /// Best offer minus best bid. Negative when the book is crossed.
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_offer()) {
            (Some(bid), Some(offer)) => Some(offer - bid),
            _ => None,
        }
    }

    /// Get the mid price (average of best bid and best offer)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_offer()) {
            (Some(bid), Some(offer)) => Some((bid + offer) / 2.0),
            _ => None,
        }
    }

    /// Get an order by ID
    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        self.locator
            .lookup(order_id)
            .ok()
            .map(|resting| resting.order)
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.locator.contains(order_id)
    }

    /// Number of resting orders on both sides
    pub fn len(&self) -> usize {
        self.locator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locator.is_empty()
    }

    /// Number of level guards allocated so far; guards are never released
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    /// Create a snapshot of the best `depth` levels on each side
    pub fn create_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        let snapshot_side = |side: Side| -> Vec<LevelSnapshot> {
            self.side_index(side)
                .ranked_levels()
                .take(depth)
                .map(|price_level| LevelSnapshot::from_level(&price_level))
                .collect()
        };

        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids: snapshot_side(Side::Bid),
            offers: snapshot_side(Side::Offer),
        }
    }
}
