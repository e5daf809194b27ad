//! Order book snapshot for market data

use super::level::PriceLevel;
use super::order::Order;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One price level as captured by a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Price shared by every order at the level
    pub price: f64,

    /// Number of orders resting at the level
    pub order_count: usize,

    /// Sum of the orders' sizes
    pub total_size: u64,

    /// The orders, earliest arrival first
    pub orders: Vec<Order>,
}

impl LevelSnapshot {
    pub(super) fn from_level(level: &PriceLevel) -> Self {
        let orders = level.orders();
        Self {
            price: level.price(),
            order_count: orders.len(),
            total_size: orders.iter().map(|order| order.size()).sum(),
            orders,
        }
    }
}

/// A snapshot of the order book state at a specific point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid levels, best first
    pub bids: Vec<LevelSnapshot>,

    /// Offer levels, best first
    pub offers: Vec<LevelSnapshot>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and size
    pub fn best_bid(&self) -> Option<(f64, u64)> {
        let bid = self
            .bids
            .first()
            .map(|level| (level.price, level.total_size));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best offer price and size
    pub fn best_offer(&self) -> Option<(f64, u64)> {
        let offer = self
            .offers
            .first()
            .map(|level| (level.price, level.total_size));
        trace!("best_offer: {:?}", offer);
        offer
    }

    /// Get the spread (best offer - best bid)
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_offer()) {
            (Some((bid, _)), Some((offer, _))) => Some(offer - bid),
            _ => None,
        }
    }

    /// Total size across the captured bid levels
    pub fn total_bid_size(&self) -> u64 {
        self.bids.iter().map(|level| level.total_size).sum()
    }

    /// Total size across the captured offer levels
    pub fn total_offer_size(&self) -> u64 {
        self.offers.iter().map(|level| level.total_size).sum()
    }
}
