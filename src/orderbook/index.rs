//! Per-side index of price levels in the side's canonical rank order

use super::level::PriceLevel;
use super::order::{Order, Side};
use crossbeam_skiplist::SkipMap;
use crossbeam_skiplist::map::Entry;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// A totally ordered `f64` usable as a map key.
///
/// Ordering follows [`f64::total_cmp`], so `-0.0` and `0.0` are distinct keys. Order
/// prices are normalised on construction, which keeps price levels unambiguous while
/// still letting the lock table tell a bid at `0.0` (key `-0.0`) from an offer at `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct PriceKey(f64);

impl PriceKey {
    pub fn new(price: f64) -> Self {
        PriceKey(price)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for PriceKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriceKey {}

impl PartialOrd for PriceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for PriceKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Price levels for one side of the book.
///
/// Levels are stored ascending by price; bids are ranked by walking the map backwards
/// so that level 1 is always the best price for the side. A level is dropped as soon
/// as its last order leaves.
#[derive(Debug)]
pub struct PriceLevelIndex {
    side: Side,
    levels: SkipMap<PriceKey, Arc<PriceLevel>>,
}

impl PriceLevelIndex {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: SkipMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Append `order` to the level at its price, creating the level if needed.
    ///
    /// The caller must hold the guard for this side and price.
    pub fn insert(&self, sequence: u64, order: Order) {
        let key = PriceKey::new(order.price());
        let level = match self.levels.get(&key) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                debug!("{} level {} created", self.side, order.price());
                let entry = self
                    .levels
                    .get_or_insert(key, Arc::new(PriceLevel::new(order.price())));
                Arc::clone(entry.value())
            }
        };
        level.insert(sequence, order);
    }

    /// Remove `order` from its level, dropping the level once it is empty.
    ///
    /// The caller must hold the guard for this side and price.
    pub fn remove_order(&self, sequence: u64, order: &Order) -> Option<Order> {
        let key = PriceKey::new(order.price());
        let entry = self.levels.get(&key)?;
        let level = Arc::clone(entry.value());
        let removed = level.remove(sequence, order)?;
        if level.is_empty() {
            debug!("{} level {} collapsed", self.side, order.price());
            entry.remove();
        }
        Some(removed)
    }

    /// Replace the order in arrival slot `sequence` without moving it in its level.
    ///
    /// The caller must hold the guard for this side and price.
    pub fn replace_in_place(&self, sequence: u64, order: Order) -> bool {
        match self.levels.get(&PriceKey::new(order.price())) {
            Some(entry) => {
                entry.value().insert(sequence, order);
                true
            }
            None => false,
        }
    }

    /// Populated levels, best price first
    pub fn ranked_levels(&self) -> impl Iterator<Item = Arc<PriceLevel>> + '_ {
        let entries: Box<dyn Iterator<Item = Entry<'_, PriceKey, Arc<PriceLevel>>> + '_> =
            match self.side {
                Side::Bid => Box::new(self.levels.iter().rev()),
                Side::Offer => Box::new(self.levels.iter()),
            };
        entries
            .map(|entry| Arc::clone(entry.value()))
            .filter(|level| !level.is_empty())
    }

    /// The level at 1-based rank `level`, if that many levels are populated
    pub fn level_at_rank(&self, level: usize) -> Option<Arc<PriceLevel>> {
        if level == 0 {
            return None;
        }
        self.ranked_levels().nth(level - 1)
    }

    /// Orders at 1-based rank `level` in arrival order; empty past the last level
    pub fn orders_at_rank(&self, level: usize) -> Vec<Order> {
        self.level_at_rank(level)
            .map(|price_level| price_level.orders())
            .unwrap_or_default()
    }

    /// Every resting order on this side, level by level in rank order and by arrival
    /// within a level. Each call walks the index afresh.
    pub fn all_orders_in_rank_order(&self) -> impl Iterator<Item = Order> + '_ {
        self.ranked_levels().flat_map(|level| level.orders())
    }

    /// Number of populated levels
    pub fn depth(&self) -> usize {
        self.ranked_levels().count()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked_levels().next().is_none()
    }
}
