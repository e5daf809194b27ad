//! Per-level mutual exclusion for book writers

use super::index::PriceKey;
use super::order::Side;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// One guard per (side, price) level, shared across both sides in a single key space.
///
/// Offers use `price` as the key and bids use `-price`, so a bid and an offer at the
/// same nominal price never contend. Guards are allocated on first use and kept for
/// the lifetime of the table, even after their level empties.
#[derive(Debug, Default)]
pub struct LevelLockTable {
    locks: DashMap<PriceKey, Arc<Mutex<()>>>,
}

impl LevelLockTable {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Key of the guard protecting `side` at `price`
    pub fn lock_key(side: Side, price: f64) -> PriceKey {
        match side {
            Side::Bid => PriceKey::new(-price),
            Side::Offer => PriceKey::new(price),
        }
    }

    fn guard_for(&self, side: Side, price: f64) -> Arc<Mutex<()>> {
        let key = Self::lock_key(side, price);
        if let Some(lock) = self.locks.get(&key) {
            return Arc::clone(lock.value());
        }
        let lock = self.locks.entry(key).or_insert_with(|| {
            debug!("Allocated level guard for {} {}", side, price);
            Arc::new(Mutex::new(()))
        });
        Arc::clone(lock.value())
    }

    /// Run `f` while holding the guard for `side` at `price`.
    ///
    /// The table's own shard lock is released before the level guard is taken.
    pub fn with_level<R>(&self, side: Side, price: f64, f: impl FnOnce() -> R) -> R {
        let lock = self.guard_for(side, price);
        let _guard = lock.lock();
        f()
    }

    /// Number of guards allocated so far
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
