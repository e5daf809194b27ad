//! Time priority rules for size changes

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happens to an order's place in its level when its size changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizeChangePolicy {
    /// Every size change sends the order to the back of its level
    #[default]
    Requeue,
    /// The order keeps its arrival slot whatever the new size
    RetainPriority,
    /// Decreases keep the arrival slot, increases go to the back of the level
    RequeueOnIncrease,
}

impl SizeChangePolicy {
    /// Whether an order resized from `old_size` to `new_size` keeps its arrival slot
    pub fn retains_priority(&self, old_size: u64, new_size: u64) -> bool {
        match self {
            SizeChangePolicy::Requeue => false,
            SizeChangePolicy::RetainPriority => true,
            SizeChangePolicy::RequeueOnIncrease => new_size <= old_size,
        }
    }
}

impl fmt::Display for SizeChangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeChangePolicy::Requeue => write!(f, "REQUEUE"),
            SizeChangePolicy::RetainPriority => write!(f, "RETAIN_PRIORITY"),
            SizeChangePolicy::RequeueOnIncrease => write!(f, "REQUEUE_ON_INCREASE"),
        }
    }
}
