//! OrderBook implementation: resting orders by side and price level with price-time priority.

pub mod book;
mod error;
pub mod index;
pub mod level;
pub mod locator;
pub mod locks;
mod modifications;
mod operations;
pub mod order;
mod policy;
mod snapshot;

pub use book::OrderBook;
pub use error::OrderBookError;
pub use order::{Order, OrderId, Side};
pub use policy::SizeChangePolicy;
pub use snapshot::{LevelSnapshot, OrderBookSnapshot};
