//! # Concurrent Limit Order Book Index
//!
//! An in-memory limit order book that stores resting orders on a bid and an offer side,
//! organised by price level with price-time priority. The book answers level-based
//! queries (best price, depth, order count per level) and supports add, cancel and
//! size changes from many threads at once.
//!
//! ## Key Features
//!
//! - **Price-Time Priority**: Level 1 is always the best price for a side (highest bid,
//!   lowest offer). Within a level, orders keep their arrival order.
//!
//! - **Per-Level Locking**: Every mutation takes exactly one guard, keyed by side and
//!   price. Writers on different levels never block each other.
//!
//! - **Lock-Free Reads**: Queries walk lock-free skip lists and a sharded id map without
//!   taking any level guard, so readers observe a weakly consistent view.
//!
//! - **Explicit Time Priority Rules**: What a size change does to an order's place in
//!   its level is chosen per book through [`SizeChangePolicy`].
//!
//! - **Snapshots**: Depth snapshots serialise with `serde` for market data consumers.
//!
//! ## Out of Scope
//!
//! Order validation, matching, market-data publication and persistence belong to the
//! layers that drive the book. The book never checks that bids stay below offers.
//!
//! ## Example
//!
//! ```rust
//! use level_book::{OrderBook, OrderId, Side};
//!
//! let book = OrderBook::new("XYZ");
//! book.add_order(OrderId(1), 3.2, Side::Bid, 2).unwrap();
//! book.add_order(OrderId(2), 4.2, Side::Bid, 5).unwrap();
//!
//! assert_eq!(book.price_at(Side::Bid, 1).unwrap(), 4.2);
//! assert_eq!(book.order_count(Side::Bid, 2), 1);
//!
//! book.remove(OrderId(2)).unwrap();
//! assert_eq!(book.price_at(Side::Bid, 1).unwrap(), 3.2);
//! ```

pub mod orderbook;

mod utils;

pub use orderbook::{
    LevelSnapshot, Order, OrderBook, OrderBookError, OrderBookSnapshot, OrderId, Side,
    SizeChangePolicy,
};
pub use utils::{current_time_millis, setup_logger};
