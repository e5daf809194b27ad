//! Boundary helpers taking raw order fields

use super::book::OrderBook;
use super::error::OrderBookError;
use super::order::{Order, OrderId, Side};
use tracing::trace;

impl OrderBook {
    /// Add an order built from its fields
    pub fn add_order(
        &self,
        id: OrderId,
        price: f64,
        side: Side,
        size: u64,
    ) -> Result<Order, OrderBookError> {
        let order = Order::new(id, price, side, size);
        self.add(order)?;
        Ok(order)
    }

    /// Add an order whose side arrives as the `'B'` / `'O'` discriminator
    pub fn add_raw(
        &self,
        id: u64,
        price: f64,
        side: char,
        size: u64,
    ) -> Result<Order, OrderBookError> {
        trace!("Adding raw order {} {} {} {}", id, price, side, size);
        let order = Order::from_raw(id, price, side, size)?;
        self.add(order)?;
        Ok(order)
    }

    /// Number of orders at a level, with the side given as a discriminator
    pub fn order_count_raw(&self, side: char, level: usize) -> Result<usize, OrderBookError> {
        Ok(self.order_count(Side::try_from(side)?, level))
    }

    /// Price at a level, with the side given as a discriminator
    pub fn price_at_raw(&self, side: char, level: usize) -> Result<f64, OrderBookError> {
        self.price_at(Side::try_from(side)?, level)
    }

    /// All orders on a side, with the side given as a discriminator
    pub fn all_orders_raw(&self, side: char) -> Result<Vec<Order>, OrderBookError> {
        Ok(self.all_orders(Side::try_from(side)?).collect())
    }
}
