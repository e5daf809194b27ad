//! Order book error types

use super::order::{OrderId, Side};
use std::fmt;

/// Errors that can occur within the OrderBook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    /// Side discriminator outside of `'B'` / `'O'`
    InvalidSide(char),

    /// Side name that could not be parsed
    InvalidSideName(String),

    /// No resting order carries this id
    OrderNotFound(OrderId),

    /// An order with this id is already resting in the book
    DuplicateOrderId(OrderId),

    /// The requested level has no orders
    EmptyLevel {
        /// Side that was queried
        side: Side,
        /// 1-based level rank that was queried
        level: usize,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidSide(side) => write!(f, "Invalid side: {:?}", side),
            OrderBookError::InvalidSideName(name) => write!(f, "Invalid side name: {}", name),
            OrderBookError::OrderNotFound(id) => write!(f, "Order not found: {}", id),
            OrderBookError::DuplicateOrderId(id) => write!(f, "Duplicate order id: {}", id),
            OrderBookError::EmptyLevel { side, level } => {
                write!(f, "Empty level: {} level {} has no orders", side, level)
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
