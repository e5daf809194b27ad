//! Resting order value, side tag and order identifier

use super::error::OrderBookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier of a resting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Wrap a raw 64-bit id
    pub const fn from_u64(id: u64) -> Self {
        OrderId(id)
    }

    /// The raw 64-bit id
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        OrderId(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Side of the book an order rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy-side resting order; best level is the highest price
    Bid,
    /// Sell-side resting order; best level is the lowest price
    Offer,
}

impl Side {
    /// The single-character discriminator used at the book boundary
    pub fn as_char(&self) -> char {
        match self {
            Side::Bid => 'B',
            Side::Offer => 'O',
        }
    }
}

impl TryFrom<char> for Side {
    type Error = OrderBookError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'B' => Ok(Side::Bid),
            'O' => Ok(Side::Offer),
            other => Err(OrderBookError::InvalidSide(other)),
        }
    }
}

impl FromStr for Side {
    type Err = OrderBookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "B" | "BID" => Ok(Side::Bid),
            "O" | "OFFER" => Ok(Side::Offer),
            _ => Err(OrderBookError::InvalidSideName(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BID"),
            Side::Offer => write!(f, "OFFER"),
        }
    }
}

/// An immutable resting order.
///
/// A size change never mutates an `Order`; it produces a new value through
/// [`Order::with_size`] that keeps the id, price and side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "OrderFields")]
pub struct Order {
    id: OrderId,
    price: f64,
    side: Side,
    size: u64,
}

/// Wire form of an [`Order`]; decoding goes through [`Order::new`]
#[derive(Deserialize)]
struct OrderFields {
    id: OrderId,
    price: f64,
    side: Side,
    size: u64,
}

impl From<OrderFields> for Order {
    fn from(fields: OrderFields) -> Self {
        Order::new(fields.id, fields.price, fields.side, fields.size)
    }
}

impl Order {
    /// Create a new order. A price of `-0.0` is stored as `0.0`.
    pub fn new(id: OrderId, price: f64, side: Side, size: u64) -> Self {
        Self {
            id,
            // -0.0 + 0.0 == +0.0, every other value is unchanged
            price: price + 0.0,
            side,
            size,
        }
    }

    /// Create an order from boundary values, validating the side discriminator
    pub fn from_raw(id: u64, price: f64, side: char, size: u64) -> Result<Self, OrderBookError> {
        let side = Side::try_from(side)?;
        Ok(Self::new(OrderId(id), price, side, size))
    }

    /// A replacement of this order carrying a new size
    pub fn with_size(&self, size: u64) -> Self {
        Self { size, ..*self }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}
