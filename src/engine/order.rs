use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::engine::error::OrderValidationError;

/// OrderId is the type used for order IDs. MODIFY and CANCEL events reuse the
/// id of the NEW that created the order.
pub type OrderId = u64;

/// Quantity is the type used for order and fill sizes.
pub type Quantity = u64;

/// Price wraps `f64` so it can key an ordered map.
///
/// Raw `f64` has no total order (`NaN`), so `Price` orders via
/// [`f64::total_cmp`] instead. This only behaves sanely here because every
/// price this crate ever sees came from deterministic decoding of exact text
/// upstream, never from arithmetic performed on prices inside the book. A
/// fixed-point (integer-tick) price would remove the hazard entirely; see
/// the design notes for why that redesign is out of scope for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price(pub f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl Eq for Price {}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Price(value)
    }
}

/// Side indicates the direction of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Buy means the incoming order wants to acquire the instrument, matching against asks.
    Buy,
    /// Sell means the incoming order wants to dispose of the instrument, matching against bids.
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// OrderType determines how the order is matched against the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Limit orders specify a price, can rest in the book, and never trade through it.
    Limit,
    /// Market orders do not specify a price and consume whatever liquidity is available.
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
        }
    }
}

/// Action is the event kind carried by an `Order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// A brand new order, identified by `order_id`.
    New,
    /// Replaces the declared quantity (and price, for LIMIT) of an existing order.
    Modify,
    /// Removes an existing order from the book.
    Cancel,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::New => write!(f, "NEW"),
            Action::Modify => write!(f, "MODIFY"),
            Action::Cancel => write!(f, "CANCEL"),
        }
    }
}

/// `Order` is a single immutable event: a NEW, MODIFY, or CANCEL request
/// against one order id. It is only ever constructed through
/// [`Order::make_limit`] / [`Order::make_market`], which enforce
/// [`Order::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub timestamp: u64,
    pub order_id: OrderId,
    pub instrument: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub price: Price,
    pub action: Action,
}

impl Order {
    /// Builds a LIMIT order and validates it.
    pub fn make_limit(
        timestamp: u64,
        order_id: OrderId,
        instrument: impl Into<String>,
        side: Side,
        quantity: Quantity,
        price: f64,
        action: Action,
    ) -> Result<Self, OrderValidationError> {
        let order = Order {
            timestamp,
            order_id,
            instrument: instrument.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Price(price),
            action,
        };
        order.validate()?;
        Ok(order)
    }

    /// Builds a MARKET order and validates it. The stored price is a
    /// sentinel zero, never read by the book.
    pub fn make_market(
        timestamp: u64,
        order_id: OrderId,
        instrument: impl Into<String>,
        side: Side,
        quantity: Quantity,
        action: Action,
    ) -> Result<Self, OrderValidationError> {
        let order = Order {
            timestamp,
            order_id,
            instrument: instrument.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: Price::ZERO,
            action,
        };
        order.validate()?;
        Ok(order)
    }

    /// Validates the order per the NEW/MODIFY/CANCEL rules. CANCEL always passes.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.instrument.is_empty() {
            return Err(OrderValidationError::EmptyInstrument);
        }
        if matches!(self.action, Action::Cancel) {
            return Ok(());
        }
        if self.quantity == 0 {
            return Err(OrderValidationError::ZeroQuantity);
        }
        if self.order_type == OrderType::Limit && !self.price.is_positive() {
            return Err(OrderValidationError::NonPositivePrice);
        }
        Ok(())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {} | {} @ {} | {}",
            self.timestamp,
            self.order_id,
            self.instrument,
            self.side,
            self.order_type,
            self.quantity,
            self.price,
            self.action,
        )
    }
}

/// Execution is a single trade produced by a [`crate::engine::book::Book`]:
/// one resting order matched against the incoming order for some quantity at
/// the resting order's price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub resting_order_id: OrderId,
    pub incoming_order_id: OrderId,
    pub executed_quantity: Quantity,
    pub execution_price: Price,
}
