use thiserror::Error;

use crate::engine::order::OrderId;

/// Failures raised by [`crate::engine::order::Order::validate`] at construction time.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderValidationError {
    /// NEW/MODIFY carried a quantity of zero.
    #[error("NEW/MODIFY order carries a zero quantity")]
    ZeroQuantity,
    /// A LIMIT NEW/MODIFY carried a price that is not strictly positive.
    #[error("LIMIT order carries a non-positive price")]
    NonPositivePrice,
    /// The instrument symbol was empty.
    #[error("order carries an empty instrument symbol")]
    EmptyInstrument,
}

/// Failures raised by [`crate::engine::engine::Engine::process`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// MODIFY referenced an order id the engine has never seen as a NEW.
    #[error("MODIFY on unknown order id {0}")]
    UnknownOrder(OrderId),
}
