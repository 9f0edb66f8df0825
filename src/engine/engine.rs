use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::book::Book;
use crate::engine::error::EngineError;
use crate::engine::order::{Action, Execution, Order, OrderId, OrderType, Price, Quantity, Side};
use crate::logging;

/// Status classifies a single [`MatchResult`] row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The order rested with no fill on this event.
    Pending,
    /// This row's fill brought the order's remaining quantity to zero.
    Executed,
    /// This row's fill left some quantity still outstanding.
    PartiallyExecuted,
    /// The order was removed from the book by a CANCEL.
    Canceled,
    /// Reserved for a validation layer above this crate; never produced by
    /// [`Engine::process`] itself.
    Rejected,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pending => write!(f, "PENDING"),
            Status::Executed => write!(f, "EXECUTED"),
            Status::PartiallyExecuted => write!(f, "PARTIALLY_EXECUTED"),
            Status::Canceled => write!(f, "CANCELED"),
            Status::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// One output row produced by [`Engine::process`]. A single input `Order`
/// can yield several rows (one per fill), always at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub timestamp: u64,
    pub order_id: OrderId,
    pub instrument: String,
    pub side: Side,
    pub order_type: OrderType,
    pub remaining_quantity: Quantity,
    pub price: Price,
    pub action: Action,
    pub status: Status,
    pub executed_quantity: Quantity,
    pub execution_price: Price,
    pub counterparty_id: OrderId,
}

impl MatchResult {
    fn new(
        order: &Order,
        remaining_quantity: Quantity,
        status: Status,
        executed_quantity: Quantity,
        execution_price: Price,
        counterparty_id: OrderId,
    ) -> Self {
        MatchResult {
            timestamp: order.timestamp,
            order_id: order.order_id,
            instrument: order.instrument.clone(),
            side: order.side,
            order_type: order.order_type,
            remaining_quantity,
            price: order.price,
            action: order.action,
            status,
            executed_quantity,
            execution_price,
            counterparty_id,
        }
    }
}

/// `Engine` multiplexes a [`Book`] per instrument and tracks per-order
/// quantity bookkeeping across NEW/MODIFY/CANCEL so it can classify each
/// event into one or more [`MatchResult`] rows.
#[derive(Debug, Default)]
pub struct Engine {
    books: HashMap<String, Book>,
    original_quantity: HashMap<OrderId, Quantity>,
    remaining_quantity: HashMap<OrderId, Quantity>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the book for `instrument`, if it has ever seen an order.
    pub fn book(&self, instrument: &str) -> Option<&Book> {
        self.books.get(instrument)
    }

    /// Processes one order event, returning at least one [`MatchResult`].
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownOrder`] if `order.action` is
    /// [`Action::Modify`] and `order.order_id` was never seen as a NEW.
    pub fn process(&mut self, order: Order) -> Result<Vec<MatchResult>, EngineError> {
        if logging::enabled() {
            tracing::info!(%order, "order received");
        }
        match order.action {
            Action::New => Ok(self.process_new(order)),
            Action::Modify => self.process_modify(order),
            Action::Cancel => Ok(self.process_cancel(order)),
        }
    }

    fn process_new(&mut self, order: Order) -> Vec<MatchResult> {
        self.original_quantity.insert(order.order_id, order.quantity);
        self.remaining_quantity.insert(order.order_id, order.quantity);
        let fills = self
            .books
            .entry(order.instrument.clone())
            .or_default()
            .apply(&order);
        self.classify(&fills, &order, order.quantity)
    }

    fn process_modify(&mut self, order: Order) -> Result<Vec<MatchResult>, EngineError> {
        let original_old = *self
            .original_quantity
            .get(&order.order_id)
            .ok_or(EngineError::UnknownOrder(order.order_id))?;
        let remaining_old = *self.remaining_quantity.get(&order.order_id).unwrap_or(&0);
        let executed_so_far = original_old.saturating_sub(remaining_old);

        // Corrected semantics: MODIFY carries an absolute new target size, not
        // a delta against the stale original. `original_quantity` tracks the
        // new target; `remaining_quantity` is recomputed from what's already
        // executed, clamped at zero.
        let new_original = order.quantity;
        let new_remaining = new_original.saturating_sub(executed_so_far);
        self.original_quantity.insert(order.order_id, new_original);

        // The book sees the corrected remaining quantity, not the raw
        // declared one, so the resting size in the book and the engine's
        // bookkeeping never diverge.
        let mut book_order = order.clone();
        book_order.quantity = new_remaining;

        let fills = self
            .books
            .entry(order.instrument.clone())
            .or_default()
            .apply(&book_order);
        Ok(self.classify(&fills, &order, new_remaining))
    }

    fn process_cancel(&mut self, order: Order) -> Vec<MatchResult> {
        self.books
            .entry(order.instrument.clone())
            .or_default()
            .apply(&order);
        let starting_remaining = self.remaining_quantity.remove(&order.order_id).unwrap_or(0);
        self.original_quantity.remove(&order.order_id);
        self.classify(&[], &order, starting_remaining)
    }

    fn classify(
        &mut self,
        fills: &[Execution],
        order: &Order,
        starting_remaining: Quantity,
    ) -> Vec<MatchResult> {
        if fills.is_empty() {
            let (status, reported_remaining) = if order.action == Action::Cancel {
                // A CANCEL terminates the order outright: the remaining
                // quantity it carried is forced to zero, not echoed back.
                (Status::Canceled, 0)
            } else {
                self.remaining_quantity.insert(order.order_id, starting_remaining);
                (Status::Pending, starting_remaining)
            };
            if logging::enabled() {
                tracing::info!(order_id = order.order_id, %status, "order resting or canceled");
            }
            return vec![MatchResult::new(
                order,
                reported_remaining,
                status,
                0,
                Price::ZERO,
                0,
            )];
        }

        let mut remaining = starting_remaining;
        let mut rows = Vec::with_capacity(fills.len());
        for fill in fills {
            remaining = remaining.saturating_sub(fill.executed_quantity);
            let status = if remaining == 0 {
                Status::Executed
            } else {
                Status::PartiallyExecuted
            };
            if logging::enabled() {
                tracing::info!(
                    order_id = order.order_id,
                    counterparty_id = fill.resting_order_id,
                    executed_quantity = fill.executed_quantity,
                    %status,
                    "fill emitted"
                );
            }
            rows.push(MatchResult::new(
                order,
                remaining,
                status,
                fill.executed_quantity,
                fill.execution_price,
                fill.resting_order_id,
            ));
        }
        self.remaining_quantity.insert(order.order_id, remaining);
        rows
    }
}
