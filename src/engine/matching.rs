use std::collections::VecDeque;

use crate::engine::book::Book;
use crate::engine::order::{Execution, Order, OrderId, Price, Quantity, Side};

/// Drains resting liquidity at one price level against `remaining`, pushing
/// a fill for every resting order consumed. Stops when `remaining` hits
/// zero or the level's queue runs out. A resting order that is only
/// partially consumed keeps its place at the front of the queue and the
/// loop stops there, since it still owns whatever quantity is left at this
/// level. Orders popped off fully filled are appended to `fully_filled` so
/// the caller can drop them from the book's id index once the ladder borrow
/// is no longer live.
fn drain_level(
    remaining: &mut Quantity,
    queue: &mut VecDeque<Order>,
    level_price: Price,
    incoming_id: OrderId,
    fills: &mut Vec<Execution>,
    fully_filled: &mut Vec<OrderId>,
) {
    while *remaining > 0 {
        let Some(resting) = queue.front_mut() else {
            break;
        };
        let traded = (*remaining).min(resting.quantity);
        fills.push(Execution {
            resting_order_id: resting.order_id,
            incoming_order_id: incoming_id,
            executed_quantity: traded,
            execution_price: level_price,
        });
        *remaining -= traded;
        resting.quantity -= traded;
        if resting.quantity == 0 {
            fully_filled.push(resting.order_id);
            queue.pop_front();
        } else {
            break;
        }
    }
}

/// Matches a LIMIT order against the opposite ladder, never trading through
/// its limit price. Any quantity left over after crossing rests in the book.
pub(crate) fn match_limit(book: &mut Book, order: &Order) -> Vec<Execution> {
    let mut remaining = order.quantity;
    let mut fills = Vec::new();
    let mut empty_levels = Vec::new();
    let mut fully_filled = Vec::new();

    let opposite = book.opposite_ladder_mut(order.side);
    match order.side {
        Side::Buy => {
            for (&level_price, queue) in opposite.iter_mut() {
                if remaining == 0 || order.price < level_price {
                    break;
                }
                drain_level(
                    &mut remaining,
                    queue,
                    level_price,
                    order.order_id,
                    &mut fills,
                    &mut fully_filled,
                );
                if queue.is_empty() {
                    empty_levels.push(level_price);
                }
            }
        }
        Side::Sell => {
            for (&level_price, queue) in opposite.iter_mut().rev() {
                if remaining == 0 || order.price > level_price {
                    break;
                }
                drain_level(
                    &mut remaining,
                    queue,
                    level_price,
                    order.order_id,
                    &mut fills,
                    &mut fully_filled,
                );
                if queue.is_empty() {
                    empty_levels.push(level_price);
                }
            }
        }
    }
    for level_price in empty_levels {
        opposite.remove(&level_price);
    }

    for id in fully_filled {
        book.forget(id);
    }

    if remaining > 0 {
        let mut residual = order.clone();
        residual.quantity = remaining;
        book.rest(residual);
    }
    fills
}

/// Matches a MARKET order against the opposite ladder at whatever prices are
/// available. Unfilled quantity is dropped, never rested.
pub(crate) fn match_market(book: &mut Book, order: &Order) -> Vec<Execution> {
    let mut remaining = order.quantity;
    let mut fills = Vec::new();
    let mut empty_levels = Vec::new();
    let mut fully_filled = Vec::new();

    let opposite = book.opposite_ladder_mut(order.side);
    let levels: Box<dyn Iterator<Item = (&Price, &mut VecDeque<Order>)>> = match order.side {
        Side::Buy => Box::new(opposite.iter_mut()),
        Side::Sell => Box::new(opposite.iter_mut().rev()),
    };
    for (&level_price, queue) in levels {
        if remaining == 0 {
            break;
        }
        drain_level(
            &mut remaining,
            queue,
            level_price,
            order.order_id,
            &mut fills,
            &mut fully_filled,
        );
        if queue.is_empty() {
            empty_levels.push(level_price);
        }
    }
    for level_price in empty_levels {
        opposite.remove(&level_price);
    }
    for id in fully_filled {
        book.forget(id);
    }
    fills
}
