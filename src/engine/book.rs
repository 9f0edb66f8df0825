use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::engine::matching;
use crate::engine::order::{Action, Execution, Order, OrderId, OrderType, Price, Side};

/// `Book` holds the resting orders for a single instrument: two price
/// ladders, each an ordered mapping from price to a FIFO queue of orders at
/// that price.
///
/// `bids` and `asks` are both stored ascending by key (`BTreeMap`'s native
/// order); bids are walked back-to-front when the caller needs
/// highest-price-first. Only LIMIT orders ever rest here — MARKET orders
/// never appear in either ladder.
#[derive(Debug, Default)]
pub struct Book {
    pub(crate) bids: BTreeMap<Price, VecDeque<Order>>,
    pub(crate) asks: BTreeMap<Price, VecDeque<Order>>,
    /// Where each resting order currently lives. CANCEL and MODIFY locate an
    /// order through this index rather than the price carried on the event —
    /// for a MODIFY that changes price, the event's price is the order's
    /// *new* price, not the one it is currently resting at.
    index: HashMap<OrderId, (Side, Price)>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one order event to the book and returns the fills it produced.
    /// Empty for a resting NEW/MODIFY, for a CANCEL, or for a MARKET order
    /// that found no liquidity.
    pub fn apply(&mut self, order: &Order) -> Vec<Execution> {
        match order.action {
            Action::Cancel => {
                self.cancel_by_id(order.order_id);
                Vec::new()
            }
            Action::Modify => {
                // cancel-then-new: the order loses its place in the FIFO.
                self.cancel_by_id(order.order_id);
                self.submit(order)
            }
            Action::New => self.submit(order),
        }
    }

    fn submit(&mut self, order: &Order) -> Vec<Execution> {
        match order.order_type {
            OrderType::Limit => matching::match_limit(self, order),
            OrderType::Market => matching::match_market(self, order),
        }
    }

    /// Inserts a LIMIT order at the tail of its price level, on its own side,
    /// and records where to find it for a future CANCEL/MODIFY.
    pub(crate) fn rest(&mut self, order: Order) {
        self.index.insert(order.order_id, (order.side, order.price));
        let ladder = self.ladder_for_side_mut(order.side);
        ladder.entry(order.price).or_default().push_back(order);
    }

    /// The ladder an incoming order of `side` crosses against: asks for an
    /// incoming BUY, bids for an incoming SELL.
    pub(crate) fn opposite_ladder_mut(
        &mut self,
        side: Side,
    ) -> &mut BTreeMap<Price, VecDeque<Order>> {
        match side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        }
    }

    fn ladder_for_side_mut(&mut self, side: Side) -> &mut BTreeMap<Price, VecDeque<Order>> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Drops the index entry for a resting order the matching algorithm has
    /// just fully filled and popped from its queue.
    pub(crate) fn forget(&mut self, order_id: OrderId) {
        self.index.remove(&order_id);
    }

    /// Cancels the resting order `order_id` wherever the index says it
    /// currently rests. A miss is a silent no-op, per the CANCEL contract.
    fn cancel_by_id(&mut self, order_id: OrderId) {
        let Some((side, price)) = self.index.remove(&order_id) else {
            return;
        };
        let ladder = self.ladder_for_side_mut(side);
        let Some(queue) = ladder.get_mut(&price) else {
            return;
        };
        if let Some(pos) = queue.iter().position(|resting| resting.order_id == order_id) {
            queue.remove(pos);
        }
        if queue.is_empty() {
            ladder.remove(&price);
        }
    }

    /// Highest resting bid price, or `None` if the bid side is empty.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Lowest resting ask price, or `None` if the ask side is empty.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// `true` if the top of the bid ladder is at or above the top of the ask
    /// ladder — a state the matching algorithm must never leave the book in.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// Snapshot of resting `(order_id, quantity)` pairs on one side, in
    /// display priority order (best price first, FIFO within a level). Used
    /// by tests to assert book state without exposing the ladder directly.
    pub fn resting(&self, side: Side) -> Vec<(OrderId, u64)> {
        let levels: Box<dyn Iterator<Item = (&Price, &VecDeque<Order>)>> = match side {
            Side::Buy => Box::new(self.bids.iter().rev()),
            Side::Sell => Box::new(self.asks.iter()),
        };
        levels
            .flat_map(|(_, queue)| queue.iter())
            .map(|order| (order.order_id, order.quantity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::order::Action;

    fn limit(id: OrderId, side: Side, price: f64, qty: u64) -> Order {
        Order::make_limit(0, id, "AAPL", side, qty, price, Action::New).unwrap()
    }

    #[test]
    fn resting_limit_on_empty_book_produces_no_fills() {
        let mut book = Book::new();
        let fills = book.apply(&limit(1, Side::Buy, 100.0, 10));
        assert!(fills.is_empty());
        assert_eq!(book.resting(Side::Buy), vec![(1, 10)]);
    }

    #[test]
    fn cancel_of_unknown_id_is_a_no_op() {
        let mut book = Book::new();
        book.apply(&limit(1, Side::Buy, 100.0, 10));
        let cancel = Order::make_limit(0, 999, "AAPL", Side::Buy, 0, 100.0, Action::Cancel).unwrap();
        assert!(book.apply(&cancel).is_empty());
        assert_eq!(book.resting(Side::Buy), vec![(1, 10)]);
    }

    #[test]
    fn cancel_prunes_empty_level() {
        let mut book = Book::new();
        book.apply(&limit(1, Side::Buy, 100.0, 10));
        let cancel = Order::make_limit(0, 1, "AAPL", Side::Buy, 0, 100.0, Action::Cancel).unwrap();
        book.apply(&cancel);
        assert!(book.resting(Side::Buy).is_empty());
        assert!(book.bids.is_empty());
    }

    #[test]
    fn cancel_finds_the_order_by_id_even_with_a_stale_price() {
        let mut book = Book::new();
        book.apply(&limit(1, Side::Buy, 100.0, 10));
        // The CANCEL event carries a price the order no longer rests at; the
        // index, not this price, must be used to find it.
        let cancel = Order::make_limit(0, 1, "AAPL", Side::Buy, 0, 999.0, Action::Cancel).unwrap();
        book.apply(&cancel);
        assert!(book.resting(Side::Buy).is_empty());
    }

    #[test]
    fn modify_to_a_new_price_does_not_leave_a_duplicate_behind() {
        let mut book = Book::new();
        book.apply(&limit(1, Side::Buy, 100.0, 10));
        let modify = Order::make_limit(0, 1, "AAPL", Side::Buy, 10, 105.0, Action::Modify).unwrap();
        book.apply(&modify);
        assert_eq!(book.resting(Side::Buy), vec![(1, 10)]);
    }
}
