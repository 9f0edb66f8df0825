use matchcore::{Action, Engine, MatchResult, Order, Quantity, Side};

/// Quickly builds and submits a LIMIT NEW, panicking on validation failure.
pub fn submit_limit(
    engine: &mut Engine,
    id: u64,
    instrument: &str,
    side: Side,
    qty: Quantity,
    price: f64,
) -> Vec<MatchResult> {
    let order = Order::make_limit(0, id, instrument, side, qty, price, Action::New).unwrap();
    engine.process(order).unwrap()
}

/// Quickly builds and submits a MARKET NEW, panicking on validation failure.
pub fn submit_market(
    engine: &mut Engine,
    id: u64,
    instrument: &str,
    side: Side,
    qty: Quantity,
) -> Vec<MatchResult> {
    let order = Order::make_market(0, id, instrument, side, qty, Action::New).unwrap();
    engine.process(order).unwrap()
}

/// Submits a MODIFY to an absolute new quantity/price.
pub fn submit_modify(
    engine: &mut Engine,
    id: u64,
    instrument: &str,
    side: Side,
    qty: Quantity,
    price: f64,
) -> Vec<MatchResult> {
    let order = Order::make_limit(0, id, instrument, side, qty, price, Action::Modify).unwrap();
    engine.process(order).unwrap()
}

/// Submits a CANCEL for a resting LIMIT order.
pub fn submit_cancel(
    engine: &mut Engine,
    id: u64,
    instrument: &str,
    side: Side,
    price: f64,
) -> Vec<MatchResult> {
    let order = Order::make_limit(0, id, instrument, side, 0, price, Action::Cancel).unwrap();
    engine.process(order).unwrap()
}
