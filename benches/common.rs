use matchcore::{Action, Engine, Order, Side};

pub fn submit_limit(engine: &mut Engine, id: u64, side: Side, price: f64, qty: u64) {
    let order = Order::make_limit(0, id, "AAPL", side, qty, price, Action::New).unwrap();
    engine.process(order).unwrap();
}

pub fn submit_market(engine: &mut Engine, id: u64, side: Side, qty: u64) {
    let order = Order::make_market(0, id, "AAPL", side, qty, Action::New).unwrap();
    engine.process(order).unwrap();
}
