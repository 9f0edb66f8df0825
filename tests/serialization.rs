mod common;

use crate::common::*;
use matchcore::{Action, Order, Side};

#[test]
fn order_round_trips_through_json() {
    let order = Order::make_limit(1, 7, "AAPL", Side::Buy, 10, 100.25, Action::New).unwrap();

    let encoded = serde_json::to_string(&order).unwrap();
    let decoded: Order = serde_json::from_str(&encoded).unwrap();

    assert_eq!(order, decoded);
}

#[test]
fn match_result_round_trips_through_json() {
    let mut engine = matchcore::Engine::new();
    submit_limit(&mut engine, 1, "AAPL", Side::Sell, 5, 100.0);
    let rows = submit_limit(&mut engine, 2, "AAPL", Side::Buy, 5, 100.0);
    let row = &rows[0];

    let encoded = serde_json::to_string(row).unwrap();
    let decoded: matchcore::MatchResult = serde_json::from_str(&encoded).unwrap();

    assert_eq!(*row, decoded);
    assert_eq!(decoded.status, matchcore::Status::Executed);
}
