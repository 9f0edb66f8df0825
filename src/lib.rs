//! Single-threaded, deterministic limit order matching engine core.
//!
//! The crate is organized in three layers: [`engine::order`] (the value
//! types), [`engine::book`] (one instrument's price ladders and FIFO
//! queues), and [`engine::engine`] (the per-instrument multiplexer that
//! tracks quantity bookkeeping across NEW/MODIFY/CANCEL and classifies
//! results). `engine::prelude` re-exports the public surface of all three.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub mod engine;
pub mod logging;

pub use engine::prelude::*;
