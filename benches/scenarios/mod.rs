//! Whole-evaluation benchmarks.
//!
//! These model what one slider drag costs: set a parameter, recompute the
//! three series.

mod session;

pub use session::bench_session;
