//! Benchmarks for the pipeline's primitives.

mod filter;
mod moving_average;
mod noise;
mod oscillator;

pub use filter::bench_filter;
pub use moving_average::bench_moving_average;
pub use noise::bench_noise;
pub use oscillator::bench_oscillator;
