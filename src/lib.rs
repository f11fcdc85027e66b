pub mod analysis;
pub mod config;
pub mod dsp;
pub mod error;
pub mod pipeline; // Harmonic -> noisy -> filtered evaluation
pub mod session; // UI-facing parameter state and actions
pub mod time_base;

pub use config::{NoisePolicy, ParamRange, ParamRanges, SessionConfig};
pub use dsp::{HarmonicParams, NoiseParams};
pub use error::{Result, SignalError};
pub use pipeline::{FilterKind, FilterParams, NoiseCache, SignalPipeline, SignalSet};
pub use session::{DemoSession, SessionParam};
pub use time_base::TimeBase;
