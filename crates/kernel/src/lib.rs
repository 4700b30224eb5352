//! Walk Kernel: walkers, the field that owns them, and the frame driver.
//!
//! # Invariants
//! - Every walker in a field has a non-empty path starting at its last origin.
//! - Walker names are unique within a field.
//! - A field seeded with the same value replays the same walks.

pub mod config;
pub mod driver;
pub mod error;
pub mod field;
pub mod rng;
pub mod trial;
pub mod walker;

pub use config::{ConfigError, SimulationConfig};
pub use driver::{DriverState, FrameReport, MeanSink, PlotPoint, SimulationDriver};
pub use error::KernelError;
pub use field::Field;
pub use trial::{DEFAULT_TRIAL_STEPS, TrialOutcome, run_trials};
pub use walker::Walker;

pub fn crate_info() -> &'static str {
    "randwalk-kernel v0.1.0"
}
