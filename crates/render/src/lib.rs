//! Reporting Adapter: sink-agnostic output for the walk kernel.
//!
//! # Invariants
//! - Renderers and sinks never mutate the field.
//! - Everything shown derives from field state, frame reports and the view.

mod renderer;
mod series;

pub use renderer::{DebugTextRenderer, PlotView, Renderer};
pub use series::SeriesSink;

pub fn crate_info() -> &'static str {
    "randwalk-render v0.1.0"
}
