//! Shared value types for the random walk workspace.

pub mod types;

pub use types::{GridPos, Step};
