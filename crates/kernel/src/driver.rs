use randwalk_common::GridPos;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::KernelError;
use crate::field::Field;

/// A point handed to the plotting sink: `x` is the mean distance, `y` is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Outcome of one driver frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// 1-based frame number.
    pub frame: u64,
    pub mean_distance: f64,
    pub point: PlotPoint,
}

/// Receives one report per frame. Implemented for any `FnMut(&FrameReport)`.
pub trait MeanSink {
    fn report(&mut self, report: &FrameReport);
}

impl<F: FnMut(&FrameReport)> MeanSink for F {
    fn report(&mut self, report: &FrameReport) {
        self(report)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, no frame run yet.
    Idle,
    /// At least one frame has run.
    Running,
}

/// Drives the field one animation frame at a time.
///
/// Every frame is an independent trial: the field is reset to the origin and
/// walked `steps` rounds from scratch. Frames never extend the previous walk,
/// so the reported means show convergence across repeated trials.
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    field: Field,
    origin: GridPos,
    steps: usize,
    frame: u64,
    state: DriverState,
}

impl SimulationDriver {
    pub fn new(field: Field, origin: GridPos, steps: usize) -> Self {
        Self {
            field,
            origin,
            steps,
            frame: 0,
            state: DriverState::Idle,
        }
    }

    /// Build a field with the configured walkers and wrap it in a driver.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, KernelError> {
        let mut field = match config.seed {
            Some(seed) => Field::with_seed(seed),
            None => Field::new(),
        };
        field.generate_walkers(config.walkers, config.origin)?;
        Ok(Self::new(field, config.origin, config.steps))
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn into_field(self) -> Field {
        self.field
    }

    pub fn origin(&self) -> GridPos {
        self.origin
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of frames run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Run one frame and report its mean to `sink`.
    pub fn advance<S: MeanSink + ?Sized>(&mut self, sink: &mut S) -> Result<FrameReport, KernelError> {
        let _span = tracing::info_span!("frame", frame = self.frame + 1).entered();

        self.field.reset_walkers_paths(self.origin);
        let names = self.field.walker_names();
        for _ in 0..self.steps {
            for name in &names {
                self.field.move_walker(name)?;
            }
        }
        let mean_distance = self.field.mean_distance()?;

        self.frame += 1;
        self.state = DriverState::Running;
        let report = FrameReport {
            frame: self.frame,
            mean_distance,
            point: PlotPoint {
                x: mean_distance,
                y: 0.0,
            },
        };
        tracing::debug!(
            walkers = names.len(),
            steps = self.steps,
            mean_distance,
            "frame complete"
        );
        sink.report(&report);
        Ok(report)
    }

    /// Run `frames` frames, stopping at the first error.
    pub fn run<S: MeanSink + ?Sized>(&mut self, frames: u64, sink: &mut S) -> Result<(), KernelError> {
        for _ in 0..frames {
            self.advance(sink)?;
        }
        Ok(())
    }

    /// Forget frame progress and return to `Idle`. Walkers are kept.
    pub fn restart(&mut self) {
        self.frame = 0;
        self.state = DriverState::Idle;
        self.field.reset_walkers_paths(self.origin);
    }
}
