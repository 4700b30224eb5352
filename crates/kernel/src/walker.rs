use rand::Rng;
use randwalk_common::{GridPos, Step};

use crate::error::KernelError;

/// A single random walker.
///
/// A walker carries an optional name and an optional location. The location
/// must be set before the walker can take a step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Walker {
    name: Option<String>,
    location: Option<GridPos>,
}

impl Walker {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            location: None,
        }
    }

    /// Create a named walker already placed at `location`.
    pub fn at(name: impl Into<String>, location: GridPos) -> Self {
        Self {
            name: Some(name.into()),
            location: Some(location),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn location(&self) -> Option<GridPos> {
        self.location
    }

    pub fn set_location(&mut self, x: i32, y: i32) {
        self.location = Some(GridPos::new(x, y));
    }

    /// Take one unit step in a uniformly random cardinal direction.
    /// Returns the location after the step.
    pub fn take_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<GridPos, KernelError> {
        let step = Step::ALL[rng.random_range(0..Step::ALL.len())];
        self.apply_step(step)
    }

    /// Move by `step` and return the new location.
    pub fn apply_step(&mut self, step: Step) -> Result<GridPos, KernelError> {
        let current = self.location.ok_or(KernelError::UninitializedLocation)?;
        let next = current.offset(step);
        self.location = Some(next);
        Ok(next)
    }
}

impl std::fmt::Display for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or("Nameless"))?;
        match self.location {
            Some(loc) => write!(f, " at {loc}"),
            None => f.write_str(" with no location"),
        }
    }
}
