use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer position on the walk grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridPos(pub IVec2);

impl GridPos {
    pub const ORIGIN: Self = Self(IVec2::ZERO);

    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub fn x(self) -> i32 {
        self.0.x
    }

    pub fn y(self) -> i32 {
        self.0.y
    }

    /// Straight-line distance to `other`.
    pub fn distance_to(self, other: GridPos) -> f64 {
        let d = (other.0 - self.0).as_dvec2();
        d.length()
    }

    /// Position after taking `step`.
    pub fn offset(self, step: Step) -> Self {
        Self(self.0 + step.delta())
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

/// One unit move along a cardinal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    North,
    South,
    East,
    West,
}

impl Step {
    /// Every step, in the order random selection indexes them.
    pub const ALL: [Step; 4] = [Step::North, Step::South, Step::East, Step::West];

    pub fn delta(self) -> IVec2 {
        match self {
            Step::North => IVec2::new(0, 1),
            Step::South => IVec2::new(0, -1),
            Step::East => IVec2::new(1, 0),
            Step::West => IVec2::new(-1, 0),
        }
    }
}
