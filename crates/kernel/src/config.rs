use randwalk_common::GridPos;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a simulation config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Construction-time parameters for a simulation run.
///
/// Every key is optional in YAML; missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of walkers generated at startup.
    pub walkers: usize,
    /// Position every trial starts from.
    pub origin: GridPos,
    /// Rounds of steps per frame.
    pub steps: usize,
    /// Frames in one animation.
    pub frames: u64,
    /// Plot x-axis display range.
    pub x_range: [f64; 2],
    /// Plot y-axis display range.
    pub y_range: [f64; 2],
    /// Delay between animation frames, in milliseconds.
    pub frame_interval_ms: u64,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            walkers: 10,
            origin: GridPos::ORIGIN,
            steps: 100,
            frames: 100,
            x_range: [0.0, 100.0],
            y_range: [-0.5, 1.0],
            frame_interval_ms: 200,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.walkers == 0 {
            return Err(ConfigError::Invalid("walkers must be at least 1".into()));
        }
        for (axis, [lo, hi]) in [("x_range", self.x_range), ("y_range", self.y_range)] {
            if lo.is_nan() || hi.is_nan() || lo >= hi {
                return Err(ConfigError::Invalid(format!(
                    "{axis} must be increasing, got [{lo}, {hi}]"
                )));
            }
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "frame_interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_run() {
        let c = SimulationConfig::default();
        assert_eq!(c.walkers, 10);
        assert_eq!(c.origin, GridPos::ORIGIN);
        assert_eq!(c.steps, 100);
        assert_eq!(c.frames, 100);
        assert_eq!(c.x_range, [0.0, 100.0]);
        assert_eq!(c.y_range, [-0.5, 1.0]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let c = SimulationConfig::from_yaml_str("walkers: 3\norigin: [4, -2]\nseed: 5\n").unwrap();
        assert_eq!(c.walkers, 3);
        assert_eq!(c.origin, GridPos::new(4, -2));
        assert_eq!(c.seed, Some(5));
        assert_eq!(c.steps, 100);
    }

    #[test]
    fn zero_walkers_rejected() {
        let err = SimulationConfig::from_yaml_str("walkers: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn inverted_range_rejected() {
        let err = SimulationConfig::from_yaml_str("y_range: [1.0, -0.5]\n").unwrap_err();
        assert!(err.to_string().contains("y_range"));
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let err = SimulationConfig::from_yaml_str("walkers: [oops").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "steps: 25\nframes: 4").unwrap();
        let c = SimulationConfig::load(file.path()).unwrap();
        assert_eq!(c.steps, 25);
        assert_eq!(c.frames, 4);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = SimulationConfig::load("/nonexistent/randwalk.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
