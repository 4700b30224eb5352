use randwalk_common::GridPos;
use serde::Serialize;

use crate::error::KernelError;
use crate::field::Field;

/// Step counts used when no explicit list is given.
pub const DEFAULT_TRIAL_STEPS: [usize; 4] = [10, 100, 1_000, 10_000];

/// Result of one independent trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialOutcome {
    pub steps: usize,
    pub mean_distance: f64,
    /// Per-walker displacement, in field iteration order.
    pub distances: Vec<(String, f64)>,
}

/// Run one trial per entry of `step_counts`, resetting to `origin` before each.
///
/// The field is left in the state of the last trial.
pub fn run_trials(
    field: &mut Field,
    origin: GridPos,
    step_counts: &[usize],
) -> Result<Vec<TrialOutcome>, KernelError> {
    let names = field.walker_names();
    let mut outcomes = Vec::with_capacity(step_counts.len());
    for &steps in step_counts {
        field.reset_walkers_paths(origin);
        for _ in 0..steps {
            for name in &names {
                field.move_walker(name)?;
            }
        }
        let distances = names
            .iter()
            .map(|n| field.get_distance(n).map(|d| (n.clone(), d)))
            .collect::<Result<Vec<_>, _>>()?;
        let mean_distance = field.mean_distance()?;
        tracing::info!(steps, mean_distance, "trial complete");
        outcomes.push(TrialOutcome {
            steps,
            mean_distance,
            distances,
        });
    }
    Ok(outcomes)
}
