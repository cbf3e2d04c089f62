//! Run entry points that hide the loading and solver wiring.

use std::sync::Arc;

use formforge_config::FormConfig;
use formforge_core::{FormForgeError, Result};
use formforge_scoring::{CronbachAlpha, ReliabilityEstimator};
use formforge_solver::{EliminationListener, EliminationResult, FormSolver};
use tracing::info;

/// Loads the configured tables and shortens the form to its target length.
pub fn run(config: &FormConfig) -> Result<EliminationResult> {
    solve(config, None)
}

/// Like [`run`], streaming every committed removal to `listener`.
pub fn run_with_listener(
    config: &FormConfig,
    listener: Arc<dyn EliminationListener>,
) -> Result<EliminationResult> {
    solve(config, Some(listener))
}

fn solve(
    config: &FormConfig,
    listener: Option<Arc<dyn EliminationListener>>,
) -> Result<EliminationResult> {
    config
        .validate()
        .map_err(|e| FormForgeError::Config(e.to_string()))?;

    let mut solver = FormSolver::from_config(config)?;
    if let Some(listener) = listener {
        solver.add_listener(listener);
    }

    let problem = formforge_io::load_problem(&config.inputs)?;
    solver.solve(&problem)
}

/// Cronbach's alpha of the full form described by the configured tables.
///
/// Needs no target length.
pub fn form_reliability(config: &FormConfig) -> Result<f64> {
    let problem = formforge_io::load_problem(&config.inputs)?;
    let alpha = CronbachAlpha.reliability(problem.grid(), &problem.all_items())?;
    info!(
        event = "form_reliability",
        items = problem.item_count() as u64,
        alpha = alpha,
    );
    Ok(alpha)
}
