//! Rendering of elimination results.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::Mutex;

use formforge_solver::{EliminationListener, EliminationResult, RemovalStep};

/// Renders the run as the step-by-step console narrative.
///
/// Each removal prints the dropped item, the new item count and the new
/// alpha; the summary lists the removed items and the final alpha rounded
/// to five decimals. Blueprint violations of the final form are appended
/// as warnings.
///
/// # Example
///
/// ```
/// use formforge_console::render_text;
/// use formforge_core::{Blueprint, DomainMap, FormProblem, ItemScore, ResponseGrid};
/// use formforge_solver::FormSolver;
///
/// let (c, i) = (ItemScore::Correct, ItemScore::Incorrect);
/// let grid = ResponseGrid::from_rows(
///     vec!["i1".into(), "i2".into(), "i3".into()],
///     vec![
///         ("c1".into(), vec![c, c, i]),
///         ("c2".into(), vec![c, i, c]),
///         ("c3".into(), vec![i, c, c]),
///         ("c4".into(), vec![i, i, c]),
///     ],
/// ).unwrap();
/// let domains = DomainMap::new().with_item("i1", "D").with_item("i2", "D").with_item("i3", "D");
/// let blueprint = Blueprint::new().with_domain("D", 1, 3);
/// let problem = FormProblem::new(grid, &domains, &blueprint).unwrap();
/// let result = FormSolver::new(2).solve(&problem).unwrap();
///
/// let text = render_text(&result);
/// assert!(text.starts_with("Optimal item to remove: i3\n"));
/// assert!(text.ends_with("Alpha for the revised form is 0.5\n"));
/// ```
pub fn render_text(result: &EliminationResult) -> String {
    let mut out: String = result.steps.iter().map(render_step).collect();
    out.push_str(&render_summary(result));
    out
}

/// Renders one removal of the narrative.
pub fn render_step(step: &RemovalStep) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Optimal item to remove: {}", step.item_id);
    let _ = writeln!(out, "New  number of items: {}", step.remaining);
    let _ = writeln!(out, "New alpha: {}", step.alpha);
    out.push('\n');
    out
}

/// Renders the closing part of the narrative: removed items, warnings and
/// the final alpha.
pub fn render_summary(result: &EliminationResult) -> String {
    let mut out = String::new();
    out.push_str("The program has concluded. Remove the following items:\n");
    let _ = writeln!(out, "{}", item_list(&result.removed));
    out.push('\n');

    for violation in &result.blueprint_violations {
        let _ = writeln!(out, "Warning: {violation}");
    }
    let _ = writeln!(
        out,
        "Alpha for the revised form is {}",
        round_to(result.final_alpha, 5)
    );

    out
}

/// Writes each removal of a running solve as it is committed.
///
/// Pair with [`render_summary`] once the run returns.
pub struct NarrativeListener<W> {
    out: Mutex<W>,
}

impl NarrativeListener<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> NarrativeListener<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> EliminationListener for NarrativeListener<W> {
    fn on_item_removed(&self, step: &RemovalStep) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // a closed pipe must not abort the run
        let _ = out.write_all(render_step(step).as_bytes());
        let _ = out.flush();
    }
}

impl<W> fmt::Debug for NarrativeListener<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrativeListener").finish_non_exhaustive()
    }
}

/// Renders the full result, steps and statistics included, as pretty JSON.
pub fn render_json(result: &EliminationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

fn item_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{item}'")).collect();
    format!("[{}]", quoted.join(", "))
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
