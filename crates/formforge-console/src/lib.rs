//! Colorful console output for elimination runs.
//!
//! Provides a custom `tracing` layer that formats solver events with colors,
//! plus plain-text and JSON renderers and a listener that prints the
//! narrative while a run is in progress.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end, each committed removal)
//! - **DEBUG**: Candidates rejected by the blueprint check
//! - **TRACE**: Individual candidate evaluations

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod report;

pub use report::{render_json, render_step, render_summary, render_text, NarrativeListener};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "formforge_solver=info,formforge_io=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the FormForge banner and sets up tracing. Log lines go to stderr
/// so that reports written to stdout stay machine-readable.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(FormConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _____                    _____
|  ___|__  _ __ _ __ ___ |  ___|__  _ __ __ _  ___
| |_ / _ \| '__| '_ ` _ \| |_ / _ \| '__/ _` |/ _ \
|  _| (_) | |  | | | | | |  _| (_) | | | (_| |  __/
|_|  \___/|_|  |_| |_| |_|_|  \___/|_|  \__, |\___|
                                        |___/
"#;

    let version_line = format!(
        "              v{} - Reliability-Driven Form Reduction\n",
        VERSION
    );

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats elimination events with colors.
pub struct FormConsoleLayer;

impl<S: Subscriber> Layer<S> for FormConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("formforge_solver")
            && !target.starts_with("formforge_io")
            && !target.starts_with("formforge::")
        {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    item: Option<String>,
    domain: Option<String>,
    strategy: Option<String>,
    step: Option<u64>,
    remaining: Option<u64>,
    remaining_removals: Option<u64>,
    removed: Option<u64>,
    item_count: Option<u64>,
    candidate_count: Option<u64>,
    domain_count: Option<u64>,
    target_length: Option<u64>,
    final_size: Option<u64>,
    duration_ms: Option<u64>,
    evaluations: Option<u64>,
    speed: Option<u64>,
    subsets: Option<u64>,
    count: Option<u64>,
    min: Option<u64>,
    max: Option<u64>,
    candidates: Option<u64>,
    items: Option<u64>,
    domains: Option<u64>,
    alpha: Option<f64>,
    feasible: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "step" => self.step = Some(value),
            "remaining" => self.remaining = Some(value),
            "remaining_removals" => self.remaining_removals = Some(value),
            "removed" => self.removed = Some(value),
            "item_count" => self.item_count = Some(value),
            "candidate_count" => self.candidate_count = Some(value),
            "domain_count" => self.domain_count = Some(value),
            "target_length" => self.target_length = Some(value),
            "target" => self.target_length = Some(value),
            "final_size" => self.final_size = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "evaluations" => self.evaluations = Some(value),
            "speed" => self.speed = Some(value),
            "subsets" => self.subsets = Some(value),
            "count" => self.count = Some(value),
            "min" => self.min = Some(value),
            "max" => self.max = Some(value),
            "candidates" => self.candidates = Some(value),
            "items" => self.items = Some(value),
            "domains" => self.domains = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "alpha" {
            self.alpha = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "feasible" {
            self.feasible = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "item" => self.item = Some(value.to_string()),
            "domain" => self.domain = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "problem_loaded" => format_problem_loaded(v),
        "solve_start" => format_solve_start(v),
        "exhaustive_start" => format_exhaustive_start(v),
        "item_removed" => format_item_removed(v),
        "candidate_rejected" => format_candidate_rejected(v),
        "candidate" => format_candidate(v, level),
        "blueprint_violation" => format_violation(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_problem_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Loaded │ {} candidates │ {} items │ {} domains",
        format_elapsed(),
        "●".bright_blue(),
        format_count(v.candidates).bright_yellow(),
        format_count(v.items).bright_yellow(),
        format_count(v.domains).bright_yellow(),
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let items = v.item_count.unwrap_or(0);
    let target = v.target_length.unwrap_or(0);

    format!(
        "{} {} {} │ {} items → {} │ {} candidates │ {} domains",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.strategy.as_deref().unwrap_or("Solving").white().bold(),
        items.to_formatted_string(&Locale::en).bright_yellow(),
        target.to_formatted_string(&Locale::en).bright_yellow(),
        format_count(v.candidate_count).bright_yellow(),
        format_count(v.domain_count).bright_yellow(),
    )
}

fn format_exhaustive_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Enumerating {} subsets of {} items",
        format_elapsed(),
        "⚡".bright_cyan(),
        format_count(v.subsets).bright_magenta().bold(),
        format_count(v.target_length).bright_yellow(),
    )
}

fn format_item_removed(v: &EventVisitor) -> String {
    format!(
        "{} {} Step {:>5} │ removed {} │ {} items │ alpha {}",
        format_elapsed(),
        "✓".bright_green(),
        format_count(v.step).white(),
        v.item.as_deref().unwrap_or("?").bright_white().bold(),
        format_count(v.remaining).bright_yellow(),
        format_alpha(v.alpha),
    )
}

fn format_candidate_rejected(v: &EventVisitor) -> String {
    format!(
        "{} {} {} kept │ domain {} │ {} removals left",
        format_elapsed(),
        "✗".bright_red(),
        v.item.as_deref().unwrap_or("?").bright_black(),
        v.domain.as_deref().unwrap_or("?").bright_black(),
        format_count(v.remaining_removals).bright_black(),
    )
}

fn format_candidate(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    format!(
        "{} {} without {} │ {}",
        format_elapsed(),
        "·".bright_black(),
        v.item.as_deref().unwrap_or("?").bright_black(),
        format_alpha(v.alpha).bright_black(),
    )
}

fn format_violation(v: &EventVisitor) -> String {
    format!(
        "{} {} domain {} has {} items │ blueprint allows {}..={}",
        format_elapsed(),
        "!".bright_red().bold(),
        v.domain.as_deref().unwrap_or("?").bright_white().bold(),
        format_count(v.count).bright_red(),
        format_count(v.min),
        format_count(v.max),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let feasible = v.feasible.unwrap_or(true);
    let status = if feasible {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "BLUEPRINT VIOLATED".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solving complete │ {} removed │ {} items │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_count(v.removed).white(),
        format_count(v.final_size).bright_yellow(),
        format_alpha(v.alpha),
        status
    );

    output.push_str(&format!(
        " │ {} │ {} evaluations",
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_count(v.evaluations).bright_magenta(),
    ));
    if v.speed.is_some() {
        output.push_str(&format!(" │ {} evals/s", format_count(v.speed).bright_magenta()));
    }

    output
}

fn format_alpha(alpha: Option<f64>) -> String {
    match alpha {
        Some(a) if a >= 0.8 => format!("{:.5}", a).bright_green().to_string(),
        Some(a) if a >= 0.0 => format!("{:.5}", a).yellow().to_string(),
        Some(a) => format!("{:.5}", a).bright_red().to_string(),
        None => "N/A".white().to_string(),
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removal(alpha: f64) -> EventVisitor {
        EventVisitor {
            event: Some("item_removed".to_string()),
            item: Some("Q17".to_string()),
            step: Some(3),
            remaining: Some(1_204),
            alpha: Some(alpha),
            ..Default::default()
        }
    }

    #[test]
    fn test_item_removed_line() {
        let line = format_event(&removal(0.91234567), Level::INFO);
        assert!(line.contains("Q17"));
        assert!(line.contains("1,204"));
        assert!(line.contains("0.91235"));
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let v = EventVisitor {
            event: Some("table_loaded".to_string()),
            ..Default::default()
        };
        assert!(format_event(&v, Level::INFO).is_empty());
        assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
    }

    #[test]
    fn test_candidate_only_at_trace() {
        let v = EventVisitor {
            event: Some("candidate".to_string()),
            item: Some("Q1".to_string()),
            alpha: Some(0.5),
            ..Default::default()
        };
        assert!(format_event(&v, Level::DEBUG).is_empty());
        assert!(format_event(&v, Level::TRACE).contains("Q1"));
    }

    #[test]
    fn test_solve_end_reports_violation() {
        let v = EventVisitor {
            event: Some("solve_end".to_string()),
            removed: Some(25),
            final_size: Some(75),
            alpha: Some(0.87),
            feasible: Some(false),
            duration_ms: Some(1_500),
            evaluations: Some(2_000_000),
            speed: Some(1_333_333),
            ..Default::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("BLUEPRINT VIOLATED"));
        assert!(line.contains("1.50s"));
        assert!(line.contains("2,000,000"));
        assert!(line.contains("1,333,333"));
        assert!(line.contains("evals/s"));
    }

    #[test]
    fn test_solve_end_without_speed() {
        let v = EventVisitor {
            event: Some("solve_end".to_string()),
            removed: Some(0),
            final_size: Some(3),
            alpha: Some(0.5),
            feasible: Some(true),
            ..Default::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("FEASIBLE"));
        assert!(!line.contains("evals/s"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(2_500), "2.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_format_alpha_missing() {
        assert!(format_alpha(None).contains("N/A"));
        assert!(format_alpha(Some(-0.25)).contains("-0.25000"));
    }
}
