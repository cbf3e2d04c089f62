//! Event system for monitoring an elimination run.
//!
//! Listeners registered on a [`FormSolver`](crate::FormSolver) are told when
//! solving starts, after every committed removal and when solving ends.
//! Removals are streamed as they happen, so a reporter can print each
//! dropped item before the run is over.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use formforge_solver::event::{EliminationEventSupport, EliminationListener, RemovalStep};
//!
//! #[derive(Debug)]
//! struct PrintingListener;
//! impl EliminationListener for PrintingListener {
//!     fn on_item_removed(&self, step: &RemovalStep) {
//!         println!("removed {} -> {} items, alpha {}", step.item_id, step.remaining, step.alpha);
//!     }
//! }
//!
//! let mut support = EliminationEventSupport::new();
//! support.add_listener(Arc::new(PrintingListener));
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::solver::EliminationResult;

/// One committed removal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovalStep {
    /// 1-based step number.
    pub step: u64,
    /// Dense grid index of the removed item.
    #[serde(skip)]
    pub item: usize,
    pub item_id: String,
    /// Items left on the form after the removal.
    pub remaining: usize,
    /// Reliability of the remaining form.
    pub alpha: f64,
}

/// Listener for elimination events.
pub trait EliminationListener: Send + Sync + Debug {
    /// Called after each committed removal.
    fn on_item_removed(&self, step: &RemovalStep);

    /// Called when solving starts.
    fn on_solving_started(&self, _initial_size: usize, _target_length: usize) {}

    /// Called when solving ends successfully.
    fn on_solving_ended(&self, _result: &EliminationResult) {}
}

/// Central event broadcaster.
///
/// Listeners are called synchronously in registration order.
#[derive(Default)]
pub struct EliminationEventSupport {
    listeners: Vec<Arc<dyn EliminationListener>>,
}

impl EliminationEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn EliminationListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn fire_solving_started(&self, initial_size: usize, target_length: usize) {
        for listener in &self.listeners {
            listener.on_solving_started(initial_size, target_length);
        }
    }

    pub fn fire_item_removed(&self, step: &RemovalStep) {
        for listener in &self.listeners {
            listener.on_item_removed(step);
        }
    }

    pub fn fire_solving_ended(&self, result: &EliminationResult) {
        for listener in &self.listeners {
            listener.on_solving_ended(result);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Debug for EliminationEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EliminationEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A counting listener that tracks event occurrences.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    solving_started_count: AtomicUsize,
    item_removed_count: AtomicUsize,
    solving_ended_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solving_started_count(&self) -> usize {
        self.solving_started_count.load(Ordering::SeqCst)
    }

    pub fn item_removed_count(&self) -> usize {
        self.item_removed_count.load(Ordering::SeqCst)
    }

    pub fn solving_ended_count(&self) -> usize {
        self.solving_ended_count.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.solving_started_count.store(0, Ordering::SeqCst);
        self.item_removed_count.store(0, Ordering::SeqCst);
        self.solving_ended_count.store(0, Ordering::SeqCst);
    }
}

impl EliminationListener for CountingEventListener {
    fn on_item_removed(&self, _step: &RemovalStep) {
        self.item_removed_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_started(&self, _initial_size: usize, _target_length: usize) {
        self.solving_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _result: &EliminationResult) {
        self.solving_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records every removal step in order.
#[derive(Debug, Default)]
pub struct CollectingEventListener {
    steps: Mutex<Vec<RemovalStep>>,
}

impl CollectingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps received so far.
    pub fn steps(&self) -> Vec<RemovalStep> {
        self.steps
            .lock()
            .map(|steps| steps.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl EliminationListener for CollectingEventListener {
    fn on_item_removed(&self, step: &RemovalStep) {
        let mut steps = self
            .steps
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        steps.push(step.clone());
    }
}
