//! Tests for elimination events.

use std::sync::Arc;

use formforge_test::scenarios::pinned_domain_problem;

use crate::event::{
    CollectingEventListener, CountingEventListener, EliminationEventSupport, EliminationListener,
    RemovalStep,
};
use crate::FormSolver;

fn step(n: u64, item_id: &str) -> RemovalStep {
    RemovalStep {
        step: n,
        item: 0,
        item_id: item_id.to_string(),
        remaining: 10 - n as usize,
        alpha: 0.5,
    }
}

#[test]
fn test_support_broadcasts_in_order() {
    let first = Arc::new(CollectingEventListener::new());
    let second = Arc::new(CollectingEventListener::new());
    let mut support = EliminationEventSupport::new();
    support.add_listener(first.clone());
    support.add_listener(second.clone());

    support.fire_item_removed(&step(1, "x"));
    support.fire_item_removed(&step(2, "y"));

    assert_eq!(support.listener_count(), 2);
    assert_eq!(first.steps(), vec![step(1, "x"), step(2, "y")]);
    assert_eq!(second.steps(), first.steps());
}

#[test]
fn test_clear_listeners() {
    let counter = Arc::new(CountingEventListener::new());
    let mut support = EliminationEventSupport::new();
    support.add_listener(counter.clone());
    support.clear_listeners();

    support.fire_solving_started(5, 3);
    assert!(!support.has_listeners());
    assert_eq!(counter.solving_started_count(), 0);
}

#[test]
fn test_default_hooks_are_optional() {
    #[derive(Debug)]
    struct RemovalsOnly;
    impl EliminationListener for RemovalsOnly {
        fn on_item_removed(&self, _step: &RemovalStep) {}
    }

    let mut support = EliminationEventSupport::new();
    support.add_listener(Arc::new(RemovalsOnly));
    support.fire_solving_started(3, 2);
    support.fire_item_removed(&step(1, "x"));
}

#[test]
fn test_solver_fires_each_event() {
    let counter = Arc::new(CountingEventListener::new());
    let collector = Arc::new(CollectingEventListener::new());
    let mut solver = FormSolver::new(3)
        .with_listener(counter.clone())
        .with_listener(collector.clone());

    let result = solver.solve(&pinned_domain_problem()).unwrap();

    assert_eq!(counter.solving_started_count(), 1);
    assert_eq!(counter.item_removed_count(), 2);
    assert_eq!(counter.solving_ended_count(), 1);

    let steps = collector.steps();
    let ids: Vec<&str> = steps.iter().map(|s| s.item_id.as_str()).collect();
    assert_eq!(ids, vec!["b1", "b2"]);
    assert_eq!(steps[0].step, 1);
    assert_eq!(steps[1].remaining, 3);
    assert_eq!(steps, result.steps);
}

#[test]
fn test_counter_reset() {
    let counter = Arc::new(CountingEventListener::new());
    let mut solver = FormSolver::new(4).with_listener(counter.clone());
    solver.solve(&pinned_domain_problem()).unwrap();
    solver.solve(&pinned_domain_problem()).unwrap();
    assert_eq!(counter.solving_ended_count(), 2);

    counter.reset();
    assert_eq!(counter.item_removed_count(), 0);
}

#[test]
fn test_failed_run_does_not_end() {
    let counter = Arc::new(CountingEventListener::new());
    let mut solver = FormSolver::new(1).with_listener(counter.clone());

    assert!(solver.solve(&pinned_domain_problem()).is_err());
    assert_eq!(counter.solving_started_count(), 1);
    assert_eq!(counter.solving_ended_count(), 0);
}
