mod support;

use std::sync::atomic::Ordering;
use std::time::Duration;

use colloquy_session::{poll_run, PollConfig, RunOutcome};
use colloquy_types::{RunHandle, RunStatus, RunStatusReport};

use support::{completed_with, MockBackend};

fn fast_poll(max_attempts: u32) -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(1),
        max_attempts,
    }
}

fn handle() -> RunHandle {
    RunHandle {
        thread_id: "t1".to_string(),
        run_id: "r1".to_string(),
    }
}

#[tokio::test]
async fn poll_queries_exactly_once_per_status_until_terminal() {
    let backend = MockBackend::new().with_statuses(vec![
        RunStatusReport::status_only(RunStatus::Queued),
        RunStatusReport::status_only(RunStatus::InProgress),
        RunStatusReport::status_only(RunStatus::InProgress),
        completed_with("Hi there"),
    ]);

    let outcome = poll_run(&backend, "a-1", &handle(), &fast_poll(60))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Completed {
            text: "Hi there".to_string()
        }
    );
    // Four statuses, four queries, and polling ceased at the terminal one
    assert_eq!(backend.status_queries.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn poll_times_out_exactly_at_the_attempt_bound() {
    let mut backend = MockBackend::new();
    backend.pending_forever = true;

    let outcome = poll_run(&backend, "a-1", &handle(), &fast_poll(60))
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::TimedOut);
    assert_eq!(backend.status_queries.load(Ordering::SeqCst), 60);
}

#[tokio::test]
async fn poll_does_not_time_out_before_the_bound() {
    let mut statuses = vec![RunStatusReport::status_only(RunStatus::InProgress); 59];
    statuses.push(completed_with("made it"));
    let backend = MockBackend::new().with_statuses(statuses);

    let outcome = poll_run(&backend, "a-1", &handle(), &fast_poll(60))
        .await
        .unwrap();

    assert!(outcome.is_completed());
    assert_eq!(backend.status_queries.load(Ordering::SeqCst), 60);
}

#[tokio::test]
async fn failed_run_surfaces_the_remote_reason() {
    let backend = MockBackend::new().with_statuses(vec![RunStatusReport {
        status: RunStatus::Failed,
        messages: Vec::new(),
        error: Some("model exploded".to_string()),
    }]);

    let outcome = poll_run(&backend, "a-1", &handle(), &fast_poll(60))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Failed {
            reason: "model exploded".to_string()
        }
    );
}

#[tokio::test]
async fn failed_run_without_reason_falls_back_to_a_generic_message() {
    let backend = MockBackend::new()
        .with_statuses(vec![RunStatusReport::status_only(RunStatus::Failed)]);

    let outcome = poll_run(&backend, "a-1", &handle(), &fast_poll(60))
        .await
        .unwrap();

    match outcome {
        RunOutcome::Failed { reason } => assert!(!reason.is_empty()),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn cancelled_run_is_a_typed_outcome() {
    let backend = MockBackend::new()
        .with_statuses(vec![RunStatusReport::status_only(RunStatus::Cancelled)]);

    let outcome = poll_run(&backend, "a-1", &handle(), &fast_poll(60))
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Cancelled { .. }));
}

#[tokio::test]
async fn requires_action_is_surfaced_as_unsupported() {
    let backend = MockBackend::new()
        .with_statuses(vec![RunStatusReport::status_only(RunStatus::RequiresAction)]);

    let outcome = poll_run(&backend, "a-1", &handle(), &fast_poll(60))
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Unsupported);
    assert_eq!(backend.status_queries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transport_failures_propagate_as_errors_not_outcomes() {
    // Empty script and no pending fallback: the status call errors
    let backend = MockBackend::new();

    let result = poll_run(&backend, "a-1", &handle(), &fast_poll(60)).await;

    assert!(result.is_err());
}
