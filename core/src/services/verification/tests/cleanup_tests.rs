//! Unit tests for the background sweeper

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::services::verification::{
    SweepResult, SweepService, VerificationService, VerificationServiceConfig,
};

fn service_with_interval(seconds: u64) -> Arc<VerificationService> {
    Arc::new(VerificationService::new(VerificationServiceConfig {
        sweep_interval_seconds: seconds,
        ..Default::default()
    })
    .unwrap())
}

#[test]
fn test_run_once_reports_counts() {
    let verification = service_with_interval(60);
    verification.issue_at("old@x.com", Utc::now() - Duration::minutes(30));
    verification.issue("fresh@x.com");

    let sweeper = SweepService::new(Arc::clone(&verification));

    assert_eq!(sweeper.run_once(), SweepResult { removed: 1, remaining: 1 });
    assert_eq!(sweeper.run_once(), SweepResult { removed: 0, remaining: 1 });
}

#[tokio::test]
async fn test_disabled_sweeper_does_not_start() {
    let verification = service_with_interval(0);
    let sweeper = Arc::new(SweepService::new(verification));

    assert!(sweeper.start_background_task().is_none());
}

#[tokio::test]
async fn test_with_interval_overrides_config() {
    let verification = service_with_interval(60);
    let sweeper = Arc::new(SweepService::new(verification).with_interval(0));

    assert!(sweeper.start_background_task().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_background_task_sweeps_expired_codes() {
    let verification = service_with_interval(30);
    verification.issue_at("old@x.com", Utc::now() - Duration::minutes(30));

    let sweeper = Arc::new(SweepService::new(Arc::clone(&verification)));
    let handle = sweeper.start_background_task().unwrap();

    // The first interval tick fires immediately
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    assert_eq!(verification.pending_count(), 0);

    verification.issue_at("later@x.com", Utc::now() - Duration::minutes(30));
    tokio::time::sleep(std::time::Duration::from_secs(31)).await;
    assert_eq!(verification.pending_count(), 0);

    handle.abort();
}
