use std::time::Duration;

use courtside::{
    Capability, EntityKind, FallbackPolicy, ReconcileError, SourceError, SourceUsed,
    TimeoutReason,
};
use courtside_core::SourceCost;
use courtside_mock::{DynamicMockSource, MockBehavior, MockSource};
use tokio::time::Instant;

use crate::helpers::{OFF_DAY, SLATE, engine, scoreboard, stats, team, timeout_reason, windowed};

#[tokio::test]
async fn schedule_falls_back_when_the_primary_fails() {
    let (flaky, ctl) = DynamicMockSource::new_with_controller("flaky");
    ctl.set_schedule_behavior(MockBehavior::Fail(SourceError::UpstreamError { code: 503 }))
        .await;

    let engine = engine(&[flaky, stats()]).build().unwrap();
    let result = engine.reconcile_schedule(SLATE).await.unwrap();

    assert_eq!(result.capability, Capability::Schedule);
    assert_eq!(result.source_used, SourceUsed::Fallback);
    assert_eq!(result.records.len(), 4);
    assert!(result.records.iter().all(|r| r.kind == EntityKind::Team));
    assert!(result.errors.iter().any(|e| matches!(
        e,
        ReconcileError::SourceUnavailable { source_id, cause: SourceError::UpstreamError { code: 503 } }
            if source_id == "flaky"
    )));
}

#[tokio::test]
async fn empty_primary_schedule_is_trusted() {
    let (primary, primary_ctl) = DynamicMockSource::new_with_controller("primary");
    let (backup, backup_ctl) = DynamicMockSource::new_with_controller("backup");
    primary_ctl
        .set_schedule_behavior(MockBehavior::Return(Vec::new()))
        .await;
    backup_ctl
        .set_schedule_behavior(MockBehavior::Return(vec![team(
            "backup",
            Some("BOS"),
            "Boston Celtics",
            114,
        )]))
        .await;

    let engine = engine(&[primary, backup]).build().unwrap();
    let result = engine.reconcile_schedule(SLATE).await.unwrap();

    assert_eq!(backup_ctl.calls(Capability::Schedule).await, 0);
    assert!(result.records.is_empty());
    assert!(result.partial);
    assert!(result.errors.is_empty());
    assert_eq!(result.source_used, SourceUsed::NoDataAvailable);
}

#[tokio::test]
async fn on_failure_or_empty_consults_the_fallback() {
    let (primary, primary_ctl) = DynamicMockSource::new_with_controller("primary");
    primary_ctl
        .set_schedule_behavior(MockBehavior::Return(Vec::new()))
        .await;

    let engine = engine(&[primary, stats()])
        .fallback_policy(Capability::Schedule, FallbackPolicy::OnFailureOrEmpty)
        .build()
        .unwrap();
    let result = engine.reconcile_schedule(SLATE).await.unwrap();

    assert_eq!(result.source_used, SourceUsed::Fallback);
    assert_eq!(result.records.len(), 4);
    assert!(!result.partial);
}

#[tokio::test]
async fn off_day_is_an_empty_partial_answer() {
    let engine = engine(&[stats()])
        .fallback_policy(Capability::Schedule, FallbackPolicy::Never)
        .build()
        .unwrap();
    let result = engine.reconcile_schedule(OFF_DAY).await.unwrap();

    assert!(result.records.is_empty());
    assert!(result.partial);
    assert!(result.errors.is_empty());
    assert_eq!(result.source_used, SourceUsed::NoDataAvailable);
}

#[tokio::test]
async fn every_source_failing_still_answers() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let result = engine
        .reconcile_schedule(MockSource::FAIL_DATE)
        .await
        .unwrap();

    assert!(result.records.is_empty());
    assert!(result.partial);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.source_used, SourceUsed::NoDataAvailable);
}

#[tokio::test(start_paused = true)]
async fn stalled_primary_leaves_room_for_a_paced_fallback() {
    let (primary, primary_ctl) = DynamicMockSource::new_with_controller("primary");
    let (backup, backup_ctl) = DynamicMockSource::new_with_controller("backup");
    primary_ctl.set_schedule_behavior(MockBehavior::Hang).await;
    backup_ctl
        .set_schedule_behavior(MockBehavior::Return(vec![team(
            "backup",
            Some("BOS"),
            "Boston Celtics",
            114,
        )]))
        .await;
    backup_ctl.set_cost(SourceCost {
        fixed: Duration::from_millis(200),
        per_item: Duration::ZERO,
        expected_items: 0,
    });

    let window = Duration::from_secs(2);
    let engine = windowed(&[primary, backup], window).build().unwrap();
    let started = Instant::now();
    let result = engine.reconcile_schedule(SLATE).await.unwrap();

    assert!(started.elapsed() <= window);
    assert_eq!(backup_ctl.calls(Capability::Schedule).await, 1);
    assert_eq!(result.source_used, SourceUsed::Fallback);
    assert_eq!(result.records.len(), 1);
    assert_eq!(timeout_reason(&result, "primary"), Some(TimeoutReason::Deadline));
    assert_eq!(timeout_reason(&result, "backup"), None);
}
