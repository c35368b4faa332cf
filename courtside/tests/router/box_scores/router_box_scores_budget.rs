use std::sync::Arc;
use std::time::Duration;

use courtside::{Capability, FetchRequest, SourceUsed, StatsSource, TimeoutReason};
use courtside_core::SourceCost;
use courtside_mock::{DynamicMockSource, MockBehavior, MockSource, Style, fixtures};
use tokio::time::Instant;

use crate::helpers::{SLATE, slate, stats, timeout_reason, windowed};

#[tokio::test(start_paused = true)]
async fn hanging_source_is_abandoned_at_the_deadline() {
    let (stalled, ctl) = DynamicMockSource::new_with_controller("stalled");
    ctl.set_box_score_behavior(MockBehavior::Hang).await;

    let window = Duration::from_secs(2);
    let engine = windowed(&[stats(), stalled], window).build().unwrap();

    let started = Instant::now();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed <= window + Duration::from_millis(50), "{elapsed:?}");
    assert_eq!(timeout_reason(&result, "stalled"), Some(TimeoutReason::Deadline));
    assert_eq!(result.source_used, SourceUsed::Primary);
    assert_eq!(result.records.len(), 12);
    assert!(!result.partial);
}

#[tokio::test(start_paused = true)]
async fn slow_fallback_loses_to_the_deadline_but_primary_survives() {
    let (slow, ctl) = DynamicMockSource::new_with_controller("slow");
    ctl.set_box_score_behavior(MockBehavior::Delay(Duration::from_secs(30), Vec::new()))
        .await;

    let engine = windowed(&[stats(), slow], Duration::from_secs(1))
        .build()
        .unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert_eq!(timeout_reason(&result, "slow"), Some(TimeoutReason::Deadline));
    assert!(result.elapsed_budget_ms <= 1_050);
    assert!(!result.records.is_empty());
}

#[tokio::test(start_paused = true)]
async fn source_costing_more_than_the_window_is_never_called() {
    let (costly, ctl) = DynamicMockSource::new_with_controller("costly");
    ctl.set_cost(SourceCost {
        fixed: Duration::from_secs(3),
        per_item: Duration::ZERO,
        expected_items: 0,
    });

    let engine = windowed(&[stats(), costly], Duration::from_secs(2))
        .build()
        .unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert_eq!(ctl.calls(Capability::BoxScores).await, 0);
    assert_eq!(timeout_reason(&result, "costly"), Some(TimeoutReason::Budget));
    assert_eq!(result.source_used, SourceUsed::Primary);
}

#[tokio::test(start_paused = true)]
async fn truncated_fetch_marks_the_result_partial() {
    let slow: Arc<dyn StatsSource> =
        Arc::new(MockSource::stats_style().with_per_item_cost(Duration::from_millis(1500)));
    let engine = windowed(&[slow], Duration::from_secs(2)).build().unwrap();

    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert!(result.partial);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    // one game fits: two teams and four players
    assert_eq!(result.records.len(), 6);
    assert!(
        result
            .records
            .iter()
            .all(|r| r.game.game_id.as_deref() == Some("0022300571"))
    );
}

#[tokio::test(start_paused = true)]
async fn without_partial_results_an_oversized_source_is_skipped() {
    let slow: Arc<dyn StatsSource> =
        Arc::new(MockSource::stats_style().with_per_item_cost(Duration::from_millis(1500)));
    let engine = windowed(&[slow], Duration::from_secs(2))
        .allow_partial(false)
        .build()
        .unwrap();

    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert!(result.records.is_empty());
    assert!(result.partial);
    assert_eq!(result.source_used, SourceUsed::NoDataAvailable);
    assert_eq!(timeout_reason(&result, "mock-stats"), Some(TimeoutReason::Budget));
}

#[tokio::test(start_paused = true)]
async fn generous_item_estimate_is_not_a_cut() {
    let (padded, ctl) = DynamicMockSource::new_with_controller("padded");
    let lines = fixtures::box_scores("padded", &FetchRequest::new(slate()), Style::Stats);
    ctl.set_box_score_behavior(MockBehavior::Return(lines)).await;
    // fifteen games estimated, ten fit, the slate only has two
    ctl.set_cost(SourceCost {
        fixed: Duration::ZERO,
        per_item: Duration::from_millis(100),
        expected_items: 15,
    });

    let engine = windowed(&[padded], Duration::from_secs(1)).build().unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    let requests = ctl.requests(Capability::BoxScores).await;
    assert_eq!(requests[0].item_limit, Some(10));
    assert_eq!(result.records.len(), 12);
    assert!(!result.partial);
}
