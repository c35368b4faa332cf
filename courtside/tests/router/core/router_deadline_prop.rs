use std::time::Duration;

use courtside::{Capability, FallbackPolicy, TimeoutReason};
use courtside_mock::{DynamicMockSource, MockBehavior};
use proptest::prelude::*;

use crate::helpers::{SLATE, stats, timeout_reason, windowed};

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pass_never_outlives_its_window(
        window_ms in 200u64..6_000,
        stalled_first in any::<bool>(),
        cross_check in any::<bool>(),
    ) {
        let window = Duration::from_millis(window_ms);
        paused_runtime().block_on(async move {
            let (stalled, ctl) = DynamicMockSource::new_with_controller("stalled");
            ctl.set_box_score_behavior(MockBehavior::Hang).await;
            let sources = if stalled_first {
                vec![stalled, stats()]
            } else {
                vec![stats(), stalled]
            };
            let policy = if cross_check {
                FallbackPolicy::CrossCheck
            } else {
                FallbackPolicy::OnFailureOrEmpty
            };
            let engine = windowed(&sources, window)
                .fallback_policy(Capability::BoxScores, policy)
                .build()
                .unwrap();

            let started = tokio::time::Instant::now();
            let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

            assert!(started.elapsed() <= window + Duration::from_millis(50));
            if stalled_first || cross_check {
                assert_eq!(timeout_reason(&result, "stalled"), Some(TimeoutReason::Deadline));
            }
            if !stalled_first {
                assert_eq!(result.records.len(), 12);
            }
        });
    }
}
