use std::time::Duration;

use courtside::{
    Capability, Courtside, CourtsideError, MatchPolicy, StatCategory, StatsSource,
};
use courtside_core::SourceKey;
use courtside_mock::MockSource;
use rust_decimal::Decimal;

use crate::helpers::{engine, scoreboard, stats};

fn invalid_config(result: Result<Courtside, CourtsideError>) -> String {
    match result {
        Err(CourtsideError::InvalidConfig { message }) => message,
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("expected InvalidConfig"),
    }
}

#[test]
fn engine_needs_a_source() {
    let msg = invalid_config(Courtside::builder().build());
    assert!(msg.contains("no sources"));
}

#[test]
fn duplicate_source_names_are_rejected() {
    let msg = invalid_config(engine(&[stats(), stats()]).build());
    assert!(msg.contains("mock-stats"));
}

#[test]
fn margin_must_leave_a_window() {
    let msg = invalid_config(
        engine(&[stats()])
            .platform_timeout(Duration::from_secs(2))
            .safety_margin(Duration::from_secs(2))
            .build(),
    );
    assert!(msg.contains("safety margin"));
}

#[test]
fn empty_matching_ladder_is_rejected() {
    let policy = MatchPolicy {
        strategies: Vec::new(),
        ..MatchPolicy::default()
    };
    invalid_config(engine(&[stats()]).match_policy(policy).build());
}

#[test]
fn negative_underperformance_ratio_is_rejected() {
    invalid_config(
        engine(&[stats()])
            .underperformance_ratio(Decimal::new(-1, 1))
            .build(),
    );
}

#[test]
fn priority_lists_drop_unregistered_and_repeated_sources() {
    let (s, b) = (stats(), scoreboard());
    let stranger: std::sync::Arc<dyn StatsSource> =
        std::sync::Arc::new(MockSource::stats_style().named("stranger"));
    let engine = engine(&[s.clone(), b.clone()])
        .prefer_for_capability(Capability::BoxScores, &[stranger, b.clone(), b.clone(), s])
        .prefer_for_category(StatCategory::Rebounding, &[b])
        .build()
        .unwrap();

    let cfg = engine.config();
    assert_eq!(
        cfg.capability_priority.get(&Capability::BoxScores).unwrap(),
        &[SourceKey::new("mock-scoreboard"), SourceKey::new("mock-stats")]
    );
    assert_eq!(
        cfg.category_priority.get(&StatCategory::Rebounding).unwrap(),
        &[SourceKey::new("mock-scoreboard")]
    );
}
