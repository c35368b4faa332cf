use courtside::{Capability, EntityKind, SourceUsed, StatCategory, StatKind};
use rust_decimal::Decimal;

use crate::helpers::{SLATE, engine, find, scoreboard, stats, without_fetch_times};

#[tokio::test]
async fn stats_and_scoreboard_spellings_join_onto_one_key() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert_eq!(result.capability, Capability::BoxScores);
    assert_eq!(result.source_used, SourceUsed::MergedBoth);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert!(!result.partial);
    assert_eq!(result.records_of(EntityKind::Team).count(), 4);
    assert_eq!(result.records_of(EntityKind::Player).count(), 8);
    assert_eq!(result.provenance.len(), result.records.len());
    assert_eq!(result.superseded.len(), 12);

    // "GS" and "GSW" are one franchise
    let warriors = find(&result, "GSW");
    assert_eq!(warriors.stat(StatKind::Points), Some(Decimal::from(110)));
    let curry = find(&result, "GSW:stephen-curry");
    assert_eq!(curry.team_code.as_deref(), Some("GSW"));
    assert_eq!(curry.game.opponent.as_deref(), Some("NYK"));

    let lebron = find(&result, "LAL:lebron-james");
    assert_eq!(lebron.display_name, "LeBron James");
    assert_eq!(lebron.stat(StatKind::Rebounds), Some(Decimal::from(8)));
    let prov = result.provenance_for("LAL:lebron-james").unwrap();
    assert_eq!(prov.served_by, "mock-stats");
    assert!(prov.overrides.is_empty());
    assert_eq!(prov.discarded, ["mock-scoreboard"]);
}

#[tokio::test]
async fn category_preference_takes_rebounds_from_scoreboard() {
    let (s, b) = (stats(), scoreboard());
    let engine = engine(&[s, b.clone()])
        .prefer_for_category(StatCategory::Rebounding, &[b])
        .build()
        .unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    let lebron = find(&result, "LAL:lebron-james");
    assert_eq!(lebron.stat(StatKind::Rebounds), Some(Decimal::from(9)));
    assert_eq!(lebron.stat(StatKind::Points), Some(Decimal::from(25)));
    let curry = find(&result, "GSW:stephen-curry");
    assert_eq!(curry.stat(StatKind::Rebounds), Some(Decimal::from(5)));

    let prov = result.provenance_for("LAL:lebron-james").unwrap();
    assert_eq!(prov.served_by, "mock-stats");
    assert_eq!(
        prov.overrides.get(&StatCategory::Rebounding).map(String::as_str),
        Some("mock-scoreboard")
    );
    assert!(prov.discarded.is_empty());
}

#[tokio::test]
async fn capability_priority_picks_the_base_source() {
    let (s, b) = (stats(), scoreboard());
    let engine = engine(&[s.clone(), b.clone()])
        .prefer_for_capability(Capability::BoxScores, &[b, s])
        .build()
        .unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert_eq!(result.records_of(EntityKind::Player).count(), 8);
    let lebron = result
        .records
        .iter()
        .find(|r| r.display_name == "L. James")
        .unwrap();
    assert_eq!(lebron.stat(StatKind::Rebounds), Some(Decimal::from(9)));
    let prov = result.provenance_for(&lebron.entity_id).unwrap();
    assert_eq!(prov.served_by, "mock-scoreboard");
}

#[tokio::test]
async fn team_filter_accepts_any_provider_spelling() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let result = engine
        .reconcile_box_scores(SLATE, Some("Golden State Warriors"))
        .await
        .unwrap();

    assert_eq!(result.records.len(), 6);
    assert!(
        result
            .records
            .iter()
            .all(|r| r.game.game_id.as_deref() == Some("0022300572"))
    );
}

#[tokio::test]
async fn records_are_ordered_teams_first_within_each_team() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    let keys: Vec<(Option<&str>, EntityKind)> = result
        .records
        .iter()
        .map(|r| (r.team_code.as_deref(), r.kind))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(result.records[0].entity_id, "BOS");
}

#[tokio::test(start_paused = true)]
async fn repeated_passes_agree_apart_from_fetch_time() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let first = engine.reconcile_box_scores(SLATE, None).await.unwrap();
    let second = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert!(!first.superseded.is_empty());
    assert_eq!(without_fetch_times(&first), without_fetch_times(&second));
    assert_eq!(
        serde_json::to_string(&without_fetch_times(&first)).unwrap(),
        serde_json::to_string(&without_fetch_times(&second)).unwrap()
    );
}

#[tokio::test]
async fn malformed_date_and_unknown_team_are_rejected() {
    let engine = engine(&[stats()]).build().unwrap();

    let err = engine.reconcile_box_scores("2024-13-01", None).await.unwrap_err();
    assert!(matches!(err, courtside::CourtsideError::InvalidArg(_)));

    let err = engine
        .reconcile_box_scores(SLATE, Some("Springfield Isotopes"))
        .await
        .unwrap_err();
    assert!(matches!(err, courtside::CourtsideError::InvalidArg(_)));
}
