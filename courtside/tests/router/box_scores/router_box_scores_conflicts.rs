use courtside::{EntityKind, ReconcileError, StatKind};
use courtside_mock::{DynamicMockSource, MockBehavior};
use rust_decimal::Decimal;

use crate::helpers::{SLATE, engine, find, player, team};

#[tokio::test]
async fn ambiguous_suffix_is_reported_not_guessed() {
    let (a, a_ctl) = DynamicMockSource::new_with_controller("a");
    let (b, b_ctl) = DynamicMockSource::new_with_controller("b");
    a_ctl
        .set_box_score_behavior(MockBehavior::Return(vec![
            player("a", "MIA", "Kelly Oubre Jr.", 12, 5),
            player("a", "MIA", "Kenyon Martin Jr.", 8, 4),
        ]))
        .await;
    b_ctl
        .set_box_score_behavior(MockBehavior::Return(vec![player("b", "MIA", "Jr", 8, 4)]))
        .await;

    let engine = engine(&[a, b]).build().unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert_eq!(result.records.len(), 2);
    let conflict = result
        .errors
        .iter()
        .find_map(|e| match e {
            ReconcileError::IdentityConflict {
                kind,
                raw,
                candidates,
            } => Some((*kind, raw.as_str(), candidates.len())),
            _ => None,
        })
        .expect("conflict diagnostic");
    assert_eq!(conflict, (EntityKind::Player, "Jr", 2));
    // the unmatched line never leaks into either player
    for r in &result.records {
        assert!(result.provenance_for(&r.entity_id).unwrap().overrides.is_empty());
    }
}

#[tokio::test]
async fn team_names_join_by_containment_without_the_directory() {
    let (a, a_ctl) = DynamicMockSource::new_with_controller("a");
    let (b, b_ctl) = DynamicMockSource::new_with_controller("b");
    a_ctl
        .set_box_score_behavior(MockBehavior::Return(vec![team("a", Some("BOS"), "BOS", 110)]))
        .await;
    b_ctl
        .set_box_score_behavior(MockBehavior::Return(vec![team(
            "b",
            None,
            "Boston Celtics",
            110,
        )]))
        .await;

    let engine = engine(&[a, b])
        .seed_team_directory(false)
        .build()
        .unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert_eq!(result.records.len(), 1);
    let celtics = find(&result, "BOS");
    assert_eq!(celtics.stat(StatKind::Points), Some(Decimal::from(110)));
    let prov = result.provenance_for("BOS").unwrap();
    assert_eq!(prov.served_by, "a");
    assert_eq!(prov.discarded, ["b"]);
}

#[tokio::test]
async fn implausible_lines_are_dropped_with_a_diagnostic() {
    let (a, a_ctl) = DynamicMockSource::new_with_controller("a");
    a_ctl
        .set_box_score_behavior(MockBehavior::Return(vec![
            player("a", "LAL", "LeBron James", 25, 8),
            player("a", "LAL", "Anthony Davis", 28, -3),
        ]))
        .await;

    let engine = engine(&[a]).build().unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    assert_eq!(result.records.len(), 1);
    assert!(result.errors.iter().any(|e| matches!(
        e,
        ReconcileError::RejectedRecord { source_id, .. } if source_id == "a"
    )));
}

#[tokio::test]
async fn spelling_already_held_by_another_team_is_a_conflict() {
    let (a, a_ctl) = DynamicMockSource::new_with_controller("a");
    let (b, b_ctl) = DynamicMockSource::new_with_controller("b");
    a_ctl
        .set_box_score_behavior(MockBehavior::Return(vec![
            team("a", Some("LAL"), "Los Angeles", 105),
            team("a", Some("LAC"), "LA Clippers", 112),
        ]))
        .await;
    b_ctl
        .set_box_score_behavior(MockBehavior::Return(vec![team(
            "b",
            Some("LAC"),
            "Los Angeles",
            112,
        )]))
        .await;

    let engine = engine(&[a, b]).build().unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    let conflicts: Vec<(&str, &[String])> = result
        .errors
        .iter()
        .filter_map(|e| match e {
            ReconcileError::IdentityConflict {
                kind: EntityKind::Team,
                raw,
                candidates,
            } => Some((raw.as_str(), candidates.as_slice())),
            _ => None,
        })
        .collect();
    assert_eq!(
        conflicts,
        [("Los Angeles", &["LAC".to_string(), "LAL".to_string()][..])]
    );
    // b's line is withheld; a's records stand alone
    assert_eq!(result.records.len(), 2);
    assert!(result.superseded.is_empty());
    assert_eq!(result.provenance_for("LAC").unwrap().served_by, "a");
}
