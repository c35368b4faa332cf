use std::collections::BTreeSet;

use courtside::{BoxScoreRequest, EntityKind, ReconciledResult, StatThresholds, ThresholdLogic};

use crate::helpers::{SLATE, engine, scoreboard, stats};

fn player_names(result: &ReconciledResult) -> BTreeSet<&str> {
    result
        .records
        .iter()
        .filter(|r| r.kind == EntityKind::Player)
        .map(|r| r.display_name.as_str())
        .collect()
}

fn teams(result: &ReconciledResult) -> usize {
    result
        .records
        .iter()
        .filter(|r| r.kind == EntityKind::Team)
        .count()
}

#[tokio::test]
async fn game_filter_keeps_one_game_and_its_losing_lines() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let result = engine
        .reconcile_box_scores_with(BoxScoreRequest::new(SLATE).with_game("0022300572"))
        .await
        .unwrap();

    assert_eq!(result.records.len(), 6);
    assert_eq!(result.provenance.len(), 6);
    let codes: BTreeSet<&str> = result
        .records
        .iter()
        .filter_map(|r| r.team_code.as_deref())
        .collect();
    assert_eq!(codes, BTreeSet::from(["GSW", "NYK"]));
    assert_eq!(result.superseded.len(), 6);
    assert!(!result.partial);
}

#[tokio::test]
async fn unknown_game_leaves_an_empty_partial_result() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let result = engine
        .reconcile_box_scores_with(BoxScoreRequest::new(SLATE).with_game("0029999999"))
        .await
        .unwrap();

    assert!(result.records.is_empty());
    assert!(result.superseded.is_empty());
    assert!(result.partial);
}

#[tokio::test]
async fn standout_rule_drops_quiet_lines() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let result = engine
        .reconcile_box_scores_with(
            BoxScoreRequest::new(SLATE).with_thresholds(StatThresholds::standout()),
        )
        .await
        .unwrap();

    // 18 points, 2 assists, 3 rebounds misses every default mark
    assert!(!player_names(&result).contains("Klay Thompson"));
    assert_eq!(player_names(&result).len(), 7);
    assert_eq!(teams(&result), 4);
    let kept: BTreeSet<&str> = result.records.iter().map(|r| r.entity_id.as_str()).collect();
    assert!(result
        .superseded
        .iter()
        .all(|r| kept.contains(r.entity_id.as_str())));
    assert_eq!(result.superseded.len(), 11);
}

#[tokio::test]
async fn explicit_threshold_replaces_the_defaults() {
    let engine = engine(&[stats()]).build().unwrap();
    let result = engine
        .reconcile_box_scores_with(
            BoxScoreRequest::new(SLATE).with_thresholds(StatThresholds::standout().points(30)),
        )
        .await
        .unwrap();

    assert_eq!(
        player_names(&result),
        BTreeSet::from(["Jalen Brunson", "Jayson Tatum", "Stephen Curry"])
    );
}

#[tokio::test]
async fn any_and_all_logic_combine_thresholds() {
    let engine = engine(&[stats()]).build().unwrap();
    let rule = StatThresholds::standout().points(25).rebounds(10);

    let any = engine
        .reconcile_box_scores_with(BoxScoreRequest::new(SLATE).with_thresholds(rule))
        .await
        .unwrap();
    assert_eq!(
        player_names(&any),
        BTreeSet::from([
            "Anthony Davis",
            "Jalen Brunson",
            "Jayson Tatum",
            "Julius Randle",
            "LeBron James",
            "Stephen Curry",
        ])
    );

    let all = engine
        .reconcile_box_scores_with(
            BoxScoreRequest::new(SLATE).with_thresholds(rule.logic(ThresholdLogic::All)),
        )
        .await
        .unwrap();
    assert_eq!(player_names(&all), BTreeSet::from(["Anthony Davis"]));
    assert_eq!(teams(&all), 4);
}
