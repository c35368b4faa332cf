use courtside::{BoxScoreRequest, CourtsideError, SourceUsed};

use crate::helpers::{SLATE, engine, scoreboard, stats};

#[tokio::test]
async fn forced_source_is_the_only_one_consulted() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let result = engine
        .reconcile_box_scores_with(BoxScoreRequest::new(SLATE).force_source("mock-scoreboard"))
        .await
        .unwrap();

    assert_eq!(result.source_used, SourceUsed::Primary);
    assert_eq!(result.records.len(), 12);
    assert!(result.records.iter().all(|r| r.source == "mock-scoreboard"));
    assert!(result.superseded.is_empty());
    // a lone source keeps its own keys
    assert!(result.records.iter().any(|r| r.entity_id == "GS"));
}

#[tokio::test]
async fn forced_source_combines_with_a_team_filter() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let result = engine
        .reconcile_box_scores_with(
            BoxScoreRequest::new(SLATE)
                .with_team("NYK")
                .force_source("mock-scoreboard"),
        )
        .await
        .unwrap();

    assert_eq!(result.records.len(), 6);
    assert!(result.records.iter().any(|r| r.display_name == "J. Brunson"));
}

#[tokio::test]
async fn unknown_forced_source_is_an_invalid_argument() {
    let engine = engine(&[stats()]).build().unwrap();
    let err = engine
        .reconcile_box_scores_with(BoxScoreRequest::new(SLATE).force_source("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, CourtsideError::InvalidArg(ref m) if m.contains("nope")));
}
