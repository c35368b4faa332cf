use courtside::{PlayerStatus, RosterSnapshot, merge_roster};
use rust_decimal::Decimal;

use crate::helpers::{SLATE, engine, scoreboard, slot, stats};

fn roster() -> RosterSnapshot {
    let mut lebron = slot("t1", "LeBron James", "LAL");
    lebron.avg_points = Some(Decimal::from(40));
    let mut embiid = slot("t1", "Joel Embiid", "PHI");
    embiid.injury_flag = true;
    embiid.injury_status = Some("Out".to_string());
    let mut curry = slot("t2", "Stephen Curry", "GS");
    curry.avg_points = Some(Decimal::from(100));
    let durant = slot("t2", "Kevin Durant", "PHX");
    RosterSnapshot::new(vec![lebron, embiid, curry, durant])
}

#[tokio::test]
async fn roster_slots_get_status_and_points() {
    let engine = engine(&[stats()]).build().unwrap();
    let entries = engine.merge_fantasy(SLATE, &roster()).await.unwrap();

    assert_eq!(entries.len(), 4);
    let [lebron, embiid, curry, durant] = entries.as_slice() else {
        panic!("expected four entries");
    };

    // 25 + 8×1.2 + 9×1.5 + 3 + 3 - 3
    assert_eq!(lebron.status, PlayerStatus::Active);
    assert_eq!(lebron.estimated_fantasy_points, Decimal::new(511, 1));
    assert!(!lebron.underperforming);
    assert!(lebron.record.is_some());

    assert_eq!(embiid.status, PlayerStatus::Out);
    assert!(embiid.injured);
    assert_eq!(embiid.estimated_fantasy_points, Decimal::ZERO);

    assert_eq!(curry.status, PlayerStatus::Active);
    assert_eq!(curry.estimated_fantasy_points, Decimal::new(458, 1));
    assert!(curry.underperforming);

    assert_eq!(durant.status, PlayerStatus::DidNotPlay);
    assert_eq!(durant.status_text, "Did not play");
    assert!(!durant.injured);
}

#[tokio::test]
async fn daily_report_ranks_and_totals() {
    let engine = engine(&[stats(), scoreboard()]).build().unwrap();
    let report = engine.fantasy_report(SLATE, &roster()).await.unwrap();

    let top: Vec<&str> = report
        .top_performers
        .iter()
        .map(|e| e.roster_entry.player_alias.as_str())
        .collect();
    assert_eq!(top, ["LeBron James", "Stephen Curry"]);
    assert_eq!(report.underperformers.len(), 1);
    assert_eq!(report.underperformers[0].roster_entry.player_alias, "Stephen Curry");
    assert_eq!(report.injured.len(), 1);
    assert_eq!(report.injured[0].roster_entry.player_alias, "Joel Embiid");

    let totals: Vec<(&str, Decimal, usize)> = report
        .team_totals
        .iter()
        .map(|t| (t.team_id.as_str(), t.total_points, t.active_players))
        .collect();
    assert_eq!(
        totals,
        [
            ("t1", Decimal::new(511, 1), 1),
            ("t2", Decimal::new(458, 1), 1)
        ]
    );
    assert!(!report.partial);
}

#[tokio::test]
async fn top_performer_list_is_capped() {
    let engine = engine(&[stats()]).top_performers(1).build().unwrap();
    let report = engine.fantasy_report(SLATE, &roster()).await.unwrap();
    assert_eq!(report.top_performers.len(), 1);
    assert_eq!(report.top_performers[0].roster_entry.player_alias, "LeBron James");
}

#[tokio::test]
async fn a_stored_result_can_be_merged_again() {
    let engine = engine(&[stats()]).build().unwrap();
    let result = engine.reconcile_box_scores(SLATE, None).await.unwrap();

    let (entries, errors) = merge_roster(&result, &roster(), engine.config());
    assert!(errors.is_empty());
    assert_eq!(
        entries
            .iter()
            .filter(|e| e.status == PlayerStatus::Active)
            .count(),
        2
    );
}
