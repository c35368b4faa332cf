mod common;

use std::time::Duration;

use chrono::NaiveDate;
use courtside_core::{
    Capability, Decimal, EntityKind, FetchRequest, HomeAway, SourceError, StatKind, StatsSource,
};
use courtside_espn::EspnSource;
use courtside_espn::adapter::EspnApi;
use courtside_espn::payload::{ScoreboardPayload, SummaryPayload};

use common::{BOS_LAL, NEXT_DAY, NY_GS};

fn slate() -> FetchRequest {
    FetchRequest::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
}

fn happy_source() -> EspnSource {
    EspnSource::from_api(<dyn EspnApi>::from_fns(
        |_| Ok(common::scoreboard()),
        |id| Ok(common::summary(id)),
    ))
}

#[tokio::test(start_paused = true)]
async fn schedule_keeps_only_the_eastern_day() {
    let recs = happy_source()
        .as_schedule_provider()
        .unwrap()
        .schedule(&slate())
        .await
        .unwrap();
    assert_eq!(recs.len(), 4);
    assert!(recs.iter().all(|r| r.game.game_id.as_deref() != Some(NEXT_DAY)));

    let gs = recs.iter().find(|r| r.team_code.as_deref() == Some("GS")).unwrap();
    assert_eq!(gs.display_name, "Golden State Warriors");
    assert_eq!(gs.stat(StatKind::Points), Some(Decimal::from(110)));
    assert_eq!(gs.game.home_away, Some(HomeAway::Away));
    assert_eq!(gs.game.opponent.as_deref(), Some("NY"));
    assert_eq!(gs.game.status.as_deref(), Some("Final"));
}

#[tokio::test(start_paused = true)]
async fn box_scores_skip_bench_players() {
    let recs = happy_source()
        .as_box_score_provider()
        .unwrap()
        .box_scores(&slate())
        .await
        .unwrap();
    assert_eq!(recs.iter().filter(|r| r.kind == EntityKind::Team).count(), 4);
    assert_eq!(recs.iter().filter(|r| r.kind == EntityKind::Player).count(), 4);
    assert!(!recs.iter().any(|r| r.display_name == "Bronny James"));

    let lebron = recs.iter().find(|r| r.display_name == "LeBron James").unwrap();
    assert_eq!(lebron.source, "espn");
    assert_eq!(lebron.entity_id, "1966");
    assert_eq!(lebron.stat(StatKind::Rebounds), Some(Decimal::from(9)));
    assert_eq!(lebron.stat(StatKind::FieldGoalsAttempted), Some(Decimal::from(20)));
    assert_eq!(lebron.stat(StatKind::PlusMinus), Some(Decimal::from(-6)));
    assert_eq!(lebron.game.game_id.as_deref(), Some(BOS_LAL));
    assert_eq!(lebron.game.opponent.as_deref(), Some("BOS"));
}

#[tokio::test(start_paused = true)]
async fn team_filter_uses_provider_codes() {
    let recs = happy_source()
        .as_box_score_provider()
        .unwrap()
        .box_scores(&slate().with_team("GS"))
        .await
        .unwrap();
    assert!(recs.iter().all(|r| r.game.game_id.as_deref() == Some(NY_GS)));
}

#[tokio::test(start_paused = true)]
async fn summaries_are_paced() {
    let start = tokio::time::Instant::now();
    happy_source()
        .as_box_score_provider()
        .unwrap()
        .box_scores(&slate())
        .await
        .unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn game_without_box_score_is_skipped() {
    let src = EspnSource::from_api(<dyn EspnApi>::from_fns(
        |_| Ok(common::scoreboard()),
        |id| {
            if id == NY_GS {
                Ok(SummaryPayload::default())
            } else {
                Ok(common::summary(id))
            }
        },
    ));
    let recs = src
        .as_box_score_provider()
        .unwrap()
        .box_scores(&slate())
        .await
        .unwrap();
    assert!(recs.iter().all(|r| r.game.game_id.as_deref() == Some(BOS_LAL)));
    assert_eq!(recs.iter().filter(|r| r.kind == EntityKind::Team).count(), 2);
}

#[tokio::test(start_paused = true)]
async fn rate_limit_keeps_games_already_fetched() {
    let src = EspnSource::from_api(<dyn EspnApi>::from_fns(
        |_| Ok(common::scoreboard()),
        |id| {
            if id == NY_GS {
                Err(SourceError::RateLimited {
                    retry_after_ms: None,
                })
            } else {
                Ok(common::summary(id))
            }
        },
    ));
    let recs = src
        .as_box_score_provider()
        .unwrap()
        .box_scores(&slate())
        .await
        .unwrap();
    assert!(!recs.is_empty());
    assert!(recs.iter().all(|r| r.game.game_id.as_deref() == Some(BOS_LAL)));
}

#[tokio::test(start_paused = true)]
async fn rate_limit_on_the_first_game_is_reported() {
    let src = EspnSource::from_api(<dyn EspnApi>::from_fns(
        |_| Ok(common::scoreboard()),
        |_| {
            Err(SourceError::RateLimited {
                retry_after_ms: Some(1_000),
            })
        },
    ));
    let err = src
        .as_box_score_provider()
        .unwrap()
        .box_scores(&slate())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SourceError::RateLimited {
            retry_after_ms: Some(1_000)
        }
    );
}

#[tokio::test(start_paused = true)]
async fn no_events_is_empty_but_valid() {
    let src = EspnSource::from_api(<dyn EspnApi>::from_fns(
        |_| Ok(ScoreboardPayload::default()),
        |id| Ok(common::summary(id)),
    ));
    let err = src
        .as_box_score_provider()
        .unwrap()
        .box_scores(&slate())
        .await
        .unwrap_err();
    assert_eq!(err, SourceError::EmptyButValid);
}

#[tokio::test(start_paused = true)]
async fn scoreboard_failure_propagates() {
    let src = EspnSource::from_api(<dyn EspnApi>::from_fns(
        |_| Err(SourceError::Timeout),
        |id| Ok(common::summary(id)),
    ));
    let err = src
        .as_schedule_provider()
        .unwrap()
        .schedule(&slate())
        .await
        .unwrap_err();
    assert_eq!(err, SourceError::Timeout);
}

#[test]
fn declared_cost() {
    let src = happy_source();
    let cost = src.cost(Capability::BoxScores, &slate());
    assert_eq!(cost.expected_items, EspnSource::DEFAULT_MAX_GAMES);
    assert_eq!(cost.total(), Duration::from_millis(200 + 200 * 15));
    assert_eq!(src.key(), EspnSource::KEY);
}
