mod common;

use courtside::{Courtside, FantasyRosterEntry, RosterSnapshot};
use common::{example_date, get_sources};
use rust_decimal::Decimal;

fn slot(team: &str, alias: &str, pro_team: &str, avg: i64) -> FantasyRosterEntry {
    FantasyRosterEntry {
        team_id: team.to_string(),
        team_name: Some(format!("Team {team}")),
        player_alias: alias.to_string(),
        position_slot: "UTIL".to_string(),
        injury_flag: false,
        injury_status: None,
        pro_team: Some(pro_team.to_string()),
        avg_points: Some(Decimal::from(avg)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = get_sources()
        .into_iter()
        .fold(Courtside::builder(), courtside::CourtsideBuilder::with_source)
        .build()?;

    let mut injured = slot("2", "Joel Embiid", "PHI", 55);
    injured.injury_flag = true;
    injured.injury_status = Some("Out".to_string());
    let roster = RosterSnapshot::new(vec![
        slot("1", "LeBron James", "LAL", 48),
        slot("1", "J. Tatum", "BOS", 50),
        slot("2", "Stephen Curry", "GS", 100),
        injured,
    ]);

    let report = engine.fantasy_report(&example_date(), &roster).await?;
    for e in &report.top_performers {
        println!(
            "{:<16} {:>6}",
            e.roster_entry.player_alias, e.estimated_fantasy_points
        );
    }
    for e in &report.underperformers {
        println!("below average: {}", e.roster_entry.player_alias);
    }
    for t in &report.team_totals {
        println!("{} -> {} ({} active)", t.team_id, t.total_points, t.active_players);
    }
    Ok(())
}
