use std::sync::Arc;

use courtside::StatsSource;
use courtside_mock::MockSource;

/// Stats and scoreboard sources: fixtures when `COURTSIDE_EXAMPLES_USE_MOCK`
/// is set, the live providers otherwise.
///
/// # Panics
/// Panics if an HTTP client cannot be built.
#[must_use]
pub fn get_sources() -> Vec<Arc<dyn StatsSource>> {
    if std::env::var("COURTSIDE_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using mock sources for CI) ---");
        vec![
            Arc::new(MockSource::stats_style()),
            Arc::new(MockSource::scoreboard_style()),
        ]
    } else {
        vec![
            courtside_nba::NbaStatsSource::rate_limited()
                .expect("http client")
                .build(),
            courtside_espn::EspnSource::rate_limited()
                .expect("http client")
                .build(),
        ]
    }
}

/// Date used by the examples: the mock slate, or `COURTSIDE_DATE` when set.
#[must_use]
pub fn example_date() -> String {
    std::env::var("COURTSIDE_DATE").unwrap_or_else(|_| "2024-01-15".to_string())
}
