//! Built-in directory of the 30 league franchises and the spellings each
//! provider uses for them.

/// One franchise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamInfo {
    /// League stats abbreviation (e.g. `"GSW"`).
    pub code: &'static str,
    /// City or region as it appears in the full name.
    pub city: &'static str,
    /// Nickname (e.g. `"Warriors"`).
    pub nickname: &'static str,
    /// Other abbreviations seen upstream (e.g. ESPN's `"GS"`).
    pub alt_codes: &'static [&'static str],
}

impl TeamInfo {
    /// `"{city} {nickname}"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.city, self.nickname)
    }

    /// Every spelling that names this team: code, alternate codes, full name and nickname.
    #[must_use]
    pub fn spellings(&self) -> Vec<String> {
        let mut out = vec![self.code.to_string()];
        out.extend(self.alt_codes.iter().map(|c| (*c).to_string()));
        out.push(self.full_name());
        out.push(self.nickname.to_string());
        out
    }

    fn answers_to(&self, raw: &str) -> bool {
        self.spellings().iter().any(|s| s.eq_ignore_ascii_case(raw))
    }
}

const fn team(
    code: &'static str,
    city: &'static str,
    nickname: &'static str,
    alt_codes: &'static [&'static str],
) -> TeamInfo {
    TeamInfo {
        code,
        city,
        nickname,
        alt_codes,
    }
}

const NBA_TEAMS: [TeamInfo; 30] = [
    team("ATL", "Atlanta", "Hawks", &[]),
    team("BOS", "Boston", "Celtics", &[]),
    team("BKN", "Brooklyn", "Nets", &["BRK", "NJN"]),
    team("CHA", "Charlotte", "Hornets", &["CHO"]),
    team("CHI", "Chicago", "Bulls", &[]),
    team("CLE", "Cleveland", "Cavaliers", &[]),
    team("DAL", "Dallas", "Mavericks", &[]),
    team("DEN", "Denver", "Nuggets", &[]),
    team("DET", "Detroit", "Pistons", &[]),
    team("GSW", "Golden State", "Warriors", &["GS"]),
    team("HOU", "Houston", "Rockets", &[]),
    team("IND", "Indiana", "Pacers", &[]),
    team("LAC", "LA", "Clippers", &["Los Angeles Clippers"]),
    team("LAL", "Los Angeles", "Lakers", &[]),
    team("MEM", "Memphis", "Grizzlies", &[]),
    team("MIA", "Miami", "Heat", &[]),
    team("MIL", "Milwaukee", "Bucks", &[]),
    team("MIN", "Minnesota", "Timberwolves", &[]),
    team("NOP", "New Orleans", "Pelicans", &["NO", "NOR"]),
    team("NYK", "New York", "Knicks", &["NY"]),
    team("OKC", "Oklahoma City", "Thunder", &[]),
    team("ORL", "Orlando", "Magic", &[]),
    team("PHI", "Philadelphia", "76ers", &[]),
    team("PHX", "Phoenix", "Suns", &["PHO"]),
    team("POR", "Portland", "Trail Blazers", &[]),
    team("SAC", "Sacramento", "Kings", &[]),
    team("SAS", "San Antonio", "Spurs", &["SA"]),
    team("TOR", "Toronto", "Raptors", &[]),
    team("UTA", "Utah", "Jazz", &["UTAH"]),
    team("WAS", "Washington", "Wizards", &["WSH"]),
];

/// Lookup table of franchises.
#[derive(Debug, Clone, Copy)]
pub struct TeamDirectory {
    teams: &'static [TeamInfo],
}

impl Default for TeamDirectory {
    fn default() -> Self {
        Self::nba()
    }
}

impl TeamDirectory {
    /// The current 30-team league.
    #[must_use]
    pub const fn nba() -> Self {
        Self { teams: &NBA_TEAMS }
    }

    /// All franchises.
    #[must_use]
    pub const fn teams(&self) -> &'static [TeamInfo] {
        self.teams
    }

    /// Find a team by any of its spellings, ignoring ASCII case.
    #[must_use]
    pub fn lookup(&self, raw: &str) -> Option<&'static TeamInfo> {
        let raw = raw.trim();
        self.teams.iter().find(|t| t.answers_to(raw))
    }
}
