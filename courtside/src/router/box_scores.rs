use std::collections::HashSet;

use courtside_core::calendar::parse_date;
use courtside_core::{
    Capability, CourtsideError, EntityKind, FetchRequest, ReconciledResult, StatThresholds,
    TeamDirectory,
};

use crate::Courtside;
use crate::phase::PhaseTracker;
use crate::router::util::retain_records;

/// Options for a box-score reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxScoreRequest {
    /// Game date, `YYYY-MM-DD` (US Eastern).
    pub date: String,
    /// Restrict to games involving this team; any provider spelling is accepted.
    pub team: Option<String>,
    /// Query only this source, bypassing priority and fallback.
    pub force_source: Option<String>,
    /// Restrict to one game. Any provider's game id is accepted.
    pub game_id: Option<String>,
    /// Keep only player lines meeting these thresholds; team lines are kept.
    pub thresholds: Option<StatThresholds>,
}

impl BoxScoreRequest {
    /// Unrestricted request for `date`.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// Restrict to one team.
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Query only the named source.
    #[must_use]
    pub fn force_source(mut self, source: impl Into<String>) -> Self {
        self.force_source = Some(source.into());
        self
    }

    /// Restrict to one game.
    #[must_use]
    pub fn with_game(mut self, game_id: impl Into<String>) -> Self {
        self.game_id = Some(game_id.into());
        self
    }

    /// Keep only player lines meeting `thresholds`.
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: StatThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }
}

/// Canonical codes of the teams playing `game_id`, looked up in the kept and
/// superseded records so either provider's id matches.
fn teams_in_game(result: &ReconciledResult, game_id: &str) -> HashSet<String> {
    result
        .records
        .iter()
        .chain(&result.superseded)
        .filter(|r| r.game.game_id.as_deref() == Some(game_id))
        .filter_map(|r| r.team_code.clone())
        .collect()
}

impl Courtside {
    /// Reconcile team and player box scores for `date` across sources.
    ///
    /// Behavior:
    /// - Sources are consulted per the box-score fallback policy (cross-check by default).
    /// - Upstream failures never abort; they surface as diagnostics in `errors`.
    /// - Returns within the configured budget window even when sources hang.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `date` is not `YYYY-MM-DD` or `team` names no
    /// known franchise.
    pub async fn reconcile_box_scores(
        &self,
        date: &str,
        team: Option<&str>,
    ) -> Result<ReconciledResult, CourtsideError> {
        let mut req = BoxScoreRequest::new(date);
        if let Some(t) = team {
            req = req.with_team(t);
        }
        self.reconcile_box_scores_with(req).await
    }

    /// Reconcile box scores with explicit request options.
    ///
    /// The game and threshold filters apply after the join, so a game id from
    /// any provider selects the joined lines of that game.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a malformed date, an unknown team, or a forced
    /// source that is not registered or does not serve box scores.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "courtside::router::box_scores",
            skip(self),
            fields(date = %req.date),
        )
    )]
    pub async fn reconcile_box_scores_with(
        &self,
        req: BoxScoreRequest,
    ) -> Result<ReconciledResult, CourtsideError> {
        let (result, _) = self.box_score_pass(&req, false).await?;
        Ok(result)
    }

    pub(crate) async fn box_score_pass(
        &self,
        req: &BoxScoreRequest,
        merge: bool,
    ) -> Result<(ReconciledResult, PhaseTracker), CourtsideError> {
        let date = parse_date(&req.date)?;
        let mut fetch = FetchRequest::new(date);
        if let Some(team) = req.team.as_deref() {
            let info = TeamDirectory::nba()
                .lookup(team)
                .ok_or_else(|| CourtsideError::InvalidArg(format!("unknown team '{team}'")))?;
            fetch = fetch.with_team(info.code);
        }
        let candidates = self.candidates(Capability::BoxScores, req.force_source.as_deref())?;
        let (mut result, pass) = self
            .reconcile(Capability::BoxScores, fetch, candidates, merge)
            .await;

        if let Some(game_id) = req.game_id.as_deref() {
            let teams = teams_in_game(&result, game_id);
            retain_records(&mut result, |r| {
                r.game.game_id.as_deref() == Some(game_id)
                    || r.team_code.as_ref().is_some_and(|t| teams.contains(t))
            });
        }
        if let Some(thresholds) = req.thresholds {
            retain_records(&mut result, |r| {
                r.kind != EntityKind::Player || thresholds.qualifies(&r.stats)
            });
        }
        Ok((result, pass))
    }
}
