use courtside_core::calendar::parse_date;
use courtside_core::{Capability, CourtsideError, FetchRequest, ReconciledResult};

use crate::Courtside;

impl Courtside {
    /// Reconcile the games and scores played on `date`.
    ///
    /// One team record per side of every game. The default policy consults
    /// fallbacks only when the primary fails, since a day without games is a
    /// valid empty answer.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `date` is not `YYYY-MM-DD`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "courtside::router::schedule", skip(self))
    )]
    pub async fn reconcile_schedule(&self, date: &str) -> Result<ReconciledResult, CourtsideError> {
        let date = parse_date(date)?;
        let candidates = self.ordered(Capability::Schedule);
        let (result, _) = self
            .reconcile(Capability::Schedule, FetchRequest::new(date), candidates, false)
            .await;
        Ok(result)
    }
}
