use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use courtside_core::{CourtsideError, SourceError};
use reqwest::header::{self, HeaderMap};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::payload::{ScoreboardPayload, SummaryPayload};

/// Site API abstraction (so we can inject canned payloads in tests).
#[async_trait]
pub trait EspnApi: Send + Sync {
    /// Fetch the scoreboard for an Eastern date.
    async fn scoreboard(&self, date: NaiveDate) -> Result<ScoreboardPayload, SourceError>;

    /// Fetch the game summary (including the box score) for one event.
    async fn summary(&self, event_id: &str) -> Result<SummaryPayload, SourceError>;
}

/// Production adapter talking to `site.api.espn.com` over HTTP.
#[derive(Clone)]
pub struct RealAdapter {
    http: Client,
    base: Url,
}

impl RealAdapter {
    /// Public endpoint root for NBA data.
    pub const DEFAULT_BASE: &'static str =
        "https://site.api.espn.com/apis/site/v2/sports/basketball/nba/";

    /// Transport timeout applied to every call.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Build a default client.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn try_new_default() -> Result<Self, CourtsideError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CourtsideError::invalid_config(format!("espn http client: {e}")))?;
        let base = Url::parse(Self::DEFAULT_BASE)
            .map_err(|e| CourtsideError::invalid_config(format!("espn base url: {e}")))?;
        Ok(Self { http, base })
    }

    /// Wrap an existing client and endpoint root.
    #[must_use]
    pub const fn new(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Point the adapter at another endpoint root (e.g. a local mock server).
    #[must_use]
    pub fn with_base_url(mut self, base: Url) -> Self {
        self.base = base;
        self
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, SourceError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| SourceError::unreachable(format!("bad endpoint {path}: {e}")))?;
        url.query_pairs_mut().extend_pairs(query);

        let resp = self.http.get(url).send().await.map_err(map_http_err)?;
        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited {
                retry_after_ms: retry_after_ms(resp.headers()),
            });
        }
        if !status.is_success() {
            return Err(SourceError::UpstreamError {
                code: status.as_u16(),
            });
        }
        resp.json::<T>().await.map_err(map_http_err)
    }
}

fn map_http_err(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else if e.is_decode() {
        SourceError::malformed(e.to_string())
    } else if let Some(status) = e.status() {
        SourceError::UpstreamError {
            code: status.as_u16(),
        }
    } else {
        SourceError::unreachable(e.to_string())
    }
}

fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1_000))
}

#[async_trait]
impl EspnApi for RealAdapter {
    async fn scoreboard(&self, date: NaiveDate) -> Result<ScoreboardPayload, SourceError> {
        let dates = date.format("%Y%m%d").to_string();
        self.get("scoreboard", &[("dates", dates.as_str())]).await
    }

    /// Falls back to the bare `boxscore` endpoint when `summary` answers with
    /// an error status; rate limits are returned as-is.
    async fn summary(&self, event_id: &str) -> Result<SummaryPayload, SourceError> {
        match self.get("summary", &[("event", event_id)]).await {
            Err(e @ SourceError::UpstreamError { .. }) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(event_id, error = %e, "espn: summary failed, trying boxscore");
                self.get("boxscore", &[("event", event_id)])
                    .await
                    .map_err(|_| e)
            }
            other => other,
        }
    }
}

impl dyn EspnApi {
    /// Build an `EspnApi` from closures.
    pub fn from_fns<FBoard, FSummary>(scoreboard: FBoard, summary: FSummary) -> Arc<dyn EspnApi>
    where
        FBoard: Fn(NaiveDate) -> Result<ScoreboardPayload, SourceError> + Send + Sync + 'static,
        FSummary: Fn(&str) -> Result<SummaryPayload, SourceError> + Send + Sync + 'static,
    {
        struct FnApi<A, B> {
            scoreboard: A,
            summary: B,
        }

        #[async_trait]
        impl<A, B> EspnApi for FnApi<A, B>
        where
            A: Fn(NaiveDate) -> Result<ScoreboardPayload, SourceError> + Send + Sync + 'static,
            B: Fn(&str) -> Result<SummaryPayload, SourceError> + Send + Sync + 'static,
        {
            async fn scoreboard(&self, date: NaiveDate) -> Result<ScoreboardPayload, SourceError> {
                (self.scoreboard)(date)
            }

            async fn summary(&self, event_id: &str) -> Result<SummaryPayload, SourceError> {
                (self.summary)(event_id)
            }
        }

        Arc::new(FnApi {
            scoreboard,
            summary,
        })
    }
}
