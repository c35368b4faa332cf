use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use courtside_core::{CourtsideError, SourceError};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::payload::StatsPayload;

/// Stats API abstraction (so we can inject canned payloads in tests).
#[async_trait]
pub trait NbaApi: Send + Sync {
    /// Fetch the scoreboard (game headers and line scores) for an Eastern date.
    async fn scoreboard(&self, date: NaiveDate) -> Result<StatsPayload, SourceError>;

    /// Fetch the traditional box score for one game.
    async fn box_score(&self, game_id: &str) -> Result<StatsPayload, SourceError>;
}

/// Production adapter talking to `stats.nba.com` over HTTP.
#[derive(Clone)]
pub struct RealAdapter {
    http: Client,
    base: Url,
}

impl RealAdapter {
    /// Public endpoint root.
    pub const DEFAULT_BASE: &'static str = "https://stats.nba.com/stats/";

    /// Transport timeout applied to every call.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Build a client with the browser-like headers the endpoint insists on.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn try_new_default() -> Result<Self, CourtsideError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://www.nba.com"));
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
            ),
        );
        let http = Client::builder()
            .default_headers(headers)
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CourtsideError::invalid_config(format!("nba-stats http client: {e}")))?;
        let base = Url::parse(Self::DEFAULT_BASE)
            .map_err(|e| CourtsideError::invalid_config(format!("nba-stats base url: {e}")))?;
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

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        self.base
            .join(path)
            .map_err(|e| SourceError::unreachable(format!("bad endpoint {path}: {e}")))
    }

    async fn get(&self, url: Url) -> Result<StatsPayload, SourceError> {
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
        resp.json::<StatsPayload>().await.map_err(map_http_err)
    }
}

/// Map a transport failure onto the normalized source error.
pub(crate) fn map_http_err(e: reqwest::Error) -> SourceError {
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

/// `Retry-After` in milliseconds; only the delta-seconds form is honored.
pub(crate) fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
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
impl NbaApi for RealAdapter {
    async fn scoreboard(&self, date: NaiveDate) -> Result<StatsPayload, SourceError> {
        let mut url = self.endpoint("scoreboardv2")?;
        url.query_pairs_mut()
            .append_pair("GameDate", &date.format("%Y-%m-%d").to_string())
            .append_pair("LeagueID", "00")
            .append_pair("DayOffset", "0");
        self.get(url).await
    }

    async fn box_score(&self, game_id: &str) -> Result<StatsPayload, SourceError> {
        let mut url = self.endpoint("boxscoretraditionalv2")?;
        url.query_pairs_mut()
            .append_pair("GameID", game_id)
            .append_pair("StartPeriod", "0")
            .append_pair("EndPeriod", "10")
            .append_pair("RangeType", "0")
            .append_pair("StartRange", "0")
            .append_pair("EndRange", "0");
        self.get(url).await
    }
}

impl dyn NbaApi {
    /// Build an `NbaApi` from closures.
    pub fn from_fns<FBoard, FBox>(scoreboard: FBoard, box_score: FBox) -> Arc<dyn NbaApi>
    where
        FBoard: Fn(NaiveDate) -> Result<StatsPayload, SourceError> + Send + Sync + 'static,
        FBox: Fn(&str) -> Result<StatsPayload, SourceError> + Send + Sync + 'static,
    {
        struct FnApi<A, B> {
            scoreboard: A,
            box_score: B,
        }

        #[async_trait]
        impl<A, B> NbaApi for FnApi<A, B>
        where
            A: Fn(NaiveDate) -> Result<StatsPayload, SourceError> + Send + Sync + 'static,
            B: Fn(&str) -> Result<StatsPayload, SourceError> + Send + Sync + 'static,
        {
            async fn scoreboard(&self, date: NaiveDate) -> Result<StatsPayload, SourceError> {
                (self.scoreboard)(date)
            }

            async fn box_score(&self, game_id: &str) -> Result<StatsPayload, SourceError> {
                (self.box_score)(game_id)
            }
        }

        Arc::new(FnApi {
            scoreboard,
            box_score,
        })
    }
}
