use std::time::Duration;

use async_trait::async_trait;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::aggregate::LookupOutcome;
use crate::api;
use crate::error::{Result, StatsError};
use crate::model::raw::{RawPlayerRecord, RawRank};
use crate::model::Username;
use crate::source::{self, PlayerDataSource};

/// Production player-data API.
pub const DEFAULT_BASE_URL: &str = "https://api.onthepixel.net";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const BASE_URL_ENV: &str = "ONTHEPIXEL_API_URL";
const TIMEOUT_ENV: &str = "ONTHEPIXEL_API_TIMEOUT_SECS";

/// Settings for [`StatsClient::with_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-request timeout. `None` disables it.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `ONTHEPIXEL_API_URL` and
    /// `ONTHEPIXEL_API_TIMEOUT_SECS` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.base_url(base_url);
        }
        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            match secs.trim().parse::<u64>() {
                Ok(0) => config.timeout = None,
                Ok(secs) => config.timeout = Some(Duration::from_secs(secs)),
                Err(err) => warn!(value = %secs, error = %err, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }
        config
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// The main entry point for talking to the OnThePixel.net player-data API.
///
/// `StatsClient` wraps a [`reqwest::Client`] and implements
/// [`PlayerDataSource`], so it can drive a
/// [`StatsLookupController`](crate::StatsLookupController) directly.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> onthepixel_stats::Result<()> {
/// use onthepixel_stats::{LookupOutcome, StatsClient};
///
/// let client = StatsClient::new();
/// if let LookupOutcome::Found(stats) = client.lookup("Notch").await? {
///     println!("{} is {}", stats.identity.username, stats.identity.rank.label);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    /// Create a new client against the production API with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new(), DEFAULT_BASE_URL)
    }

    /// Create a client from explicit settings.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(StatsError::ClientBuild)?;
        Ok(Self::with_client(http, config.base_url))
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw record for a player by username.
    #[instrument(skip(self))]
    pub async fn get_player(&self, username: &str) -> Result<Option<RawPlayerRecord>> {
        let username = Username::parse(username)?;
        api::player::get_player_record(&self.http, &self.base_url, &username).await
    }

    /// Fetch the raw rank string for a player by UUID.
    #[instrument(skip(self))]
    pub async fn get_rank(&self, uuid: Uuid) -> Result<Option<RawRank>> {
        api::rank::get_rank(&self.http, &self.base_url, uuid).await
    }

    /// Fetch a player and assemble their statistics in one go.
    #[instrument(skip(self))]
    pub async fn lookup(&self, username: &str) -> Result<LookupOutcome> {
        let username = Username::parse(username)?;
        source::lookup_player(self, &username).await
    }
}

impl Default for StatsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerDataSource for StatsClient {
    async fn fetch_player(&self, username: &Username) -> Result<Option<RawPlayerRecord>> {
        api::player::get_player_record(&self.http, &self.base_url, username).await
    }

    async fn fetch_rank(&self, uuid: Uuid) -> Result<Option<RawRank>> {
        api::rank::get_rank(&self.http, &self.base_url, uuid).await
    }
}
