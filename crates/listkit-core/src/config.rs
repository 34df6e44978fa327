use std::env;
use std::sync::Arc;

use tracing::debug;

use crate::api::HttpRecordsApi;
use crate::cache::{ContactCache, MemoryContactCache};
use crate::composition::{Collaborators, UserSession};
use crate::fixtures::{mock_http_client, MOCK_BASE_URL};
use crate::http_client::{HttpAuth, HttpClient, ReqwestHttpClient};
use crate::ConfigError;

const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Builder assembling [`Collaborators`] from explicit settings and the
/// environment.
///
/// # Environment Variables
///
/// | Variable | Meaning |
/// |----------|---------|
/// | `LISTKIT_API_BASE_URL` | Base URL of the records API |
/// | `LISTKIT_API_TOKEN` | Bearer token sent with API requests |
/// | `LISTKIT_PREMIUM` | `true`/`false`: user entitled to cached contacts |
/// | `LISTKIT_TIMEOUT_MS` | Per-request timeout in milliseconds |
///
/// # Example
///
/// ```rust,ignore
/// use listkit_core::CollaboratorsBuilder;
///
/// let collaborators = CollaboratorsBuilder::new()
///     .with_env()?
///     .with_premium(true)
///     .build()?;
/// ```
#[derive(Default)]
pub struct CollaboratorsBuilder {
    use_mock: bool,
    base_url: Option<String>,
    api_token: Option<String>,
    premium: bool,
    timeout_ms: Option<u64>,
    cache: Option<Arc<dyn ContactCache>>,
}

impl CollaboratorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve every API from built-in fixtures instead of the network.
    pub fn with_mock_mode(mut self) -> Self {
        self.use_mock = true;
        self
    }

    /// Read settings from `LISTKIT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable values.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_lookup(|name| env::var(name).ok())
    }

    /// Same as [`with_env`](Self::with_env) with a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable values.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("LISTKIT_API_BASE_URL").filter(|url| !url.trim().is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(token) = lookup("LISTKIT_API_TOKEN").filter(|token| !token.is_empty()) {
            self.api_token = Some(token);
        }
        if let Some(value) = lookup("LISTKIT_PREMIUM") {
            self.premium = parse_flag("LISTKIT_PREMIUM", &value)?;
        }
        if let Some(value) = lookup("LISTKIT_TIMEOUT_MS") {
            let timeout_ms = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|timeout_ms| *timeout_ms > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "LISTKIT_TIMEOUT_MS",
                    value,
                })?;
            self.timeout_ms = Some(timeout_ms);
        }
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Use `cache` instead of the default in-memory contact cache.
    pub fn with_cache(mut self, cache: Arc<dyn ContactCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseUrl`] outside mock mode when no base
    /// URL was configured.
    pub fn build(self) -> Result<Collaborators, ConfigError> {
        let (http_client, base_url) = if self.use_mock {
            let client: Arc<dyn HttpClient> = Arc::new(mock_http_client(MOCK_BASE_URL));
            (client, String::from(MOCK_BASE_URL))
        } else {
            let base_url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
            let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
            (client, base_url)
        };
        debug!(%base_url, mock = self.use_mock, premium = self.premium, "building collaborators");

        let auth = self
            .api_token
            .map_or(HttpAuth::None, HttpAuth::BearerToken);
        let api = Arc::new(
            HttpRecordsApi::new(http_client, base_url)
                .with_auth(auth)
                .with_timeout_ms(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)),
        );
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(MemoryContactCache::with_default_ttl()));

        Ok(Collaborators {
            contacts: api.clone(),
            instruments: api.clone(),
            transfers: api,
            cache,
            entitlement: Arc::new(UserSession::new(self.premium)),
        })
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_owned(),
        }),
    }
}
