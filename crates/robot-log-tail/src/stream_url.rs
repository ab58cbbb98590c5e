//! Tail stream URL construction
//!
//! The API base (e.g. `/api`) is resolved against the robot origin the same
//! way a browser resolves it against the page origin, then the tail resource
//! is appended and the scheme switched to its WebSocket counterpart.

use crate::error::TailError;
use url::Url;

/// Path segment of the tail-streaming resource below the API base
pub const TAIL_PATH: &str = "logs/tail";

/// Parameters of one tail request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TailRequest {
    /// Label selector (must be non-empty to connect)
    pub selector: String,
    /// Maximum number of historic entries the backend replays
    pub limit: Option<u64>,
    /// Opaque duration the backend waits before sending (e.g. `1s`)
    pub delay_for: Option<String>,
}

impl TailRequest {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            limit: None,
            delay_for: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_delay_for(mut self, delay_for: Option<String>) -> Self {
        self.delay_for = delay_for;
        self
    }

    /// Build a request from raw form input, sanitizing limit and delay
    pub fn from_input(selector: impl Into<String>, limit: &str, delay_for: &str) -> Self {
        Self::new(selector)
            .with_limit(parse_limit(limit))
            .with_delay_for(normalize_delay(delay_for))
    }
}

/// Parse the result limit field
///
/// Non-numeric, non-finite and non-positive input is treated as unset.
/// Fractional values are floored; a floor below 1 is unset as well.
pub fn parse_limit(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed: f64 = trimmed.parse().ok()?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return None;
    }

    let floored = parsed.floor();
    if floored < 1.0 {
        return None;
    }

    Some(floored.min(u64::MAX as f64) as u64)
}

/// Trim the delay field; blank input is unset
pub fn normalize_delay(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// API base resolved against the robot origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEndpoint {
    base: Url,
}

impl StreamEndpoint {
    /// Use an already absolute API base URL
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Resolve `api_base` (relative path or absolute URL) against `origin`
    pub fn resolve(origin: &str, api_base: &str) -> Result<Self, TailError> {
        let origin_url = Url::parse(origin).map_err(|e| TailError::InvalidEndpoint {
            endpoint: origin.to_string(),
            reason: e.to_string(),
        })?;

        let base = origin_url
            .join(api_base)
            .map_err(|e| TailError::InvalidEndpoint {
                endpoint: api_base.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { base })
    }

    /// The resolved HTTP(S) API base
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build the tail stream URL for a request
    ///
    /// Trailing separators of the base path are collapsed before `/logs/tail`
    /// is appended, any query already on the base is dropped, and the scheme
    /// is mapped `http`→`ws` / `https`→`wss`.
    pub fn tail_url(&self, request: &TailRequest) -> Result<Url, TailError> {
        let stream_scheme = match self.base.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(TailError::UnsupportedScheme(other.to_string())),
        };

        let mut url = self.base.clone();
        let path = format!("{}/{}", url.path().trim_end_matches('/'), TAIL_PATH);
        url.set_path(&path);
        url.set_query(None);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("query", &request.selector);
            if let Some(limit) = request.limit {
                query.append_pair("limit", &limit.to_string());
            }
            if let Some(delay_for) = request.delay_for.as_deref() {
                query.append_pair("delay_for", delay_for);
            }
        }

        url.set_scheme(stream_scheme)
            .map_err(|()| TailError::UnsupportedScheme(self.base.scheme().to_string()))?;

        Ok(url)
    }
}
