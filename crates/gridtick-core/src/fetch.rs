//! Blocking retrieval with bounded retries and exponential backoff.
//!
//! Fetches are low-frequency (one request per source per day), so the retry
//! loop deliberately blocks the calling thread between attempts; no attempt
//! ever runs concurrently with another for the same call.

use std::fmt::{Display, Formatter};
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// Configuration for the retrieval fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Retries beyond the first attempt. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Backoff before the first retry.
    pub initial_backoff: Duration,
    /// Cap applied to the exponential backoff.
    pub max_backoff: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// User-Agent header attached to every request.
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
            user_agent: String::from("gridtick/0.1.0"),
        }
    }
}

impl FetcherConfig {
    /// Backoff before attempt `attempt` (1-based; attempt 0 incurs no
    /// delay): `min(initial_backoff * 2^(attempt-1), max_backoff)`.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let scale = 2_f64.powi(attempt.saturating_sub(1) as i32);
        let seconds = self.initial_backoff.as_secs_f64() * scale;
        Duration::from_secs_f64(seconds.min(self.max_backoff.as_secs_f64()))
    }
}

/// Raw response handed back by a transport.
///
/// The body stream is owned by whoever holds the response and is closed on
/// drop.
pub struct TransportResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl TransportResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

/// Blocking transport contract behind the fetcher. Tests substitute mocks;
/// production uses [`ReqwestTransport`].
pub trait HttpTransport: Send + Sync {
    fn get(
        &self,
        url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by reqwest's blocking client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .timeout(timeout)
            .send()
            .map_err(|error| {
                if error.is_timeout() {
                    TransportError::new(format!("request timeout: {error}"))
                } else if error.is_connect() {
                    TransportError::new(format!("connection failed: {error}"))
                } else {
                    TransportError::new(format!("request failed: {error}"))
                }
            })?;

        Ok(TransportResponse {
            status: response.status().as_u16(),
            body: Box::new(response),
        })
    }
}

/// Last underlying failure recorded by the retry loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

/// Terminal fetch error, surfaced only once the retry budget is spent.
/// Intermediate failures are logged, not returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("fetch failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: FetchFailure },
}

/// Performs HTTP GETs with bounded retries and exponential backoff.
pub struct Fetcher {
    config: FetcherConfig,
    transport: Arc<dyn HttpTransport>,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: FetcherConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch `url`, returning the body stream of the first 2xx response.
    /// The caller owns the stream and closes it by dropping it.
    pub fn fetch(&self, url: &str) -> Result<Box<dyn Read + Send>, FetchError> {
        let total = self.config.max_retries + 1;
        let mut last = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                std::thread::sleep(self.config.backoff_for_attempt(attempt));
            }

            match self
                .transport
                .get(url, &self.config.user_agent, self.config.request_timeout)
            {
                Ok(response) if response.is_success() => {
                    debug!(url, attempt = attempt + 1, "fetch succeeded");
                    return Ok(response.body);
                }
                Ok(response) => {
                    warn!(
                        url,
                        status = response.status,
                        attempt = attempt + 1,
                        total,
                        "fetch attempt returned non-2xx status"
                    );
                    last = Some(FetchFailure::Status {
                        status: response.status,
                        url: url.to_owned(),
                    });
                    // The non-2xx body is dropped here, before any retry.
                }
                Err(error) => {
                    warn!(
                        url,
                        attempt = attempt + 1,
                        total,
                        error = %error,
                        "fetch attempt failed"
                    );
                    last = Some(FetchFailure::Transport(error.message().to_owned()));
                }
            }
        }

        Err(FetchError::Exhausted {
            attempts: total,
            last: last
                .unwrap_or_else(|| FetchFailure::Transport(String::from("no attempt was made"))),
        })
    }
}
