use async_trait::async_trait;
use depot_core::models::IdentitySnapshot;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Identity lookup errors. `Unavailable` is transient (retries exhausted);
/// `NotFound` is definitive and never retried.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("identity service unavailable: {0}")]
    Unavailable(String),

    #[error("identity not found: {0}")]
    NotFound(Uuid),
}

/// Per-attempt failure classification used by the retry loop.
#[derive(Debug)]
enum LookupFailure {
    /// Transport error, timeout, or 5xx - worth another attempt.
    Transient(String),
    /// Definitive answer or non-retryable response - surface immediately.
    Definitive(IdentityError),
}

/// Identity lookup capability, substitutable with a test double.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn lookup(&self, user_id: Uuid) -> Result<IdentitySnapshot, IdentityError>;
}

/// Configuration for the HTTP identity client
#[derive(Clone, Debug)]
pub struct IdentityClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for IdentityClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            timeout: Duration::from_secs(3),
            max_attempts: 3,
            retry_delay: Duration::from_millis(200),
        }
    }
}

/// HTTP client for the identity service.
#[derive(Clone)]
pub struct HttpIdentityClient {
    client: reqwest::Client,
    config: IdentityClientConfig,
}

impl HttpIdentityClient {
    pub fn new(config: IdentityClientConfig) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self { client, config })
    }

    fn user_url(&self, user_id: Uuid) -> String {
        format!("{}/users/{}", self.config.base_url.trim_end_matches('/'), user_id)
    }

    async fn fetch_once(&self, user_id: Uuid) -> Result<IdentitySnapshot, LookupFailure> {
        let response = self
            .client
            .get(self.user_url(user_id))
            .send()
            .await
            .map_err(|e| LookupFailure::Transient(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupFailure::Definitive(IdentityError::NotFound(user_id)));
        }
        if status.is_server_error() {
            return Err(LookupFailure::Transient(format!(
                "identity service returned {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(LookupFailure::Definitive(IdentityError::Unavailable(
                format!("identity service returned {}", status),
            )));
        }

        response
            .json::<IdentitySnapshot>()
            .await
            .map_err(|e| {
                LookupFailure::Definitive(IdentityError::Unavailable(format!(
                    "malformed identity response: {}",
                    e
                )))
            })
    }
}

#[async_trait]
impl IdentityLookup for HttpIdentityClient {
    async fn lookup(&self, user_id: Uuid) -> Result<IdentitySnapshot, IdentityError> {
        lookup_with_retry(
            self.config.max_attempts,
            self.config.retry_delay,
            user_id,
            || self.fetch_once(user_id),
        )
        .await
    }
}

/// Retry a lookup attempt up to `max_attempts` times with a fixed delay.
///
/// Transient failures are retried with the same request; definitive answers
/// (not-found, malformed response) surface immediately. The ceiling and the
/// constant delay keep load amplification bounded.
async fn lookup_with_retry<F, Fut>(
    max_attempts: u32,
    retry_delay: Duration,
    user_id: Uuid,
    mut attempt: F,
) -> Result<IdentitySnapshot, IdentityError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<IdentitySnapshot, LookupFailure>>,
{
    let mut last_error = String::from("no attempts made");

    for n in 1..=max_attempts.max(1) {
        match attempt().await {
            Ok(snapshot) => {
                if n > 1 {
                    tracing::info!(user_id = %user_id, attempt = n, "Identity lookup recovered");
                }
                return Ok(snapshot);
            }
            Err(LookupFailure::Definitive(err)) => return Err(err),
            Err(LookupFailure::Transient(msg)) => {
                tracing::warn!(
                    user_id = %user_id,
                    attempt = n,
                    max_attempts = max_attempts,
                    error = %msg,
                    "Identity lookup failed"
                );
                last_error = msg;
                if n < max_attempts {
                    tokio::time::sleep(retry_delay).await;
                }
            }
        }
    }

    Err(IdentityError::Unavailable(last_error))
}
