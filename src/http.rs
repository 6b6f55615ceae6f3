//! Paginated, authenticated HTTP plumbing.
//!
//! Everything here is mechanical request shaping: bearer auth on every
//! request, status mapping, offset pagination for "get many" endpoints,
//! and a bounded retry for transient failures. The typed endpoint methods
//! in `members`/`custom_fields` never touch reqwest directly.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::ApiError;

// ============================================================================
// Retry policy
// ============================================================================

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 2_000,
        }
    }
}

fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

fn retry_delay(
    attempt: u32,
    policy: &RetryPolicy,
    retry_after: Option<&reqwest::header::HeaderValue>,
) -> Duration {
    if let Some(value) = retry_after.and_then(|v| v.to_str().ok()) {
        if let Ok(secs) = value.parse::<u64>() {
            return Duration::from_secs(secs.min(30));
        }
    }

    let exponent = 2u64.saturating_pow(attempt.saturating_sub(1));
    let base = policy
        .initial_backoff_ms
        .saturating_mul(exponent)
        .min(policy.max_backoff_ms);
    let jitter = (std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0))
        % 150;
    Duration::from_millis(base.saturating_add(jitter))
}

/// Send a request, retrying 408/429/5xx responses and connect/timeout
/// transport errors with exponential backoff. `Retry-After` is honored
/// when it parses as seconds, capped at 30s. Non-clonable requests
/// (streaming bodies) are sent once without retry.
pub(crate) async fn send_with_retry(
    request: reqwest::RequestBuilder,
    policy: &RetryPolicy,
) -> Result<reqwest::Response, ApiError> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let Some(cloned) = request.try_clone() else {
            return request.send().await.map_err(ApiError::Http);
        };

        match cloned.send().await {
            Ok(response) => {
                let status = response.status();
                if is_retryable_status(status) && attempt < attempts {
                    let delay = retry_delay(
                        attempt,
                        policy,
                        response.headers().get(reqwest::header::RETRY_AFTER),
                    );
                    log::warn!(
                        "rosterhub retry {}/{} after status {} (sleep {:?})",
                        attempt,
                        attempts,
                        status,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                return Ok(response);
            }
            Err(err) => {
                if (err.is_timeout() || err.is_connect()) && attempt < attempts {
                    let delay = retry_delay(attempt, policy, None);
                    log::warn!(
                        "rosterhub retry {}/{} after transport error: {} (sleep {:?})",
                        attempt,
                        attempts,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                return Err(ApiError::Http(err));
            }
        }
    }
}

// ============================================================================
// Request client
// ============================================================================

/// Authenticated request client. Paths are relative to the configured
/// base URL; pagination is transparent on [`get_all`](Self::get_all).
#[derive(Debug)]
pub(crate) struct RequestClient {
    http: reqwest::Client,
    config: ApiConfig,
    retry: RetryPolicy,
}

impl RequestClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            config,
            retry: RetryPolicy::default(),
        })
    }

    /// Fetch a single resource.
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, ApiError> {
        let request = self
            .http
            .get(self.config.endpoint(path)?)
            .bearer_auth(&self.config.token)
            .query(params);

        let response = send_with_retry(request, &self.retry).await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch every page of a list endpoint, preserving server order.
    ///
    /// Pages are requested at the configured page size with `limit`/`offset`
    /// and concatenated; a short page ends the walk. A single page is never
    /// assumed to be complete.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Vec<T>, ApiError> {
        let url = self.config.endpoint(path)?;
        let limit = self.config.page_size;
        let mut offset: u32 = 0;
        let mut items = Vec::new();

        loop {
            let request = self
                .http
                .get(url.clone())
                .bearer_auth(&self.config.token)
                .query(params)
                .query(&[
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ]);

            let response = send_with_retry(request, &self.retry).await?;
            let response = check_status(response).await?;
            let page: Vec<T> = response.json().await?;

            let page_len = page.len() as u32;
            items.extend(page);
            if page_len < limit {
                break;
            }
            offset += limit;
        }

        Ok(items)
    }

    /// Issue a PUT with a JSON body, discarding any response body.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = self
            .http
            .put(self.config.endpoint(path)?)
            .bearer_auth(&self.config.token)
            .json(body);

        let response = send_with_retry(request, &self.retry).await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Map non-2xx statuses to errors; 401 gets its own variant so callers
/// can tell "re-authenticate" apart from other failures.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::AuthExpired);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(response)
}
