//! Shared HTTP plumbing for the service clients.

use std::time::Duration;

use anyhow::{Context, Result};

use essayscore_core::error::ServiceError;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

/// Classify a transport failure.
pub(crate) fn send_error(
    e: reqwest::Error,
    service: &'static str,
    base_url: &str,
    timeout_secs: u64,
) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout(timeout_secs)
    } else if e.is_connect() {
        ServiceError::NetworkError(format!(
            "{service} not reachable at {base_url}. Is the service running?"
        ))
    } else {
        ServiceError::NetworkError(e.to_string())
    }
}

/// Turn an error status into a `ServiceError`, passing successful responses
/// through.
pub(crate) async fn check_status(
    response: reqwest::Response,
    service: &'static str,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status().as_u16();
    match status {
        429 => Err(ServiceError::RateLimited { service }),
        401 | 403 => {
            let body = response.text().await.unwrap_or_default();
            Err(ServiceError::AuthenticationFailed(body))
        }
        s if s >= 400 => {
            let body = response.text().await.unwrap_or_default();
            Err(ServiceError::ApiError {
                service,
                status,
                message: body,
            })
        }
        _ => Ok(response),
    }
}

pub(crate) fn trim_base_url(base_url: &str, default: &str) -> String {
    let base = if base_url.is_empty() { default } else { base_url };
    base.trim_end_matches('/').to_string()
}
