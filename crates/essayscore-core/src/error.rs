//! External service error types.
//!
//! These error types represent failures when talking to the grammar checker
//! or the document analysis service. Defined in `essayscore-core` so the
//! request boundary can report them without depending on the HTTP clients.

use thiserror::Error;

/// Errors that can occur when interacting with an external analysis service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service returned a 429 rate limit response.
    #[error("{service} rate limited the request")]
    RateLimited { service: &'static str },

    /// Authentication failed (invalid API key or username).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The service returned an error response.
    #[error("{service} error (HTTP {status}): {message}")]
    ApiError {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response from {service}: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ServiceError {
    /// Returns `true` if the failure came from the service rejecting the
    /// request rather than from the transport.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ServiceError::RateLimited { .. }
                | ServiceError::AuthenticationFailed(_)
                | ServiceError::ApiError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_service_and_status() {
        let err = ServiceError::ApiError {
            service: "languagetool",
            status: 400,
            message: "missing text".into(),
        };
        assert_eq!(
            err.to_string(),
            "languagetool error (HTTP 400): missing text"
        );
        assert!(err.is_rejection());
    }

    #[test]
    fn transport_errors_are_not_rejections() {
        assert!(!ServiceError::Timeout(60).is_rejection());
        assert!(!ServiceError::NetworkError("refused".into()).is_rejection());
    }
}
