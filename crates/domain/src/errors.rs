//! Error types returned by every PluralKit client call
//!
//! The taxonomy is closed: each non-success outcome of the request pipeline
//! maps to exactly one [`PkError`] variant. Callers branch on the variant,
//! never on raw HTTP status codes.
//!
//! | Variant | Produced by | Retry? |
//! |---------|-------------|--------|
//! | `NotFound` | 404 | no |
//! | `Unauthorized` | 401, 403, missing token | no |
//! | `Validation` | 400, 422, other 4xx | no, fix the request |
//! | `RateLimited` | 429 after the automatic retry | yes, after `retry_after` |
//! | `Transient` | 5xx, timeouts, connection failures | yes |
//! | `Decode` | 2xx body that does not match the model | no |
//!
//! `Closed` and `Config` sit outside the taxonomy: they signal programming
//! or setup mistakes rather than remote conditions.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::constants::DECODE_SNIPPET_CHARS;

/// Context the remote service (or the client, for local rejections)
/// attached to a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorDetail {
    /// Human readable message
    pub message: String,
    /// HTTP status of the response, `None` for locally raised errors
    pub status: Option<u16>,
    /// PluralKit error code from the response body (e.g. `20001`)
    pub code: Option<u32>,
}

impl ErrorDetail {
    /// Detail for an error raised before any request was sent.
    pub fn local(message: impl Into<String>) -> Self {
        Self { message: message.into(), status: None, code: None }
    }

    /// Detail for an error decoded from a remote response.
    pub fn remote(status: u16, code: Option<u32>, message: impl Into<String>) -> Self {
        Self { message: message.into(), status: Some(status), code }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        match (self.status, self.code) {
            (Some(status), Some(code)) => write!(f, " (HTTP {status}, code {code})"),
            (Some(status), None) => write!(f, " (HTTP {status})"),
            (None, Some(code)) => write!(f, " (code {code})"),
            (None, None) => Ok(()),
        }
    }
}

/// Main error type for PluralKit operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PkError {
    #[error("Not found: {0}")]
    NotFound(ErrorDetail),

    #[error("Unauthorized: {0}")]
    Unauthorized(ErrorDetail),

    /// The request was rejected; `fields` maps field names to reasons.
    #[error("Validation failed: {detail}")]
    Validation { detail: ErrorDetail, fields: BTreeMap<String, String> },

    /// Still rate limited after the single automatic retry.
    #[error("Rate limited: {detail}")]
    RateLimited { detail: ErrorDetail, retry_after: Option<Duration> },

    /// Server-side or transport failure; safe to retry. `status` and `code`
    /// are set when a response was received.
    #[error("Transient failure: {cause}")]
    Transient { cause: String, status: Option<u16>, code: Option<u32> },

    /// A success response whose body does not match the expected model.
    #[error("Failed to decode response: {message}")]
    Decode { message: String, raw_snippet: String },

    /// The client was used after `close`.
    #[error("Client has been closed")]
    Closed,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PkError {
    /// Transport-level or server-side failure.
    pub fn transient(cause: impl Into<String>) -> Self {
        Self::Transient { cause: cause.into(), status: None, code: None }
    }

    /// Decode failure, keeping a bounded prefix of the offending body.
    pub fn decode(message: impl Into<String>, raw: &str) -> Self {
        let raw_snippet = match raw.char_indices().nth(DECODE_SNIPPET_CHARS) {
            Some((cut, _)) => format!("{}...", &raw[..cut]),
            None => raw.to_string(),
        };
        Self::Decode { message: message.into(), raw_snippet }
    }

    /// Rejection raised locally for operations that need a token.
    pub fn token_required() -> Self {
        Self::Unauthorized(ErrorDetail::local("this operation requires an API token"))
    }

    /// HTTP status behind this error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(detail)
            | Self::Unauthorized(detail)
            | Self::Validation { detail, .. }
            | Self::RateLimited { detail, .. } => detail.status,
            Self::Transient { status, .. } => *status,
            Self::Decode { .. } | Self::Closed | Self::Config(_) => None,
        }
    }

    /// PluralKit error code from the response body, when present.
    pub fn remote_code(&self) -> Option<u32> {
        match self {
            Self::NotFound(detail)
            | Self::Unauthorized(detail)
            | Self::Validation { detail, .. }
            | Self::RateLimited { detail, .. } => detail.code,
            Self::Transient { code, .. } => *code,
            Self::Decode { .. } | Self::Closed | Self::Config(_) => None,
        }
    }

    /// Field-level validation detail; empty for every other variant.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// True for misuse of the client rather than a remote condition.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::Closed | Self::Config(_))
    }
}

/// Result type alias for PluralKit operations
pub type Result<T> = std::result::Result<T, PkError>;

/// Standard interface for classifying errors by their characteristics.
pub trait ErrorClassification {
    /// Check if the failed operation may succeed if attempted again
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Suggested delay before retrying, when the remote supplied one
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, expected conditions
    Info,
    /// Degraded but operational
    Warning,
    /// Failure requiring attention
    Error,
    /// Misuse or integrity problem
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl ErrorClassification for PkError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::RateLimited { .. })
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) => ErrorSeverity::Info,
            Self::RateLimited { .. } | Self::Transient { .. } => ErrorSeverity::Warning,
            Self::Unauthorized(_) | Self::Validation { .. } | Self::Decode { .. } => {
                ErrorSeverity::Error
            }
            Self::Closed | Self::Config(_) => ErrorSeverity::Critical,
        }
    }

    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_display_includes_status_and_code() {
        let detail = ErrorDetail::remote(404, Some(20001), "System not found.");
        assert_eq!(detail.to_string(), "System not found. (HTTP 404, code 20001)");

        let local = ErrorDetail::local("nope");
        assert_eq!(local.to_string(), "nope");
    }

    #[test]
    fn retryable_kinds() {
        assert!(PkError::transient("connection reset").is_retryable());
        assert!(PkError::RateLimited {
            detail: ErrorDetail::remote(429, None, "slow down"),
            retry_after: Some(Duration::from_millis(500)),
        }
        .is_retryable());

        assert!(!PkError::NotFound(ErrorDetail::default()).is_retryable());
        assert!(!PkError::token_required().is_retryable());
        assert!(!PkError::Validation { detail: ErrorDetail::default(), fields: BTreeMap::new() }
            .is_retryable());
        assert!(!PkError::Closed.is_retryable());
    }

    #[test]
    fn retry_after_only_for_rate_limits() {
        let limited = PkError::RateLimited {
            detail: ErrorDetail::remote(429, None, "slow down"),
            retry_after: Some(Duration::from_secs(2)),
        };
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(2)));
        assert_eq!(PkError::transient("boom").retry_after(), None);
    }

    #[test]
    fn closed_is_a_critical_programming_error() {
        assert!(PkError::Closed.is_programming_error());
        assert!(PkError::Closed.is_critical());
        assert!(!PkError::transient("x").is_programming_error());
        assert_eq!(PkError::NotFound(ErrorDetail::default()).severity(), ErrorSeverity::Info);
    }

    #[test]
    fn decode_snippet_is_bounded() {
        let body = "x".repeat(DECODE_SNIPPET_CHARS + 50);
        match PkError::decode("bad body", &body) {
            PkError::Decode { raw_snippet, .. } => {
                assert_eq!(raw_snippet.len(), DECODE_SNIPPET_CHARS + 3);
                assert!(raw_snippet.ends_with("..."));
            }
            other => panic!("expected decode error, got {:?}", other),
        }

        match PkError::decode("bad body", "{\"id\":") {
            PkError::Decode { raw_snippet, .. } => assert_eq!(raw_snippet, "{\"id\":"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn status_and_code_accessors() {
        let err = PkError::Unauthorized(ErrorDetail::remote(401, Some(0), "bad token"));
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.remote_code(), Some(0));
        assert_eq!(PkError::token_required().status(), None);

        let transient =
            PkError::Transient { cause: "bad gateway".into(), status: Some(502), code: Some(50000) };
        assert_eq!(transient.status(), Some(502));
        assert_eq!(transient.remote_code(), Some(50000));
        assert_eq!(PkError::transient("reset").remote_code(), None);
        assert!(transient.field_errors().is_none());
    }
}
