//! Conversions from external client errors into domain errors.

use pluralkit_domain::PkError;
use reqwest::header::InvalidHeaderValue;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the client side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct ClientError(pub PkError);

impl From<ClientError> for PkError {
    fn from(value: ClientError) -> Self {
        value.0
    }
}

impl From<PkError> for ClientError {
    fn from(value: PkError) -> Self {
        ClientError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPkError {
    fn into_pk(self) -> PkError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PkError */
/* -------------------------------------------------------------------------- */

impl IntoPkError for HttpError {
    fn into_pk(self) -> PkError {
        if self.is_builder() {
            return PkError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_timeout() {
            return PkError::transient("HTTP request timed out");
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return PkError::transient("HTTP connection failure");
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
            return PkError::Transient { cause: message, status: Some(code), code: None };
        }

        PkError::transient(format!("HTTP transport error: {self}"))
    }
}

impl From<HttpError> for ClientError {
    fn from(value: HttpError) -> Self {
        ClientError(value.into_pk())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → PkError */
/* -------------------------------------------------------------------------- */

impl IntoPkError for UrlError {
    fn into_pk(self) -> PkError {
        PkError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for ClientError {
    fn from(value: UrlError) -> Self {
        ClientError(value.into_pk())
    }
}

/* -------------------------------------------------------------------------- */
/* InvalidHeaderValue → PkError */
/* -------------------------------------------------------------------------- */

// The offending value may be the token, so it is never echoed.
impl IntoPkError for InvalidHeaderValue {
    fn into_pk(self) -> PkError {
        PkError::Config("header value contains characters not allowed in HTTP headers".into())
    }
}

impl From<InvalidHeaderValue> for ClientError {
    fn from(value: InvalidHeaderValue) -> Self {
        ClientError(value.into_pk())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
