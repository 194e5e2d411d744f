//! API token handling
//!
//! PluralKit tokens are sent verbatim in the `Authorization` header, without
//! a `Bearer` prefix. The token is installed once as a sensitive default
//! header of the transport and never leaves it afterwards.

use std::fmt;

use pluralkit_domain::PkError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::errors::ClientError;

/// A PluralKit API token.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token. Blank input yields `None` (unauthenticated client).
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Header value marked sensitive so it is redacted by reqwest's `Debug`.
    pub fn header_value(&self) -> Result<HeaderValue, PkError> {
        let mut value =
            HeaderValue::from_str(&self.0).map_err(|err| PkError::from(ClientError::from(err)))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// Default headers sent with every request.
pub fn default_headers(token: Option<&Token>) -> Result<HeaderMap, PkError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(token) = token {
        headers.insert(AUTHORIZATION, token.header_value()?);
    }
    Ok(headers)
}
