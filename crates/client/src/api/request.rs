//! Description of a single API call

use pluralkit_domain::PkError;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::http::HttpClient;

/// Verb, path, query and body of one PluralKit call.
///
/// The body is encoded once up front, so a rate-limited request can be
/// replayed byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    /// `path` is relative to the base URL, e.g. `systems/@me`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `PkError::Config` if the payload cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, PkError> {
        let value = serde_json::to_value(body)
            .map_err(|err| PkError::Config(format!("failed to encode request body: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Resolve the path against `base`, which must end with `/`.
    pub(crate) fn url(&self, base: &Url) -> Result<Url, PkError> {
        base.join(self.path.trim_start_matches('/'))
            .map_err(|err| PkError::Config(format!("invalid request path {:?}: {err}", self.path)))
    }

    /// Fresh reqwest builder for one attempt.
    pub(crate) fn to_builder(&self, client: &HttpClient, url: Url) -> RequestBuilder {
        let mut builder = client.request(self.method.clone(), url);
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if let Some(body) = &self.body {
            builder = builder.json(body);
        }
        builder
    }
}
