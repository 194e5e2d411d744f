//! PluralKit API client
//!
//! [`PkClient::execute`] is the whole request pipeline: it resolves the URL,
//! paces and dispatches the request, retries once on 429 after the hinted
//! wait, decodes the body and classifies failures. Resource methods in
//! [`crate::resources`] are thin call sites over it.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use pluralkit_domain::{ClientConfig, PkError, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::auth::{default_headers, Token};
use super::errors::{classify_status, RemoteErrorBody};
use super::rate_limit::{duration_millis, retry_after_hint, RequestPacer};
use super::request::ApiRequest;
use crate::config;
use crate::errors::ClientError;
use crate::http::HttpClient;

/// Status, headers and fully read body of one attempt.
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

/// Async client for the PluralKit v2 API.
///
/// Cheap to share behind an `Arc`; concurrent calls do not wait on each other
/// except through the optional request pacer.
pub struct PkClient {
    transport: RwLock<Option<HttpClient>>,
    base_url: Url,
    authenticated: bool,
    timeout: Duration,
    default_rate_limit_wait: Duration,
    max_rate_limit_wait: Option<Duration>,
    pacer: Option<RequestPacer>,
    shutdown: CancellationToken,
}

impl PkClient {
    /// Create a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `PkError::Config` for an invalid base URL, a zero timeout or a
    /// token that cannot be sent as a header.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> PkClientBuilder {
        PkClientBuilder::default()
    }

    /// Create a client from `PLURALKIT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(config::load_from_env()?)
    }

    /// Whether a token was configured.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Release the transport and fail every pending and future call with
    /// `PkError::Closed`. Calling it again is a no-op.
    pub fn close(&self) {
        let transport = self.transport.write().take();
        self.shutdown.cancel();
        if transport.is_some() {
            info!(base_url = %self.base_url, "PluralKit client closed");
        }
    }

    /// Fail fast for operations that need a token.
    pub(crate) fn require_token(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(PkError::token_required())
        }
    }

    /// Run one API call through the pipeline and decode the response as `T`.
    ///
    /// Use `T = ()` for endpoints that answer with no content, and
    /// `Option<_>` where an empty response means "nothing".
    ///
    /// # Errors
    ///
    /// Every failure is one [`PkError`] variant; see the error taxonomy.
    #[instrument(skip_all, fields(method = %request.method(), path = %request.path()))]
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let url = request.url(&self.base_url)?;

        let response = self.attempt(&request, &url).await?;
        if response.status != StatusCode::TOO_MANY_REQUESTS {
            return Self::finish(response);
        }

        let remote = RemoteErrorBody::parse(&response.body);
        let hint = retry_after_hint(&response.headers, remote.retry_after, Utc::now());
        let wait = hint.unwrap_or(self.default_rate_limit_wait);

        if let Some(max_wait) = self.max_rate_limit_wait.filter(|max_wait| wait > *max_wait) {
            warn!(
                wait_ms = duration_millis(wait),
                max_wait_ms = duration_millis(max_wait),
                "rate limited beyond the maximum wait, not retrying"
            );
            return Err(classify_status(response.status, &remote, Some(wait)));
        }

        warn!(
            wait_ms = duration_millis(wait),
            hinted = hint.is_some(),
            "rate limited, retrying once"
        );
        self.sleep(wait).await?;

        let retried = self.attempt(&request, &url).await?;
        if retried.status == StatusCode::TOO_MANY_REQUESTS {
            let remote = RemoteErrorBody::parse(&retried.body);
            let hint = retry_after_hint(&retried.headers, remote.retry_after, Utc::now());
            warn!("still rate limited after retry");
            return Err(classify_status(retried.status, &remote, hint));
        }

        Self::finish(retried)
    }

    /// Send once and read the whole body, bounded by the per-attempt timeout
    /// and aborted by `close`.
    async fn attempt(&self, request: &ApiRequest, url: &Url) -> Result<RawResponse> {
        let client = self.transport()?;

        if let Some(pacer) = &self.pacer {
            tokio::select! {
                biased;
                () = self.shutdown.cancelled() => return Err(PkError::Closed),
                () = pacer.acquire() => {}
            }
        }

        let dispatch = async {
            let response = client.send(request.to_builder(&client, url.clone())).await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .text()
                .await
                .map_err(|err| PkError::from(ClientError::from(err)))?;
            Ok::<_, PkError>(RawResponse { status, headers, body })
        };

        tokio::select! {
            biased;
            () = self.shutdown.cancelled() => Err(PkError::Closed),
            outcome = tokio::time::timeout(self.timeout, dispatch) => match outcome {
                Ok(result) => result,
                Err(_) => {
                    debug!(timeout_ms = duration_millis(self.timeout), "request timed out");
                    Err(PkError::transient(format!(
                        "request timed out after {}ms",
                        duration_millis(self.timeout)
                    )))
                }
            },
        }
    }

    /// Decode a success body or classify a failure.
    fn finish<T: DeserializeOwned>(response: RawResponse) -> Result<T> {
        let status = response.status;
        if !status.is_success() {
            let remote = RemoteErrorBody::parse(&response.body);
            let err = classify_status(status, &remote, None);
            debug!(%status, error = %err, "request failed");
            return Err(err);
        }

        // 204/205 and blank bodies decode from `null`, which fits `()` and `Option<_>`
        if status == StatusCode::NO_CONTENT
            || status == StatusCode::RESET_CONTENT
            || response.body.trim().is_empty()
        {
            return serde_json::from_value(serde_json::Value::Null).map_err(|err| {
                PkError::decode(
                    format!("empty {} response cannot be decoded: {err}", status.as_u16()),
                    "",
                )
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|err| PkError::decode(err.to_string(), &response.body))
    }

    fn transport(&self) -> Result<HttpClient> {
        self.transport.read().clone().ok_or_else(|| {
            error!("PluralKit client used after close");
            PkError::Closed
        })
    }

    async fn sleep(&self, wait: Duration) -> Result<()> {
        tokio::select! {
            biased;
            () = self.shutdown.cancelled() => Err(PkError::Closed),
            () = tokio::time::sleep(wait) => Ok(()),
        }
    }
}

impl Drop for PkClient {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl fmt::Debug for PkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PkClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.authenticated)
            .field("timeout", &self.timeout)
            .field("paced", &self.pacer.is_some())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Builder for [`PkClient`]
#[derive(Debug, Default)]
pub struct PkClientBuilder {
    config: ClientConfig,
    no_proxy: bool,
}

impl PkClientBuilder {
    /// Replace every setting with `config`.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = duration_millis(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Wait used when a 429 carries no hint
    pub fn default_rate_limit_wait(mut self, wait: Duration) -> Self {
        self.config.default_rate_limit_wait_ms = duration_millis(wait);
        self
    }

    /// Hints longer than this surface `RateLimited` without a retry.
    /// Unset by default, so every hint is waited out.
    pub fn max_rate_limit_wait(mut self, wait: Duration) -> Self {
        self.config.max_rate_limit_wait_ms = Some(duration_millis(wait));
        self
    }

    /// Pace outgoing requests client-side
    pub fn requests_per_second(mut self, rate: u32) -> Self {
        self.config.requests_per_second = Some(rate);
        self
    }

    /// Ignore proxy settings from the environment.
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns `PkError::Config` if the configuration is invalid or the HTTP
    /// client cannot be created.
    pub fn build(self) -> Result<PkClient> {
        let config = self.config;

        let base_url = parse_base_url(&config.base_url)?;
        if config.timeout_ms == 0 {
            return Err(PkError::Config("timeout must be greater than zero".into()));
        }

        let token = config.token.clone().and_then(Token::new);
        let headers = default_headers(token.as_ref())?;

        let mut http = HttpClient::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if self.no_proxy {
            http = http.no_proxy();
        }
        let transport = http.build()?;

        let pacer = config.requests_per_second.and_then(RequestPacer::new);

        debug!(
            base_url = %base_url,
            authenticated = token.is_some(),
            paced = pacer.is_some(),
            "PluralKit client created"
        );

        Ok(PkClient {
            transport: RwLock::new(Some(transport)),
            base_url,
            authenticated: token.is_some(),
            timeout: config.timeout(),
            default_rate_limit_wait: config.default_rate_limit_wait(),
            max_rate_limit_wait: config.max_rate_limit_wait(),
            pacer,
            shutdown: CancellationToken::new(),
        })
    }
}

/// Parse the base URL and make sure relative paths join below it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }

    let url = Url::parse(&normalized)
        .map_err(|err| PkError::from(ClientError::from(err)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PkError::Config(format!("unsupported base URL scheme: {other}"))),
    }
}
