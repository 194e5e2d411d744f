//! Request pipeline for the PluralKit API
//!
//! This module turns an [`ApiRequest`] into a typed result. It handles the
//! token header, dispatch, the single rate-limit retry, decoding, and the
//! mapping of failures onto the closed error taxonomy.
//!
//! # Architecture
//!
//! - Uses [`crate::http::HttpClient`] (no direct reqwest client here)
//! - Token installed once as a sensitive default header
//! - Exactly one automatic retry, only for 429
//! - Optional client-side pacing
//! - `close` cancels waits and in-flight attempts

pub mod auth;
pub mod client;
pub mod errors;
pub mod rate_limit;
pub mod request;

pub use auth::Token;
pub use client::{PkClient, PkClientBuilder};
pub use errors::{classify_status, RemoteErrorBody};
pub use rate_limit::{retry_after_hint, RequestPacer};
pub use request::ApiRequest;
