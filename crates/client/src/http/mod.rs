//! HTTP transport shared by every request the client sends.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
