//! # PluralKit Client
//!
//! Async client for the PluralKit v2 REST API.
//!
//! This crate contains:
//! - The HTTP transport (`reqwest`, one pooled connection set per client)
//! - The request pipeline: auth header, dispatch, one rate-limit retry,
//!   typed decoding and error classification
//! - One façade method per documented endpoint
//! - Configuration loading from the environment or a JSON/TOML file
//!
//! ## Architecture
//! - Models and errors live in `pluralkit-domain`
//! - Every façade method is a single [`PkClient::execute`] call
//!
//! ```no_run
//! use pluralkit_client::PkClient;
//! use pluralkit_domain::SystemRef;
//!
//! # async fn example() -> pluralkit_domain::Result<()> {
//! let client = PkClient::builder().token("my-token").build()?;
//! let system = client.get_system(&SystemRef::Me).await?;
//! println!("{}", system.id);
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod resources;

// Re-export commonly used items
pub use api::{ApiRequest, PkClient, PkClientBuilder};
pub use errors::ClientError;
pub use http::{HttpClient, HttpClientBuilder};
