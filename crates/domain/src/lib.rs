//! # PluralKit Domain
//!
//! Wire models and error types for the PluralKit v2 API.
//!
//! This crate contains:
//! - Model records (System, Member, Group, Switch, Message, settings)
//! - Partial-update payloads with tri-state fields
//! - The closed error taxonomy returned by every client call
//! - Client configuration
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O; pure (de)serialization contracts

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::ClientConfig;
pub use errors::*;
pub use types::*;
