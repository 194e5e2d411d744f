//! Conversions from third-party errors into [`pluralkit_domain::PkError`].

pub mod conversions;

pub use conversions::ClientError;
