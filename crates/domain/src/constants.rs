//! Client constants
//!
//! Centralized defaults shared by the configuration and the request
//! pipeline.

// Remote service
pub const DEFAULT_BASE_URL: &str = "https://api.pluralkit.me/v2";
pub const DEFAULT_USER_AGENT: &str = concat!("pluralkit-rs/", env!("CARGO_PKG_VERSION"));

// Per-attempt timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// Rate limiting: wait used when a 429 carries no hint. Hints are honoured in
// full unless a maximum wait is configured.
pub const DEFAULT_RATE_LIMIT_WAIT_MS: u64 = 1_000;

// Decode errors keep at most this many characters of the offending body
pub const DECODE_SNIPPET_CHARS: usize = 256;

// The literal reference to the authenticated system
pub const SELF_SYSTEM_REF: &str = "@me";
