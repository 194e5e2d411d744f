//! Resource façade
//!
//! One method per documented endpoint, grouped by resource. Each method
//! picks the verb, path, query and body, then makes a single
//! [`PkClient::execute`](crate::PkClient::execute) call. Methods that can
//! only work with a token fail locally with `Unauthorized` before anything
//! is sent.

use std::borrow::Cow;
use std::collections::BTreeMap;

use pluralkit_domain::constants::SELF_SYSTEM_REF;
use pluralkit_domain::{ErrorDetail, PkError, SystemRef};
use urlencoding::encode;

pub mod groups;
pub mod members;
pub mod messages;
pub mod switches;
pub mod systems;

/// `systems/{ref}`; `@me` is kept literal, everything else is encoded.
pub(crate) fn system_path(system: &SystemRef) -> String {
    match system {
        SystemRef::Me => format!("systems/{SELF_SYSTEM_REF}"),
        other => format!("systems/{}", encode(&other.to_string())),
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    encode(id)
}

/// Local rejection of an argument the remote would refuse anyway.
pub(crate) fn invalid_argument(field: &str, reason: &str) -> PkError {
    PkError::Validation {
        detail: ErrorDetail::local(format!("invalid {field}: {reason}")),
        fields: BTreeMap::from([(field.to_string(), reason.to_string())]),
    }
}
