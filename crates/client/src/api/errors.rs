//! Classification of non-success responses
//!
//! PluralKit error bodies look like
//! `{"code": 40001, "message": "...", "errors": {...}, "retry_after": 1500}`.
//! Field detail comes either as a list of `{field, message}` entries or as a
//! map from field name to one or more `{message, ...}` objects; nested maps
//! (e.g. `privacy`) are flattened to dotted names.

use std::collections::BTreeMap;
use std::time::Duration;

use pluralkit_domain::{ErrorDetail, PkError};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Decoded PluralKit error body. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
    /// Milliseconds, present on 429 responses
    #[serde(default)]
    pub retry_after: Option<u64>,
}

impl RemoteErrorBody {
    /// Lenient parse: a body that is not a PluralKit error object yields the
    /// empty default.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Field name → reason, several reasons for one field joined with `"; "`.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if let Some(errors) = &self.errors {
            collect_field_errors(errors, None, &mut fields);
        }
        fields.into_iter().map(|(field, reasons)| (field, reasons.join("; "))).collect()
    }
}

fn collect_field_errors(
    value: &Value,
    prefix: Option<&str>,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    match value {
        // [{"field": "name", "message": "too long"}, ...]
        Value::Array(entries) if prefix.is_none() => {
            for entry in entries {
                let field = entry.get("field").and_then(Value::as_str);
                let message = entry.get("message").and_then(Value::as_str);
                if let (Some(field), Some(message)) = (field, message) {
                    out.entry(field.to_string()).or_default().push(message.to_string());
                }
            }
        }
        // {"name": [{"message": "..."}], "privacy": {"name_privacy": [...]}}
        Value::Object(map) if prefix.is_none() || !map.contains_key("message") => {
            for (key, nested) in map {
                let field = match prefix {
                    Some(prefix) => format!("{prefix}.{key}"),
                    None => key.clone(),
                };
                collect_field_errors(nested, Some(&field), out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_field_errors(item, prefix, out);
            }
        }
        Value::Object(map) => {
            if let (Some(field), Some(message)) = (prefix, map.get("message").and_then(Value::as_str))
            {
                out.entry(field.to_string()).or_default().push(message.to_string());
            }
        }
        Value::String(message) => {
            if let Some(field) = prefix {
                out.entry(field.to_string()).or_default().push(message.clone());
            }
        }
        _ => {}
    }
}

/// Map a non-success, non-retried response to its taxonomy variant.
///
/// `retry_after` is only used for 429.
pub fn classify_status(
    status: StatusCode,
    remote: &RemoteErrorBody,
    retry_after: Option<Duration>,
) -> PkError {
    let code = status.as_u16();
    let message = remote.message.clone().unwrap_or_else(|| {
        format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"))
    });
    let detail = ErrorDetail::remote(code, remote.code, message);

    match code {
        401 | 403 => PkError::Unauthorized(detail),
        404 => PkError::NotFound(detail),
        429 => PkError::RateLimited { detail, retry_after },
        400 | 422 => PkError::Validation { detail, fields: remote.field_errors() },
        400..=499 => PkError::Validation { detail, fields: BTreeMap::new() },
        _ => PkError::Transient { cause: detail.to_string(), status: Some(code), code: remote.code },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(status: u16, body: &str) -> PkError {
        let status = StatusCode::from_u16(status).unwrap();
        classify_status(status, &RemoteErrorBody::parse(body), None)
    }

    #[test]
    fn auth_statuses() {
        assert!(matches!(classify(401, ""), PkError::Unauthorized(_)));
        assert!(matches!(classify(403, ""), PkError::Unauthorized(_)));
    }

    #[test]
    fn not_found_keeps_remote_code_and_message() {
        let err = classify(404, r#"{"code": 20001, "message": "System not found."}"#);
        match err {
            PkError::NotFound(detail) => {
                assert_eq!(detail.code, Some(20001));
                assert_eq!(detail.status, Some(404));
                assert_eq!(detail.message, "System not found.");
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn list_form_field_errors() {
        let err = classify(422, r#"{"errors":[{"field":"name","message":"too long"}]}"#);
        let expected = BTreeMap::from([("name".to_string(), "too long".to_string())]);
        assert_eq!(err.field_errors(), Some(&expected));
    }

    #[test]
    fn map_form_field_errors_join_multiple_reasons() {
        let err = classify(
            400,
            r#"{
                "code": 40001,
                "message": "Error parsing JSON model",
                "errors": {
                    "name": [
                        {"message": "Value too long", "max_length": 100, "actual_length": 150},
                        {"message": "Contains forbidden text"}
                    ],
                    "color": {"message": "Invalid color"},
                    "privacy": {"name_privacy": [{"message": "Invalid privacy value"}]}
                }
            }"#,
        );

        let fields = err.field_errors().unwrap();
        assert_eq!(fields["name"], "Value too long; Contains forbidden text");
        assert_eq!(fields["color"], "Invalid color");
        assert_eq!(fields["privacy.name_privacy"], "Invalid privacy value");
        assert_eq!(err.remote_code(), Some(40001));
    }

    #[test]
    fn other_client_errors_are_validation_without_fields() {
        let err = classify(409, r#"{"errors":[{"field":"name","message":"dup"}]}"#);
        match err {
            PkError::Validation { fields, detail } => {
                assert!(fields.is_empty());
                assert_eq!(detail.status, Some(409));
            }
            other => panic!("expected validation, got {:?}", other),
        }
    }

    #[test]
    fn server_errors_are_transient() {
        for status in [500, 502, 503, 504] {
            let err = classify(status, "<html>bad gateway</html>");
            assert_eq!(err.status(), Some(status));
            assert!(matches!(err, PkError::Transient { .. }));
        }
    }

    #[test]
    fn server_error_keeps_remote_code() {
        let err = classify(500, r#"{"code": 50000, "message": "500: Internal server error"}"#);
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.remote_code(), Some(50000));
        match err {
            PkError::Transient { cause, .. } => assert!(cause.contains("500: Internal server error")),
            other => panic!("expected transient, got {:?}", other),
        }
    }

    #[test]
    fn unexpected_statuses_are_transient() {
        assert!(matches!(classify(304, ""), PkError::Transient { .. }));
    }

    #[test]
    fn rate_limited_carries_the_hint() {
        let status = StatusCode::TOO_MANY_REQUESTS;
        let remote = RemoteErrorBody::parse(r#"{"message":"429: too many requests","retry_after":800}"#);
        assert_eq!(remote.retry_after, Some(800));

        let err = classify_status(status, &remote, Some(Duration::from_millis(800)));
        assert!(matches!(
            err,
            PkError::RateLimited { retry_after: Some(wait), .. } if wait == Duration::from_millis(800)
        ));
    }

    #[test]
    fn non_json_body_falls_back_to_reason_phrase() {
        let err = classify(418, "short and stout");
        match err {
            PkError::Validation { detail, .. } => assert_eq!(detail.message, "HTTP 418 I'm a teapot"),
            other => panic!("expected validation, got {:?}", other),
        }
    }
}
