//! Recognizes the list response shapes of the contact API.

use crate::FetchError;
use csync_domain::{PageMeta, PaginatedBody};
use serde_json::{Map, Value};

/// Envelope some API versions wrap the paginated object in.
const SUBSCRIBERS_ENVELOPE: &str = "subscribers";

/// Classifies a decoded list body.
///
/// Accepted shapes: a bare array, `{data: [...], current_page, last_page, total}`, or the
/// latter wrapped once in `{subscribers: {...}}`. Metadata numbers may arrive as strings.
pub fn parse_page(body: Value) -> Result<PaginatedBody, FetchError> {
    match body {
        Value::Array(entries) => Ok(PaginatedBody::Bare(entries)),
        Value::Object(mut object) => {
            if !object.contains_key("data")
                && let Some(Value::Object(inner)) = object.remove(SUBSCRIBERS_ENVELOPE)
            {
                return wrapped(inner);
            }
            wrapped(object)
        },
        other => Err(FetchError::malformed(format!(
            "expected an array or an object with `data`, got {}",
            short(&other)
        ))),
    }
}

fn wrapped(mut object: Map<String, Value>) -> Result<PaginatedBody, FetchError> {
    let data = match object.remove("data") {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => {
            return Err(FetchError::malformed("object body has no `data` array"));
        },
        Some(other) => {
            let found = short(&other);
            return Err(FetchError::malformed(format!("`data` is not an array: {found}")));
        },
    };

    let meta = PageMeta {
        current_page: meta_number(&object, "current_page"),
        last_page: meta_number(&object, "last_page"),
        total: meta_number(&object, "total"),
    };

    Ok(PaginatedBody::Wrapped { data, meta })
}

fn meta_number(object: &Map<String, Value>, key: &str) -> Option<u64> {
    match object.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn short(value: &Value) -> String {
    let text = value.to_string();
    match text.char_indices().nth(80) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}
