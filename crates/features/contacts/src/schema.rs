//! Custom field schema reader.

use crate::error::{FetchError, FetchErrorExt};
use csync_api::{ApiClient, ApiRequest};
use csync_domain::constants::endpoints;
use csync_domain::record::display_value;
use csync_domain::{FieldSchema, FieldType};
use fxhash::FxHashSet;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

/// `GET custom-fields/contacts`, parsed leniently.
#[instrument(skip_all)]
pub fn fetch_field_schemas(client: &ApiClient) -> Result<Vec<FieldSchema>, FetchError> {
    let response =
        client.send(ApiRequest::get(endpoints::CUSTOM_FIELDS)).context("Fetching custom fields")?;
    if !response.is_success() {
        return Err(FetchError::Status {
            status: response.status,
            body: response.snippet(500),
            context: Some("Fetching custom fields".into()),
        });
    }

    let body = response.json().map_err(|e| FetchError::Malformed {
        message: format!("body is not JSON: {e}").into(),
        context: Some("Fetching custom fields".into()),
    })?;

    let fields = parse_field_schemas(body)?;
    debug!(count = fields.len(), "custom fields loaded");
    Ok(fields)
}

/// Reads `{fields: [...]}` or a bare array into schemas.
///
/// Entries without `slug` or `label`, with an unknown `type`, or repeating an earlier slug
/// are skipped with a warning.
pub fn parse_field_schemas(body: Value) -> Result<Vec<FieldSchema>, FetchError> {
    let entries = match body {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("fields") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(FetchError::malformed("object body has no `fields` array")),
        },
        _ => return Err(FetchError::malformed("expected an array or an object with `fields`")),
    };

    let mut slugs = FxHashSet::default();
    let mut schemas = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match field_schema(entry) {
            Ok(schema) if slugs.insert(schema.slug.clone()) => schemas.push(schema),
            Ok(schema) => warn!(index, slug = %schema.slug, "skipping duplicate custom field"),
            Err(reason) => warn!(index, reason, "skipping custom field"),
        }
    }
    Ok(schemas)
}

fn field_schema(entry: &Value) -> Result<FieldSchema, &'static str> {
    let object = entry.as_object().ok_or("entry is not an object")?;
    let slug = required_text(object, "slug").ok_or("missing slug")?;
    let label = required_text(object, "label").ok_or("missing label")?;
    let field_type = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(|t| t.trim().parse::<FieldType>().ok())
        .ok_or("unknown field type")?;

    let options = object
        .get("options")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(option_text).collect())
        .unwrap_or_default();

    Ok(FieldSchema {
        slug,
        label,
        kind: field_type.with_options(options),
        field_key: required_text(object, "field_key"),
    })
}

fn required_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).map(display_value).map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

/// Options arrive as strings or as `{value, label}` objects.
fn option_text(option: &Value) -> Option<String> {
    let text = match option {
        Value::Object(object) => {
            object.get("value").or_else(|| object.get("label")).map(display_value)?
        },
        Value::Null => return None,
        other => display_value(other),
    };
    Some(text).filter(|t| !t.trim().is_empty())
}
