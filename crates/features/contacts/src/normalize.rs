//! Turns raw payload entries into validated [`Record`]s.

use csync_domain::constants::fields;
use csync_domain::{Record, RecordId};
use serde_json::Value;
use std::borrow::Cow;
use tracing::warn;

/// A raw entry that cannot become a [`Record`]. Never aborts the batch it came from.
#[csync_derive::csync_error]
#[derive(Clone, PartialEq, Eq)]
pub enum InvalidRecordError {
    #[error("Invalid record{}: expected an object, found {found}", format_context(.context))]
    NotAnObject { found: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid record{}: `id` is missing or null", format_context(.context))]
    MissingId { context: Option<Cow<'static, str>> },
}

/// Validates one raw entry.
///
/// Field values are kept in their native JSON types; display code coerces them through
/// [`Record::text`].
pub fn normalize(entry: Value) -> Result<Record, InvalidRecordError> {
    let Value::Object(map) = entry else {
        return Err(InvalidRecordError::NotAnObject {
            found: json_kind(&entry).into(),
            context: None,
        });
    };

    let Some(id) = map.get(fields::ID).and_then(RecordId::from_value) else {
        return Err(InvalidRecordError::MissingId { context: None });
    };

    Ok(Record::from_parts(id, map))
}

/// Outcome of normalizing one page of entries.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Batch {
    pub records: Vec<Record>,
    pub rejected: Vec<InvalidRecordError>,
}

/// Normalizes every entry, keeping valid records in input order.
///
/// Each rejected entry is logged with its position and `origin` (e.g. `"page 3"`).
pub fn normalize_batch(entries: Vec<Value>, origin: &str) -> Batch {
    let mut batch = Batch { records: Vec::with_capacity(entries.len()), rejected: Vec::new() };

    for (index, entry) in entries.into_iter().enumerate() {
        match normalize(entry) {
            Ok(record) => batch.records.push(record),
            Err(err) => {
                let err = with_position(err, origin, index);
                warn!(error = %err, "dropping invalid record");
                batch.rejected.push(err);
            },
        }
    }

    batch
}

fn with_position(err: InvalidRecordError, origin: &str, index: usize) -> InvalidRecordError {
    let position: Cow<'static, str> = format!("{origin}, entry {index}").into();
    match err {
        InvalidRecordError::NotAnObject { found, .. } => {
            InvalidRecordError::NotAnObject { found, context: Some(position) }
        },
        InvalidRecordError::MissingId { .. } => {
            InvalidRecordError::MissingId { context: Some(position) }
        },
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
