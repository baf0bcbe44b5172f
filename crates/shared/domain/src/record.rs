//! Contact records as exposed by the upstream API.

use crate::constants::fields;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Unique, non-null record identifier.
///
/// The API usually sends integers, but string ids are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Reads an id from a JSON scalar. `null`, blank strings and containers are not ids.
    ///
    /// Numeric strings collapse to [`RecordId::Number`] so `"7"` and `7` compare equal.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                Some(n.as_i64().map_or_else(|| Self::Text(n.to_string()), Self::Number))
            },
            Value::String(s) => Self::parse(s),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            _ => None,
        }
    }

    /// Parses user input (CLI arguments, selections) into an id.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(raw.parse::<i64>().map_or_else(|_| Self::Text(raw.to_owned()), Self::Number))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Subscription status of a contact.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Subscribed,
    Pending,
    Unsubscribed,
    Bounced,
    Complained,
}

/// A tag or list reference (`{id, title}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: RecordId,
    pub title: String,
}

/// One validated contact.
///
/// All fields received from the API are kept in arrival order, `id` included, so a record
/// serializes back to the object it was built from. Typed accessors read from that map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    /// Builds a record from an object whose `id` was already validated.
    #[must_use]
    pub const fn from_parts(id: RecordId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    #[must_use]
    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// The raw field mapping, in the order received.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Field rendered as display text; `None` when absent, null or blank.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(display_value).filter(|s| !s.trim().is_empty())
    }

    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        self.text(fields::FULL_NAME)
    }

    #[must_use]
    pub fn email(&self) -> Option<String> {
        self.text(fields::EMAIL)
    }

    /// Parsed status; unknown strings yield `None` rather than an error.
    #[must_use]
    pub fn status(&self) -> Option<ContactStatus> {
        self.text(fields::STATUS).and_then(|s| s.trim().to_lowercase().parse().ok())
    }

    #[must_use]
    pub fn tags(&self) -> Vec<EntityRef> {
        self.entities(fields::TAGS)
    }

    #[must_use]
    pub fn lists(&self) -> Vec<EntityRef> {
        self.entities(fields::LISTS)
    }

    /// Custom field values keyed by slug.
    #[must_use]
    pub fn custom_values(&self) -> Option<&Map<String, Value>> {
        self.get(fields::CUSTOM_VALUES).and_then(Value::as_object)
    }

    fn entities(&self, key: &str) -> Vec<EntityRef> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(entity_ref).collect())
            .unwrap_or_default()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = map
            .get(fields::ID)
            .and_then(RecordId::from_value)
            .ok_or_else(|| "record has no usable `id`".to_owned())?;
        Ok(Self { id, fields: map })
    }
}

/// Reads `{id, title}` leniently; entries without an id are skipped.
#[must_use]
pub fn entity_ref(value: &Value) -> Option<EntityRef> {
    let object = value.as_object()?;
    let id = object.get(fields::ID).and_then(RecordId::from_value)?;
    let title = object
        .get(fields::TITLE)
        .map(display_value)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_owned());
    Some(EntityRef { id, title })
}

/// Renders any JSON value as display text.
///
/// Strings are returned as-is, numbers and booleans in their string form, `null` as an
/// empty string and containers as compact JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
