//! Display projections of records and field schemas.

use csync_domain::constants::fields;
use csync_domain::{EntityRef, FieldSchema, Record};
use serde::Serialize;

/// Placeholder avatar shown when a contact has no photo.
pub const DEFAULT_PHOTO_URL: &str =
    "https://www.gravatar.com/avatar/00000000000000000000000000000000?s=128";
const MISSING: &str = "N/A";

/// One line of the contact table. Absent values are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
    pub phone: String,
    pub created: String,
}

impl From<&Record> for ContactRow {
    fn from(record: &Record) -> Self {
        let text = |key: &str| record.text(key).unwrap_or_default();
        Self {
            id: record.id().to_string(),
            name: text(fields::FULL_NAME),
            email: text(fields::EMAIL),
            status: text(fields::STATUS),
            phone: text(fields::PHONE),
            created: text(fields::CREATED_AT),
        }
    }
}

/// `"Ada Lovelace (ada@example.com)"`, for pickers.
#[must_use]
pub fn contact_label(record: &Record) -> String {
    let name = record.full_name().unwrap_or_else(|| "Unknown".to_owned());
    let email = record.email().unwrap_or_default();
    format!("{name} ({email})")
}

/// Everything the detail view shows for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetail {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub date_of_birth: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub tags: String,
    pub lists: String,
    pub photo: String,
}

impl From<&Record> for ContactDetail {
    fn from(record: &Record) -> Self {
        let text = |key: &str| record.text(key).unwrap_or_else(|| MISSING.to_owned());
        let name = [record.text(fields::PREFIX), record.full_name()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            id: record.id().to_string(),
            name: if name.is_empty() { MISSING.to_owned() } else { name },
            email: text(fields::EMAIL),
            phone: text(fields::PHONE),
            status: text(fields::STATUS),
            date_of_birth: text(fields::DATE_OF_BIRTH),
            address_line_1: text(fields::ADDRESS_LINE_1),
            address_line_2: text(fields::ADDRESS_LINE_2),
            city: text(fields::CITY),
            state: text(fields::STATE),
            postal_code: text(fields::POSTAL_CODE),
            country: text(fields::COUNTRY),
            tags: titles(&record.tags(), "No tags"),
            lists: titles(&record.lists(), "No lists"),
            photo: record.text(fields::PHOTO).unwrap_or_else(|| DEFAULT_PHOTO_URL.to_owned()),
        }
    }
}

fn titles(entities: &[EntityRef], none: &str) -> String {
    if entities.is_empty() {
        return none.to_owned();
    }
    entities.iter().map(|e| e.title.as_str()).collect::<Vec<_>>().join(", ")
}

/// One custom field as listed by the `fields` view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchemaView {
    pub label: String,
    pub field_type: String,
    pub slug: String,
    pub field_key: String,
    pub options: Vec<String>,
}

impl From<&FieldSchema> for FieldSchemaView {
    fn from(schema: &FieldSchema) -> Self {
        Self {
            label: schema.label.clone(),
            field_type: schema.type_name().to_string(),
            slug: schema.slug.clone(),
            field_key: schema.field_key.clone().unwrap_or_else(|| MISSING.to_owned()),
            options: schema.options().to_vec(),
        }
    }
}
