//! Creation payload serialization.

use crate::{CoreFields, CustomValue, FormError};
use csync_domain::RecordId;
use csync_domain::constants::fields;
use serde::Serialize;
use serde_json::{Map, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// JSON body for `POST subscribers`. Only non-empty values are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CreatePayload(Map<String, Value>);

impl CreatePayload {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Builds the creation payload.
///
/// `email` is required. `status` is always sent. Every other scalar is sent only when
/// non-empty after trimming, custom values only when non-empty, tags and lists only when
/// something is selected.
///
/// ```rust
/// use csync_forms::{CoreFields, serialize};
///
/// let core = CoreFields::builder().email(" a@b.com ").city("  ").build();
/// let payload = serialize(&core, Vec::<(String, _)>::new(), &[], &[]).unwrap();
/// assert_eq!(payload.keys().collect::<Vec<_>>(), ["email", "status"]);
/// ```
pub fn serialize<K: Into<String>>(
    core: &CoreFields,
    custom: impl IntoIterator<Item = (K, CustomValue)>,
    tag_ids: &[RecordId],
    list_ids: &[RecordId],
) -> Result<CreatePayload, FormError> {
    let email = core.email.trim();
    if email.is_empty() {
        return Err(FormError::Validation { message: "Email is required".into(), context: None });
    }

    let mut map = Map::new();
    map.insert(fields::EMAIL.to_owned(), Value::from(email));
    map.insert(fields::STATUS.to_owned(), Value::from(core.status.as_ref()));

    let optional = [
        ("first_name", &core.first_name),
        ("last_name", &core.last_name),
        (fields::PREFIX, &core.prefix),
        (fields::PHONE, &core.phone),
        (fields::ADDRESS_LINE_1, &core.address_line_1),
        (fields::ADDRESS_LINE_2, &core.address_line_2),
        (fields::CITY, &core.city),
        (fields::STATE, &core.state),
        (fields::POSTAL_CODE, &core.postal_code),
        (fields::COUNTRY, &core.country),
    ];
    for (key, value) in optional {
        let value = value.trim();
        if !value.is_empty() {
            map.insert(key.to_owned(), Value::from(value));
        }
    }

    if let Some(dob) = core.date_of_birth {
        let dob = dob.format(DATE_FORMAT).to_string();
        map.insert(fields::DATE_OF_BIRTH.to_owned(), Value::from(dob));
    }

    if !tag_ids.is_empty() {
        map.insert(fields::TAGS.to_owned(), ids_json(tag_ids));
    }
    if !list_ids.is_empty() {
        map.insert(fields::LISTS.to_owned(), ids_json(list_ids));
    }

    let custom: Map<String, Value> = custom
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.into(), value.to_json()))
        .collect();
    if !custom.is_empty() {
        map.insert(fields::CUSTOM_VALUES.to_owned(), Value::Object(custom));
    }

    Ok(CreatePayload(map))
}

fn ids_json(ids: &[RecordId]) -> Value {
    ids.iter()
        .map(|id| match id {
            RecordId::Number(n) => Value::from(*n),
            RecordId::Text(t) => Value::from(t.as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use csync_domain::ContactStatus;
    use serde_json::json;

    #[test]
    fn blank_email_is_rejected() {
        for email in ["", "   ", "\t\n"] {
            let core = CoreFields::builder().email(email).first_name("Ada").build();
            let err = serialize(&core, Vec::<(String, CustomValue)>::new(), &[], &[]).unwrap_err();
            assert!(matches!(err, FormError::Validation { .. }));
        }
    }

    #[test]
    fn minimal_payload_is_email_and_status() {
        let core = CoreFields::builder()
            .email("a@b.com")
            .first_name(" ")
            .phone("")
            .country("\t")
            .build();
        let payload = serialize(
            &core,
            [
                ("plan".to_owned(), CustomValue::Choice(None)),
                ("nick".to_owned(), CustomValue::Text(" ".into())),
            ],
            &[],
            &[],
        )
        .unwrap();
        assert_eq!(payload.into_value(), json!({"email": "a@b.com", "status": "subscribed"}));
    }

    #[test]
    fn full_payload_keeps_order_and_trims() {
        let core = CoreFields::builder()
            .email(" ada@example.com ")
            .status(ContactStatus::Pending)
            .first_name("Ada")
            .last_name("Lovelace")
            .city(" London ")
            .date_of_birth(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
            .build();
        let payload = serialize(
            &core,
            [
                ("plan", CustomValue::Choice(Some("pro".into()))),
                ("topics", CustomValue::Multi(vec!["math".into(), "poetry".into()])),
                ("empty", CustomValue::Multi(vec![])),
            ],
            &[RecordId::Number(3), RecordId::Text("x9".into())],
            &[RecordId::Number(1)],
        )
        .unwrap();

        assert_eq!(
            payload.keys().collect::<Vec<_>>(),
            [
                "email",
                "status",
                "first_name",
                "last_name",
                "city",
                "date_of_birth",
                "tags",
                "lists",
                "custom_values"
            ]
        );
        assert_eq!(
            payload.into_value(),
            json!({
                "email": "ada@example.com",
                "status": "pending",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "city": "London",
                "date_of_birth": "1815-12-10",
                "tags": [3, "x9"],
                "lists": [1],
                "custom_values": {"plan": "pro", "topics": ["math", "poetry"]}
            })
        );
    }
}
