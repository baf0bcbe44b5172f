//! Server-defined custom field descriptions.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One custom field that can be collected on a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Key under which the value is submitted; unique within a schema set.
    pub slug: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_key: Option<String>,
}

impl FieldSchema {
    /// Options offered by choice fields; empty for text fields.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Text => &[],
            FieldKind::SelectOne { options }
            | FieldKind::Radio { options }
            | FieldKind::Checkbox { options } => options,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> FieldType {
        match self.kind {
            FieldKind::Text => FieldType::Text,
            FieldKind::SelectOne { .. } => FieldType::SelectOne,
            FieldKind::Radio { .. } => FieldType::Radio,
            FieldKind::Checkbox { .. } => FieldType::Checkbox,
        }
    }
}

/// Input shape of a custom field. Options exist only on the choice variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    SelectOne { options: Vec<String> },
    Radio { options: Vec<String> },
    Checkbox { options: Vec<String> },
}

/// Wire name of a [`FieldKind`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum FieldType {
    Text,
    SelectOne,
    Radio,
    Checkbox,
}

impl FieldType {
    /// Pairs the type with its options. Options are ignored for text fields.
    #[must_use]
    pub fn with_options(self, options: Vec<String>) -> FieldKind {
        match self {
            Self::Text => FieldKind::Text,
            Self::SelectOne => FieldKind::SelectOne { options },
            Self::Radio => FieldKind::Radio { options },
            Self::Checkbox => FieldKind::Checkbox { options },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_uses_wire_type_names() {
        let field = FieldSchema {
            slug: "plan".into(),
            label: "Plan".into(),
            kind: FieldType::SelectOne.with_options(vec!["basic".into(), "pro".into()]),
            field_key: None,
        };
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({"slug": "plan", "label": "Plan", "type": "select-one", "options": ["basic", "pro"]})
        );
        assert_eq!("checkbox".parse::<FieldType>().unwrap(), FieldType::Checkbox);
        assert_eq!(field.type_name().to_string(), "select-one");
    }

    #[test]
    fn text_fields_have_no_options() {
        let field = FieldSchema {
            slug: "nick".into(),
            label: "Nickname".into(),
            kind: FieldType::Text.with_options(vec!["ignored".into()]),
            field_key: Some("nick_key".into()),
        };
        assert!(field.options().is_empty());
    }
}
