use serde_json::Value;

/// A collected answer for one custom field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomValue {
    Text(String),
    /// Single choice; `None` is the unselected sentinel.
    Choice(Option<String>),
    Multi(Vec<String>),
}

impl CustomValue {
    /// Blank text, an unselected choice and an empty selection are all empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Choice(choice) => choice.as_deref().is_none_or(|c| c.trim().is_empty()),
            Self::Multi(selected) => selected.iter().all(|s| s.trim().is_empty()),
        }
    }

    /// Wire form: strings for text and choices, an array for multi selections.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.trim().to_owned()),
            Self::Choice(choice) => {
                choice.as_deref().map_or(Value::Null, |c| Value::String(c.trim().to_owned()))
            },
            Self::Multi(selected) => selected
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_owned()))
                .collect(),
        }
    }
}
