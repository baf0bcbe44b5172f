use std::borrow::Cow;

/// Rejections raised before any network call is made.
#[csync_derive::csync_error]
#[derive(Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is absent or blank.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid option{} for `{field}`: {value}", format_context(.context))]
    InvalidOption { field: String, value: String, context: Option<Cow<'static, str>> },

    #[error("Unknown field{}: {field}", format_context(.context))]
    UnknownField { field: String, context: Option<Cow<'static, str>> },
}

impl FormError {
    pub(crate) fn invalid_option(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidOption { field: field.into(), value: value.into(), context: None }
    }
}
