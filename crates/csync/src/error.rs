use csync_api::RequestError;
use csync_contacts::FetchError;
use csync_domain::ErrorKind;
use csync_export::ExportError;
use csync_forms::FormError;
use std::borrow::Cow;

/// Every failure a [`Session`](crate::Session) operation can report.
#[csync_derive::csync_error]
pub enum SessionError {
    /// Timeout, unreachable host or other transport failure.
    #[error("Transport error{}: {source}", format_context(.context))]
    Transport { source: RequestError, context: Option<Cow<'static, str>> },

    /// HTTP 401.
    #[error("Authentication failed{}: check the username and password", format_context(.context))]
    Auth { body: String, context: Option<Cow<'static, str>> },

    /// HTTP 404; the message carries a base URL hint.
    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Request failed with status {status}{}: {body}", format_context(.context))]
    Status { status: u16, body: String, context: Option<Cow<'static, str>> },

    #[error("Malformed response{}: {message}", format_context(.context))]
    MalformedResponse { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Rejected locally; no request was sent.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Not authenticated{}: test the connection first", format_context(.context))]
    NotAuthenticated { context: Option<Cow<'static, str>> },

    #[error("Export failed{}: {source}", format_context(.context))]
    Export { source: ExportError, context: Option<Cow<'static, str>> },
}

impl SessionError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Status { .. } => ErrorKind::Status,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotAuthenticated { .. } => ErrorKind::NotAuthenticated,
            Self::Export { .. } => ErrorKind::Export,
        }
    }

    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    /// Maps a non-2xx status onto the taxonomy: 401 auth, 404 not found, anything else
    /// a generic status error.
    pub(crate) fn from_status(
        status: u16,
        body: String,
        base_url: &str,
        context: Option<Cow<'static, str>>,
    ) -> Self {
        match status {
            401 => Self::Auth { body, context },
            404 => Self::NotFound {
                message: format!("API endpoint not found, check the base URL ({base_url})").into(),
                context,
            },
            _ => Self::Status { status, body, context },
        }
    }

    pub(crate) fn from_fetch(err: FetchError, base_url: &str) -> Self {
        match err {
            FetchError::Request { source, context } => Self::Transport { source, context },
            FetchError::Status { status, body, context } => {
                Self::from_status(status, body, base_url, context)
            },
            FetchError::Malformed { message, context } => {
                Self::MalformedResponse { message, context }
            },
        }
    }
}

impl From<FormError> for SessionError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation { message, context } => Self::Validation { message, context },
            other => Self::validation(other.to_string()),
        }
    }
}
