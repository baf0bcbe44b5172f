use csync_api::RequestError;
use std::borrow::Cow;

/// Why a fetch from the contact API could not produce (more) data.
#[csync_derive::csync_error]
pub enum FetchError {
    #[error("Request failed{}: {source}", format_context(.context))]
    Request { source: RequestError, context: Option<Cow<'static, str>> },

    /// The server answered with a non-2xx status.
    #[error("Unexpected status {status}{}: {body}", format_context(.context))]
    Status { status: u16, body: String, context: Option<Cow<'static, str>> },

    /// The body was not JSON or had neither of the accepted shapes.
    #[error("Malformed response{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl FetchError {
    pub(crate) fn malformed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Malformed { message: message.into(), context: None }
    }

    /// HTTP status when the server answered at all.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request { .. } | Self::Malformed { .. } => None,
        }
    }
}
