use std::borrow::Cow;

/// Failures that happen before an HTTP status is available.
///
/// Any response that arrives, whatever its status, is returned as a
/// [`RawResponse`](crate::RawResponse) instead.
#[csync_derive::csync_error]
#[derive(Clone)]
pub enum RequestError {
    #[error("Request timed out{}: {message}", format_context(.context))]
    Timeout { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Connection failed{}: {message}", format_context(.context))]
    ConnectionFailure { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Any other transport-level failure (TLS, malformed HTTP, unreadable body).
    #[error("Protocol error{}: {message}", format_context(.context))]
    Protocol { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid endpoint{}: {message}", format_context(.context))]
    InvalidEndpoint { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl RequestError {
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Timeout { message: message.into(), context: None }
    }

    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::ConnectionFailure { message: message.into(), context: None }
    }

    pub fn protocol(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Protocol { message: message.into(), context: None }
    }

    pub fn invalid_endpoint(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidEndpoint { message: message.into(), context: None }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            Self::timeout(message)
        } else if err.is_connect() {
            Self::connection(message)
        } else if err.is_builder() {
            Self::invalid_endpoint(message)
        } else {
            Self::protocol(message)
        }
    }
}
