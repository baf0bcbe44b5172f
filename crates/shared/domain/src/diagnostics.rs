use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// Category of an error retained in the session error log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Auth,
    NotFound,
    Status,
    MalformedResponse,
    Validation,
    InvalidRecord,
    NotAuthenticated,
    Export,
}
