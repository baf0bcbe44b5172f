use csync_domain::config::Credentials;
use serde_json::Value;
use std::time::Duration;
use strum_macros::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

/// A fully resolved request, ready for a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub credentials: Credentials,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Looks up a query parameter by name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}

/// Endpoint-relative request description used by [`ApiClient`](crate::ApiClient).
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub(crate) endpoint: String,
    pub(crate) method: Method,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
    pub(crate) timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Method::Get)
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(endpoint, Method::Post);
        request.body = Some(body);
        request
    }

    fn new(endpoint: impl Into<String>, method: Method) -> Self {
        Self { endpoint: endpoint.into(), method, query: Vec::new(), body: None, timeout: None }
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Overrides the client's default timeout for this request only.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
