use serde_json::Value;

/// Status and body of a completed HTTP exchange, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Body shortened for logs and error messages.
    #[must_use]
    pub fn snippet(&self, max_chars: usize) -> String {
        let body = self.body.trim();
        match body.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_owned(),
        }
    }
}
