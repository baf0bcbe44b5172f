use crate::{HttpRequest, Method, RawResponse, RequestError, RequestErrorExt};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

/// Executes one HTTP exchange. No retries.
///
/// Implementations return `Ok` for every response that arrives, including non-2xx statuses.
pub trait Transport: Send + Sync + fmt::Debug {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, RequestError>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the underlying client. `connect_timeout` bounds TCP/TLS setup only; the total
    /// time per request comes from [`HttpRequest::timeout`].
    pub fn new(connect_timeout: Duration) -> Result<Self, RequestError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!("csync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RequestError::from)
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, RequestError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        }
        .query(&request.query)
        .timeout(request.timeout)
        .header(ACCEPT, HeaderValue::from_static("application/json"));

        let credentials = &request.credentials;
        builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body =
            response.text().map_err(RequestError::from).context("Failed to read response body")?;
        debug!(status, bytes = body.len(), "response received");

        Ok(RawResponse { status, body })
    }
}
