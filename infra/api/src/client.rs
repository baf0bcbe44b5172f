use crate::transport::{HttpTransport, Transport};
use crate::{ApiRequest, HttpRequest, Method, RawResponse, RequestError};
use csync_domain::config::{ApiConfig, Credentials};
use reqwest::Url;
use serde_json::Value;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Immutable client state. Changing credentials or the base URL means building a new client.
#[derive(Debug)]
pub struct ApiClientInner {
    root: Url,
    credentials: Credentials,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl ApiClientInner {
    /// `<base_url>/<api_prefix>/`, always with a trailing slash.
    #[must_use]
    pub const fn root(&self) -> &Url {
        &self.root
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Cheaply cloneable handle to the contact API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Resolves `endpoint` below the API root.
    pub fn url(&self, endpoint: &str) -> Result<Url, RequestError> {
        self.inner
            .root
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| RequestError::invalid_endpoint(format!("{endpoint}: {e}")))
    }

    /// Performs one request with the client's credentials.
    ///
    /// Non-2xx statuses are returned as-is; only transport failures are errors.
    #[instrument(skip_all, fields(method = %request.method, endpoint = %request.endpoint))]
    pub fn send(&self, request: ApiRequest) -> Result<RawResponse, RequestError> {
        let url = self.url(&request.endpoint)?;
        let http = HttpRequest {
            method: request.method,
            url: url.into(),
            query: request.query,
            credentials: self.inner.credentials.clone(),
            body: request.body,
            timeout: request.timeout.unwrap_or(self.inner.timeout),
        };

        match self.inner.transport.send(&http) {
            Ok(response) => {
                if !response.is_success() {
                    let body = response.snippet(200);
                    warn!(status = response.status, %body, "non-success status");
                }
                Ok(response)
            },
            Err(err) => {
                debug!(error = %err, "request failed");
                Err(err)
            },
        }
    }

    /// `request(endpoint, method, body, timeout)` in a single call.
    pub fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
        timeout: Option<Duration>,
    ) -> Result<RawResponse, RequestError> {
        let mut request = match method {
            Method::Get => ApiRequest::get(endpoint),
            Method::Post => ApiRequest::post(endpoint, body.unwrap_or(Value::Null)),
        };
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        self.send(request)
    }
}

impl Deref for ApiClient {
    type Target = ApiClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// A fluent builder for [`ApiClient`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    api_prefix: Option<String>,
    credentials: Option<Credentials>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds every setting from the `[api]` config section.
    pub fn config(self, config: &ApiConfig) -> Self {
        self.base_url(&config.base_url)
            .api_prefix(&config.api_prefix)
            .credentials(config.credentials())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Default total timeout per request.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Replaces the HTTP transport, e.g. with a scripted one in tests.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validates the base URL and assembles the client.
    ///
    /// # Errors
    /// * [`RequestError::InvalidEndpoint`] when the base URL is missing, unparsable or not
    ///   `http(s)`.
    /// * Whatever [`HttpTransport::new`] returns when no transport was injected.
    pub fn build(self) -> Result<ApiClient, RequestError> {
        let defaults = ApiConfig::default();
        let base = self.base_url.unwrap_or(defaults.base_url);
        let prefix = self.api_prefix.unwrap_or(defaults.api_prefix);
        let root = api_root(&base, &prefix)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(
                self.connect_timeout
                    .unwrap_or_else(|| Duration::from_secs(defaults.connect_timeout_secs)),
            )?),
        };

        debug!(root = %root, "api client ready");

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                root,
                credentials: self.credentials.unwrap_or_default(),
                timeout: self.timeout.unwrap_or_else(|| Duration::from_secs(defaults.timeout_secs)),
                transport,
            }),
        })
    }
}

fn api_root(base: &str, prefix: &str) -> Result<Url, RequestError> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(RequestError::invalid_endpoint("base URL is empty"));
    }

    let prefix = prefix.trim().trim_matches('/');
    let joined =
        if prefix.is_empty() { format!("{base}/") } else { format!("{base}/{prefix}/") };

    let url = Url::parse(&joined)
        .map_err(|e| RequestError::invalid_endpoint(format!("{base}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RequestError::invalid_endpoint(format!("unsupported scheme '{other}'"))),
    }
}
