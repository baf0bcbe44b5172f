//! The per-operator session: settings, API client, caches and error log in one explicit
//! context object.

mod data;
mod export;

pub use data::RecordSet;
pub use export::ExportArtifact;

use crate::SessionError;
use csync_api::{ApiClient, ApiRequest, Transport};
use csync_domain::config::{ApiConfig, Credentials};
use csync_domain::constants::endpoints;
use csync_domain::{FieldSchema, Record};
use csync_kernel::{ErrorEntry, ErrorLog, SessionCache};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// One operator session.
///
/// Holds everything that lives exactly as long as the session: runtime-mutable API settings,
/// the authenticated flag, the record and field-schema caches, and the bounded error log.
/// Nothing here is global and nothing is persisted.
#[derive(Debug)]
pub struct Session {
    settings: ApiConfig,
    client: ApiClient,
    transport: Option<Arc<dyn Transport>>,
    authenticated: AtomicBool,
    records: SessionCache<Vec<Record>>,
    field_schemas: SessionCache<Vec<FieldSchema>>,
    errors: ErrorLog,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    #[must_use]
    pub const fn settings(&self) -> &ApiConfig {
        &self.settings
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    /// Replaces the credential pair. The session must be re-validated afterwards.
    pub fn set_credentials(&mut self, credentials: Credentials) -> Result<(), SessionError> {
        let mut settings = self.settings.clone();
        settings.username = credentials.username;
        settings.password = credentials.password;
        self.apply(settings)
    }

    /// Points the session at another host. The session must be re-validated afterwards.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<(), SessionError> {
        let mut settings = self.settings.clone();
        settings.base_url = base_url.into();
        self.apply(settings)
    }

    pub fn set_per_page(&mut self, per_page: u32) {
        self.settings.per_page = per_page.max(1);
    }

    /// Changing the ceiling drops the cached record set.
    pub fn set_max_records(&mut self, max_records: Option<usize>) {
        if self.settings.max_records != max_records {
            self.settings.max_records = max_records;
            self.records.invalidate();
        }
    }

    fn apply(&mut self, settings: ApiConfig) -> Result<(), SessionError> {
        let client = build_client(&settings, self.transport.clone()).map_err(|e| self.fail(e))?;
        self.settings = settings;
        self.client = client;
        self.authenticated.store(false, Ordering::Release);
        Ok(())
    }

    /// Validates the credentials with a `GET subscribers` bounded by the connect timeout.
    ///
    /// Success marks the session authenticated and empties both caches. Any failure clears
    /// the authenticated flag.
    #[instrument(skip(self), fields(base_url = %self.settings.base_url))]
    pub fn test_connection(&self) -> Result<(), SessionError> {
        if !self.settings.credentials().is_complete() {
            self.authenticated.store(false, Ordering::Release);
            return Err(self.fail(SessionError::validation("Username and password are required")));
        }

        let timeout = Duration::from_secs(self.settings.connect_timeout_secs);
        let outcome = self
            .client
            .send(ApiRequest::get(endpoints::SUBSCRIBERS).timeout(timeout))
            .map_err(|source| SessionError::Transport {
                source,
                context: Some("Testing connection".into()),
            })
            .and_then(|response| match response.status {
                200 => Ok(()),
                status => Err(SessionError::from_status(
                    status,
                    response.snippet(500),
                    &self.settings.base_url,
                    Some("Testing connection".into()),
                )),
            });

        match outcome {
            Ok(()) => {
                self.authenticated.store(true, Ordering::Release);
                self.records.invalidate();
                self.field_schemas.invalidate();
                info!("connection verified");
                Ok(())
            },
            Err(err) => {
                self.authenticated.store(false, Ordering::Release);
                Err(self.fail(err))
            },
        }
    }

    /// Errors seen in this session, oldest first (at most 100).
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorEntry> {
        self.errors.entries()
    }

    pub(crate) fn ensure_authenticated(&self, operation: &'static str) -> Result<(), SessionError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(self.fail(SessionError::NotAuthenticated { context: Some(operation.into()) }))
        }
    }

    /// Logs and retains `err`, then hands it back for propagation.
    pub(crate) fn fail(&self, err: SessionError) -> SessionError {
        self.note(&err);
        err
    }

    /// Logs and records an error the caller recovers from.
    pub(crate) fn note(&self, err: &SessionError) {
        warn!(kind = %err.kind(), error = %err, "session operation failed");
        self.errors.record(err.kind(), err.to_string());
    }

    pub(crate) const fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) const fn error_log(&self) -> &ErrorLog {
        &self.errors
    }
}

/// A fluent builder for [`Session`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct SessionBuilder {
    config: Option<ApiConfig>,
    transport: Option<Arc<dyn Transport>>,
}

impl SessionBuilder {
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the HTTP transport for every client this session builds.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<Session, SessionError> {
        let settings = self.config.unwrap_or_default();
        let client = build_client(&settings, self.transport.clone())?;

        Ok(Session {
            settings,
            client,
            transport: self.transport,
            authenticated: AtomicBool::new(false),
            records: SessionCache::new("records"),
            field_schemas: SessionCache::new("field_schemas"),
            errors: ErrorLog::default(),
        })
    }
}

fn build_client(
    settings: &ApiConfig,
    transport: Option<Arc<dyn Transport>>,
) -> Result<ApiClient, SessionError> {
    let builder = ApiClient::builder().config(settings);
    let builder = match transport {
        Some(transport) => builder.transport(transport),
        None => builder,
    };
    builder.build().map_err(|source| SessionError::Transport {
        source,
        context: Some("Building API client".into()),
    })
}
