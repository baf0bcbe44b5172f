//! Data operations: records, field schemas, catalogs and contact creation.

use super::Session;
use crate::SessionError;
use csync_api::ApiRequest;
use csync_contacts::{
    FetchError, Paginator, StopReason, fetch_field_schemas, fetch_lists, fetch_tags,
};
use csync_domain::constants::endpoints;
use csync_domain::{EntityRef, ErrorKind, FieldSchema, Record, RecordId};
use csync_forms::{CoreFields, CreatePayload, CustomValue, FormModel};
use csync_kernel::Fill;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

/// The record collection as handed to views and exports.
#[derive(Debug)]
pub struct RecordSet {
    pub records: Arc<Vec<Record>>,
    /// Served from the session cache without network I/O.
    pub from_cache: bool,
    /// Entries rejected by normalization during this fetch.
    pub dropped: usize,
    /// Ids that appeared more than once across pages.
    pub duplicates: Vec<RecordId>,
    /// Set when the fetch stopped early; `records` holds what arrived before it.
    pub degraded: Option<SessionError>,
    pub total_reported: Option<u64>,
}

/// Fetch bookkeeping that is not cached alongside the records.
#[derive(Debug)]
struct FetchSummary {
    dropped: usize,
    duplicates: Vec<RecordId>,
    degraded: Option<SessionError>,
    total_reported: Option<u64>,
}

impl RecordSet {
    fn cached(records: Arc<Vec<Record>>) -> Self {
        Self {
            records,
            from_cache: true,
            dropped: 0,
            duplicates: Vec::new(),
            degraded: None,
            total_reported: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Session {
    /// Returns every contact, from the cache when populated.
    ///
    /// A miss runs the page loop. Complete results are cached; a result cut short by a
    /// failure or the page ceiling is returned but not cached, so the next call fetches
    /// again. A failure before any record arrived is an error.
    #[instrument(skip(self))]
    pub fn load_records(&self) -> Result<RecordSet, SessionError> {
        self.ensure_authenticated("Loading contacts")?;

        let mut summary = None;
        let records = self.records.get_or_try_fill(|| {
            let (records, fetched) = self.fetch_records()?;
            let cacheable = fetched.degraded.is_none();
            summary = Some(fetched);
            let fill = if cacheable { Fill::Store(records) } else { Fill::Pass(records) };
            Ok::<_, SessionError>(fill)
        })?;

        Ok(match summary {
            Some(fetched) => RecordSet {
                records,
                from_cache: false,
                dropped: fetched.dropped,
                duplicates: fetched.duplicates,
                degraded: fetched.degraded,
                total_reported: fetched.total_reported,
            },
            None => RecordSet::cached(records),
        })
    }

    /// Shorthand for [`Session::load_records`] when only the collection matters.
    pub fn records(&self) -> Result<Arc<Vec<Record>>, SessionError> {
        self.load_records().map(|set| set.records)
    }

    /// Empties the record cache and fetches again.
    pub fn refresh(&self) -> Result<RecordSet, SessionError> {
        self.records.invalidate();
        self.load_records()
    }

    pub fn find_record(&self, id: &RecordId) -> Result<Option<Record>, SessionError> {
        Ok(self.records()?.iter().find(|r| r.id() == id).cloned())
    }

    fn fetch_records(&self) -> Result<(Vec<Record>, FetchSummary), SessionError> {
        let outcome = Paginator::new(self.client(), endpoints::SUBSCRIBERS)
            .per_page(self.settings.per_page)
            .max_records(self.settings.max_records)
            .query("custom_fields", true)
            .fetch_all_with(|progress| {
                info!(
                    page = progress.page,
                    fetched = progress.fetched,
                    total = ?progress.total,
                    "loading contacts"
                );
            });

        for rejected in &outcome.rejected {
            self.error_log().record(ErrorKind::InvalidRecord, rejected.to_string());
        }

        let degraded = match outcome.stop {
            StopReason::Failed(err) => {
                let err = self.fail(self.classify(err));
                if outcome.records.is_empty() {
                    return Err(err);
                }
                Some(err)
            },
            StopReason::PageCeiling => Some(self.fail(SessionError::MalformedResponse {
                message: format!("page ceiling reached after {} pages", outcome.pages).into(),
                context: Some("Loading contacts".into()),
            })),
            StopReason::Exhausted
            | StopReason::LastPage
            | StopReason::SinglePage
            | StopReason::MaxRecords => None,
        };

        let summary = FetchSummary {
            dropped: outcome.rejected.len(),
            duplicates: outcome.duplicate_ids,
            degraded,
            total_reported: outcome.total_reported,
        };
        Ok((outcome.records, summary))
    }

    /// Custom field definitions, cached separately from records.
    #[instrument(skip(self))]
    pub fn field_schemas(&self) -> Result<Arc<Vec<FieldSchema>>, SessionError> {
        self.ensure_authenticated("Loading custom fields")?;
        self.field_schemas.get_or_try_fill(|| {
            fetch_field_schemas(self.client())
                .map(Fill::Store)
                .map_err(|err| self.fail(self.classify(err)))
        })
    }

    pub fn refresh_field_schemas(&self) -> Result<Arc<Vec<FieldSchema>>, SessionError> {
        self.field_schemas.invalidate();
        self.field_schemas()
    }

    /// Tags offered by the server. A failed fetch yields an empty catalog and an error-log
    /// entry.
    pub fn tags(&self) -> Result<Vec<EntityRef>, SessionError> {
        self.ensure_authenticated("Loading tags")?;
        Ok(self.catalog_or_empty(fetch_tags(self.client())))
    }

    /// Lists offered by the server; failures behave as for [`Session::tags`].
    pub fn lists(&self) -> Result<Vec<EntityRef>, SessionError> {
        self.ensure_authenticated("Loading lists")?;
        Ok(self.catalog_or_empty(fetch_lists(self.client())))
    }

    fn catalog_or_empty(&self, result: Result<Vec<EntityRef>, FetchError>) -> Vec<EntityRef> {
        result.unwrap_or_else(|err| {
            self.note(&self.classify(err));
            Vec::new()
        })
    }

    /// Builds the contact form from the cached field schemas and fresh catalogs.
    pub fn form_model(&self) -> Result<FormModel, SessionError> {
        let schemas = self.field_schemas()?;
        Ok(FormModel::build(&schemas, self.tags()?, self.lists()?))
    }

    /// Posts a new contact. Success returns the server's echo and empties the record cache.
    #[instrument(skip_all)]
    pub fn create_contact(&self, payload: &CreatePayload) -> Result<Value, SessionError> {
        self.ensure_authenticated("Creating contact")?;
        let context = "Creating contact";

        let request = ApiRequest::post(endpoints::SUBSCRIBERS, payload.clone().into_value());
        let response = self.client().send(request).map_err(|source| {
            self.fail(SessionError::Transport { source, context: Some(context.into()) })
        })?;

        if !matches!(response.status, 200 | 201) {
            return Err(self.fail(SessionError::from_status(
                response.status,
                response.snippet(500),
                &self.settings.base_url,
                Some(context.into()),
            )));
        }

        let created = response.json().map_err(|e| {
            self.fail(SessionError::MalformedResponse {
                message: format!("created contact is not JSON: {e}").into(),
                context: Some(context.into()),
            })
        })?;

        self.records.invalidate();
        info!(status = response.status, "contact created");
        Ok(created)
    }

    /// Validates answers against `form`, then creates the contact.
    ///
    /// Validation failures are reported before any request is sent.
    pub fn submit_form(
        &self,
        form: &FormModel,
        core: &CoreFields,
        custom: Vec<(String, CustomValue)>,
        tag_ids: &[RecordId],
        list_ids: &[RecordId],
    ) -> Result<Value, SessionError> {
        let payload = form
            .submit(core, custom, tag_ids, list_ids)
            .map_err(|err| self.fail(SessionError::from(err)))?;
        self.create_contact(&payload)
    }

    fn classify(&self, err: FetchError) -> SessionError {
        SessionError::from_fetch(err, &self.settings.base_url)
    }
}
