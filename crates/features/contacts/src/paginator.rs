//! Page loop over a list endpoint.

use crate::error::{FetchError, FetchErrorExt};
use crate::normalize::{InvalidRecordError, normalize_batch};
use crate::page::parse_page;
use csync_api::{ApiClient, ApiRequest};
use csync_domain::constants::{DEFAULT_PER_PAGE, MAX_PAGES};
use csync_domain::{PageResult, Record, RecordId};
use fxhash::FxHashSet;
use tracing::{debug, info, instrument, warn};

/// Reported after every page that was fetched and normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    pub page: u32,
    /// Valid records accumulated so far, before any truncation.
    pub fetched: usize,
    pub total: Option<u64>,
}

/// Why the page loop ended.
#[derive(Debug)]
pub enum StopReason {
    /// A page yielded no valid record with an id not seen before.
    Exhausted,
    /// The server reported `current_page >= last_page`.
    LastPage,
    /// The body was a bare array, i.e. the whole collection in one response.
    SinglePage,
    /// The caller's record limit was reached; the result was truncated to it.
    MaxRecords,
    /// The fixed page ceiling was hit; the result is degraded.
    PageCeiling,
    /// A page failed; records from earlier pages are kept.
    Failed(FetchError),
}

/// Everything one `fetch_all` produced.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Valid records in arrival order. Duplicate ids are kept, see `duplicate_ids`.
    pub records: Vec<Record>,
    pub rejected: Vec<InvalidRecordError>,
    /// Ids seen more than once across pages, in order of their repeat.
    pub duplicate_ids: Vec<RecordId>,
    /// API calls made.
    pub pages: u32,
    pub total_reported: Option<u64>,
    pub stop: StopReason,
}

impl FetchOutcome {
    /// True when the loop ended on a regular stop rule rather than a failure or the ceiling.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !matches!(self.stop, StopReason::Failed(_) | StopReason::PageCeiling)
    }

    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match &self.stop {
            StopReason::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Walks a paginated endpoint from page 1 with `per_page` and `page` query parameters.
///
/// ```rust,no_run
/// use csync_contacts::Paginator;
/// # fn demo(client: &csync_api::ApiClient) {
/// let outcome = Paginator::new(client, "subscribers")
///     .per_page(50)
///     .max_records(Some(120))
///     .fetch_all();
/// assert!(outcome.records.len() <= 120);
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct Paginator<'a> {
    client: &'a ApiClient,
    endpoint: String,
    per_page: u32,
    max_records: Option<usize>,
    extra_query: Vec<(String, String)>,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a ApiClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            per_page: DEFAULT_PER_PAGE,
            max_records: None,
            extra_query: Vec::new(),
        }
    }

    /// Page size; zero is raised to one.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub const fn max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    /// Adds a query parameter sent with every page request.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.extra_query.push((name.into(), value.to_string()));
        self
    }

    pub fn fetch_all(&self) -> FetchOutcome {
        self.fetch_all_with(|_| {})
    }

    /// Runs the page loop, calling `on_page` after each page.
    ///
    /// Never fails as a whole: a failing page ends the loop with
    /// [`StopReason::Failed`] and everything accumulated before it.
    #[instrument(skip_all, fields(endpoint = %self.endpoint, per_page = self.per_page))]
    pub fn fetch_all_with(&self, mut on_page: impl FnMut(&PageProgress)) -> FetchOutcome {
        let mut outcome = FetchOutcome {
            records: Vec::new(),
            rejected: Vec::new(),
            duplicate_ids: Vec::new(),
            pages: 0,
            total_reported: None,
            stop: StopReason::PageCeiling,
        };

        if self.max_records == Some(0) {
            outcome.stop = StopReason::MaxRecords;
            return outcome;
        }

        let mut seen = FxHashSet::default();

        for page in 1..=MAX_PAGES {
            outcome.pages = page;
            let result = match self.fetch_page(page) {
                Ok(result) => result,
                Err(err) => {
                    warn!(page, error = %err, kept = outcome.records.len(), "page fetch failed");
                    outcome.stop = StopReason::Failed(err);
                    return outcome;
                },
            };

            outcome.total_reported = outcome.total_reported.or(result.meta.total);
            let is_last = result.is_last(u64::from(page));
            let single = result.complete;

            let batch = normalize_batch(result.entries, &format!("page {page}"));
            let mut added = 0;
            for record in &batch.records {
                if seen.insert(record.id().clone()) {
                    added += 1;
                } else {
                    warn!(page, id = %record.id(), "duplicate record id");
                    outcome.duplicate_ids.push(record.id().clone());
                }
            }
            outcome.rejected.extend(batch.rejected);
            // A page of nothing but known ids is a replay; it ends the loop unrecorded.
            if added > 0 {
                outcome.records.extend(batch.records);
            }

            debug!(page, added, accumulated = outcome.records.len(), "page processed");
            on_page(&PageProgress {
                page,
                fetched: outcome.records.len(),
                total: outcome.total_reported,
            });

            if let Some(max) = self.max_records
                && outcome.records.len() >= max
            {
                outcome.records.truncate(max);
                outcome.stop = StopReason::MaxRecords;
                break;
            }
            if added == 0 {
                outcome.stop = StopReason::Exhausted;
                break;
            }
            if single {
                outcome.stop = StopReason::SinglePage;
                break;
            }
            if is_last {
                outcome.stop = StopReason::LastPage;
                break;
            }
        }

        if matches!(outcome.stop, StopReason::PageCeiling) {
            warn!(pages = outcome.pages, "page ceiling reached, result is incomplete");
        }
        info!(
            pages = outcome.pages,
            records = outcome.records.len(),
            dropped = outcome.rejected.len(),
            stop = ?outcome.stop,
            "fetch finished"
        );

        outcome
    }

    fn fetch_page(&self, page: u32) -> Result<PageResult, FetchError> {
        let context = format!("{} page {page}", self.endpoint);

        let mut request =
            ApiRequest::get(&self.endpoint).query("per_page", self.per_page).query("page", page);
        for (name, value) in &self.extra_query {
            request = request.query(name.clone(), value);
        }

        let response = self.client.send(request).context(context.clone())?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                body: response.snippet(500),
                context: Some(context.into()),
            });
        }

        let body = response.json().map_err(|e| FetchError::Malformed {
            message: format!("body is not JSON: {e}").into(),
            context: Some(context.clone().into()),
        })?;

        Ok(parse_page(body).context(context)?.into())
    }
}
