//! # Contacts
//!
//! Read side of the contact API.
//!
//! * [`Paginator`] walks `subscribers` page by page and stops on an empty page, the last
//!   page, a record limit, a failure or the fixed 1000-page ceiling. Partial results survive
//!   failures.
//! * [`normalize`] / [`normalize_batch`] turn raw entries into [`Record`](csync_domain::Record)s,
//!   dropping entries that are not objects or lack an `id`.
//! * [`fetch_field_schemas`], [`fetch_tags`] and [`fetch_lists`] read the supporting catalogs.

mod catalog;
mod error;
mod normalize;
mod page;
mod paginator;
mod schema;

pub use catalog::{fetch_lists, fetch_tags, parse_entities};
pub use error::{FetchError, FetchErrorExt};
pub use normalize::{Batch, InvalidRecordError, InvalidRecordErrorExt, normalize, normalize_batch};
pub use page::parse_page;
pub use paginator::{FetchOutcome, PageProgress, Paginator, StopReason};
pub use schema::{fetch_field_schemas, parse_field_schemas};
