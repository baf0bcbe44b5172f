//! # Domain Models
//!
//! Pure data types for the contact sync workspace with minimal dependencies
//! (`serde`, `serde_json`, `strum`).
//! Keep it lean: no I/O, networking, or heavy logic; just data and simple helpers.

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod page;
pub mod record;
pub mod schema;

pub use diagnostics::ErrorKind;
pub use page::{PageMeta, PageResult, PaginatedBody};
pub use record::{ContactStatus, EntityRef, Record, RecordId};
pub use schema::{FieldKind, FieldSchema, FieldType};
