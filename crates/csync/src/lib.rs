//! Facade crate for the contact sync layer.
//! Re-exports the shared and feature crates and owns the per-operator [`Session`].
//! Keep this crate thin: it should compose other crates, with the session as the only state.
//!
//! ## Usage
//! - Build a [`Session`] from the `[api]` config section.
//! - Call [`Session::test_connection`] before any data operation; the session refuses data
//!   calls until the credentials were verified.
//!
//! ```rust,no_run
//! use csync::Session;
//! use csync::domain::config::ApiConfig;
//!
//! let session = Session::builder().config(ApiConfig::default()).build()?;
//! session.test_connection()?;
//! for record in session.records()?.iter() {
//!     println!("{}", csync::view::contact_label(record));
//! }
//! # Ok::<(), csync::SessionError>(())
//! ```

mod error;
mod session;
pub mod view;

pub use csync_api as api;
pub use csync_domain as domain;
pub use csync_kernel as kernel;

pub use error::{SessionError, SessionErrorExt};
pub use session::{ExportArtifact, RecordSet, Session, SessionBuilder};

/// Feature slices composed by the session.
pub mod features {
    pub use csync_contacts as contacts;
    pub use csync_export as export;
    pub use csync_forms as forms;
}
