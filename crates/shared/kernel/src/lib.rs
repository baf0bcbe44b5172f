//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it provides config loading and the per-session state
//! primitives (collection cache, error log) that feature slices and the facade share.
//!
//! ## Config loading
//! ```rust,ignore
//! use csync_kernel::config::load_config;
//! let cfg: csync_kernel::domain::config::AppConfig = load_config(Some("csync.toml")).unwrap();
//! ```
pub mod cache;
pub mod config;
pub mod error_log;

pub use cache::{Fill, SessionCache};
pub use csync_domain as domain;
pub use error_log::{ErrorEntry, ErrorLog};
