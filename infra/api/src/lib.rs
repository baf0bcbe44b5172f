//! # API Client
//!
//! Thin blocking client for the contact REST API.
//!
//! * [`ApiClient`] resolves endpoints below `<base_url>/<api_prefix>/`, attaches HTTP Basic
//!   credentials and applies a per-request timeout.
//! * Transport failures surface as [`RequestError`] (`Timeout`, `ConnectionFailure`,
//!   `Protocol`). Every response that arrives is returned as a [`RawResponse`], whatever
//!   its status. Nothing is retried.
//! * The HTTP layer sits behind the [`Transport`] trait; the `mock` feature adds
//!   [`mock::ScriptedTransport`] for tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use csync_api::{ApiClient, ApiRequest};
//! use csync_domain::config::Credentials;
//!
//! let client = ApiClient::builder()
//!     .base_url("https://crm.example.com")
//!     .credentials(Credentials::new("api-user", "app-password"))
//!     .build()?;
//!
//! let response = client.send(ApiRequest::get("subscribers").query("per_page", 100))?;
//! assert!(response.is_success());
//! # Ok::<(), csync_api::RequestError>(())
//! ```

mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod request;
mod response;
mod transport;

pub use client::{ApiClient, ApiClientBuilder, ApiClientInner};
pub use error::{RequestError, RequestErrorExt};
pub use request::{ApiRequest, HttpRequest, Method};
pub use response::RawResponse;
pub use transport::{HttpTransport, Transport};
