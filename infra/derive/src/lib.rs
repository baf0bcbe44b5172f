#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the csync crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! csync-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```
//!
//! Docstring examples are `ignore`d; copy them into consuming crates' tests when needed.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a fully wired error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless the enum already derives them.
/// * `<ErrorName>Ext<T>` with `.context(..)` for `Result<T, ErrorName>` and, for each
///   variant carrying a source, for `Result<T, Source>` as well.
/// * `From<Source> for ErrorName` for variants with a `source` field (or a field marked
///   `#[source]`/`#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A module-private `format_context` helper for `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. A `context` field must be `Option<Cow<'static, str>>`.
/// 4. A variant with a source must also have a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[csync_derive::csync_error]
/// pub enum FetchError {
///     #[error("Decode failure{}: {source}", format_context(.context))]
///     Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fetch error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn decode(raw: &str) -> Result<serde_json::Value, FetchError> {
///     serde_json::from_str(raw).context("Decoding page body")
/// }
/// ```
#[proc_macro_attribute]
pub fn csync_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
