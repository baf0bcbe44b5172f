//! # Forms
//!
//! Schema-driven contact creation.
//!
//! [`FormModel::build`] maps each server [`FieldSchema`](csync_domain::FieldSchema) onto an
//! [`InputSlot`] by exhaustive match over the field kind. [`serialize`] turns collected
//! answers into a [`CreatePayload`]: email is mandatory, blanks are omitted rather than sent
//! as empty strings.

mod contact;
mod error;
mod model;
mod payload;
mod value;

pub use contact::CoreFields;
pub use error::{FormError, FormErrorExt};
pub use model::{FieldInput, FormModel, InputSlot};
pub use payload::{CreatePayload, serialize};
pub use value::CustomValue;
