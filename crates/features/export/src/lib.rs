//! # Export
//!
//! Output shapes for fetched contacts:
//!
//! * [`to_json_document`]: the records verbatim, pretty-printed.
//! * [`to_workflow_graph`]: one node per record chained in selection order.
//!
//! Plus the plumbing around them: [`ExportKind::file_name`], [`download_link`],
//! [`select_records`] and [`write_export`].

mod artifact;
mod document;
mod error;
mod select;
mod workflow;

pub use artifact::{ExportKind, download_link, write_export};
pub use document::to_json_document;
pub use error::{ExportError, ExportErrorExt};
pub use select::select_records;
pub use workflow::{
    Connections, NODE_TYPE, NamedValue, NodeParameters, NodeValues, WorkflowGraph, WorkflowNode,
    node_id, to_workflow_graph,
};
