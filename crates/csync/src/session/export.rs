use super::Session;
use crate::SessionError;
use chrono::{Local, NaiveDateTime};
use csync_domain::RecordId;
use csync_export::{
    ExportKind, download_link, select_records, to_json_document, to_workflow_graph, write_export,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// A rendered export, ready to be offered as a download or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub kind: ExportKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    fn new(kind: ExportKind, at: NaiveDateTime, bytes: Vec<u8>) -> Self {
        let file_name = kind.file_name(at);
        info!(kind = %kind, file = %file_name, bytes = bytes.len(), "export rendered");
        Self { kind, file_name, bytes }
    }

    /// HTML anchor carrying the artifact as a base64 data URI.
    #[must_use]
    pub fn download_link(&self, text: &str) -> String {
        download_link(&self.bytes, &self.file_name, text)
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, SessionError> {
        write_export(dir, &self.file_name, &self.bytes).map_err(|source| SessionError::Export {
            source,
            context: Some(format!("Saving {}", self.kind).into()),
        })
    }
}

impl Session {
    /// Every loaded contact as a pretty JSON document.
    pub fn export_all(&self) -> Result<ExportArtifact, SessionError> {
        let records = self.records()?;
        self.render(ExportKind::AllContacts, || to_json_document(records.as_slice()))
    }

    /// A linear workflow over the contacts whose ids are in `ids`, in collection order.
    pub fn export_workflow(&self, ids: &[RecordId]) -> Result<ExportArtifact, SessionError> {
        let records = self.records()?;
        let selected = select_records(&records, ids);
        if selected.is_empty() {
            return Err(self.fail(SessionError::validation("Select at least one contact")));
        }
        let graph = to_workflow_graph(&selected);
        self.render(ExportKind::Workflow, || to_json_document(&graph))
    }

    pub fn export_fields(&self) -> Result<ExportArtifact, SessionError> {
        let schemas = self.field_schemas()?;
        self.render(ExportKind::CustomFields, || to_json_document(schemas.as_slice()))
    }

    pub fn export_contact(&self, id: &RecordId) -> Result<ExportArtifact, SessionError> {
        let Some(record) = self.find_record(id)? else {
            return Err(self.fail(SessionError::NotFound {
                message: format!("no contact with id {id}").into(),
                context: Some("Exporting contact".into()),
            }));
        };
        self.render(ExportKind::Contact(id.clone()), || to_json_document(&record))
    }

    fn render(
        &self,
        kind: ExportKind,
        encode: impl FnOnce() -> Result<Vec<u8>, csync_export::ExportError>,
    ) -> Result<ExportArtifact, SessionError> {
        let bytes = encode().map_err(|source| {
            self.fail(SessionError::Export {
                source,
                context: Some(format!("Rendering {kind}").into()),
            })
        })?;
        Ok(ExportArtifact::new(kind, Local::now().naive_local(), bytes))
    }
}
