//! Export artifacts: file names, data-URI links and files on disk.

use crate::error::{ExportError, ExportErrorExt};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDateTime;
use csync_domain::RecordId;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// What an export file contains; decides its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportKind {
    AllContacts,
    Workflow,
    CustomFields,
    Contact(RecordId),
}

impl ExportKind {
    /// `all_contacts_20240131_093000.json`, `contact_42.json`, ...
    #[must_use]
    pub fn file_name(&self, at: NaiveDateTime) -> String {
        let stamp = at.format(TIMESTAMP_FORMAT);
        match self {
            Self::AllContacts => format!("all_contacts_{stamp}.json"),
            Self::Workflow => format!("n8n_workflow_{stamp}.json"),
            Self::CustomFields => format!("custom_fields_{stamp}.json"),
            Self::Contact(id) => format!("contact_{}.json", sanitize(&id.to_string())),
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllContacts => f.write_str("all contacts"),
            Self::Workflow => f.write_str("workflow"),
            Self::CustomFields => f.write_str("custom fields"),
            Self::Contact(id) => write!(f, "contact {id}"),
        }
    }
}

/// Text ids end up in file names; keep them to a safe character set.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// HTML anchor embedding `bytes` as a base64 data URI.
#[must_use]
pub fn download_link(bytes: &[u8], file_name: &str, text: &str) -> String {
    let encoded = STANDARD.encode(bytes);
    format!(r#"<a href="data:file/json;base64,{encoded}" download="{file_name}">{text}</a>"#)
}

/// Writes an export into `dir`, creating the directory when needed.
pub fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).context(format!("Creating {}", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, bytes).context(format!("Writing {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(path)
}
