use crate::error::{ExportError, ExportErrorExt};
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

const INDENT: &[u8] = b"    ";

/// Pretty-prints `value` with 4-space indentation.
///
/// Records serialize their fields in arrival order, so the output keeps each record's key
/// order as received.
pub fn to_json_document<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer).context("Writing JSON document")?;
    Ok(buffer)
}
