use super::record_id;
use crate::args::ExportTarget;
use crate::output;
use anyhow::Result;
use csync::Session;
use std::path::Path;

pub fn run(session: &Session, target: ExportTarget, out: &Path) -> Result<()> {
    let artifact = match target {
        ExportTarget::All => session.export_all()?,
        ExportTarget::Workflow { ids } => {
            let ids = ids.iter().map(|id| record_id(id)).collect::<Result<Vec<_>>>()?;
            session.export_workflow(&ids)?
        },
        ExportTarget::Fields => session.export_fields()?,
        ExportTarget::Contact { id } => session.export_contact(&record_id(&id)?)?,
    };

    let path = artifact.write_to(out)?;
    output::success(&format!("Exported {} to {}", artifact.kind, path.display()));
    Ok(())
}
