pub mod contacts;
pub mod export;

use crate::args::{Command, ContactsAction};
use crate::output;
use anyhow::{Context, Result};
use csync::Session;
use csync::domain::RecordId;
use csync::domain::config::ApiConfig;
use csync::view::FieldSchemaView;

/// Runs one command in a fresh session.
///
/// Input that can be checked offline is checked before any request is sent.
pub fn run(command: Command, api: ApiConfig) -> Result<()> {
    if let Command::Contacts { action: ContactsAction::Create(args) } = &command {
        contacts::precheck(args)?;
    }

    let session = connect(api)?;

    match command {
        Command::TestConnection => {
            output::success(&format!("Connected to {}", session.settings().base_url));
        },
        Command::Contacts { action } => match action {
            ContactsAction::List => contacts::list(&session)?,
            ContactsAction::Show { id } => contacts::show(&session, &id)?,
            ContactsAction::Create(args) => contacts::create(&session, &args)?,
        },
        Command::Fields => {
            let schemas = session.field_schemas()?;
            let views: Vec<FieldSchemaView> = schemas.iter().map(FieldSchemaView::from).collect();
            output::fields(&views);
        },
        Command::Export { out, target } => export::run(&session, target, &out)?,
    }

    Ok(())
}

fn connect(api: ApiConfig) -> Result<Session> {
    let session = Session::builder().config(api).build()?;
    session.test_connection().context("Connection test failed")?;
    Ok(session)
}

pub fn record_id(raw: &str) -> Result<RecordId> {
    RecordId::parse(raw).with_context(|| format!("invalid contact id `{raw}`"))
}
