use super::record_id;
use crate::args::CreateArgs;
use crate::output;
use anyhow::{Result, bail};
use csync::Session;
use csync::domain::RecordId;
use csync::features::forms::{CoreFields, CustomValue, serialize};
use csync::view::{ContactDetail, ContactRow};

pub fn list(session: &Session) -> Result<()> {
    let set = session.load_records()?;
    let rows: Vec<ContactRow> = set.records.iter().map(ContactRow::from).collect();
    output::contacts(&rows);

    if set.dropped > 0 {
        output::notice(&format!("{} invalid entries were skipped", set.dropped));
    }
    if !set.duplicates.is_empty() {
        output::notice(&format!("{} duplicate ids were returned", set.duplicates.len()));
    }
    if let Some(err) = &set.degraded {
        output::notice(&format!("Loading stopped early: {err}"));
    }
    Ok(())
}

pub fn show(session: &Session, id: &str) -> Result<()> {
    let id = record_id(id)?;
    let Some(record) = session.find_record(&id)? else {
        bail!("no contact with id {id}");
    };
    output::detail(&ContactDetail::from(&record));
    Ok(())
}

/// Rejects a blank email before connecting.
pub fn precheck(args: &CreateArgs) -> Result<()> {
    serialize(&core_fields(args), Vec::<(String, CustomValue)>::new(), &[], &[])?;
    Ok(())
}

pub fn create(session: &Session, args: &CreateArgs) -> Result<()> {
    let form = session.form_model()?;
    let pairs = args.custom.iter().map(|(slug, value)| (slug.as_str(), value.as_str()));
    let custom = form.parse_answers(pairs)?;
    let tags = ids(&args.tags)?;
    let lists = ids(&args.lists)?;

    let created = session.submit_form(&form, &core_fields(args), custom, &tags, &lists)?;
    output::created(&created);
    Ok(())
}

fn core_fields(args: &CreateArgs) -> CoreFields {
    CoreFields {
        email: args.email.clone(),
        status: args.status,
        prefix: args.prefix.clone(),
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        phone: args.phone.clone(),
        date_of_birth: args.date_of_birth,
        address_line_1: args.address_line_1.clone(),
        address_line_2: args.address_line_2.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        postal_code: args.postal_code.clone(),
        country: args.country.clone(),
    }
}

fn ids(raw: &[String]) -> Result<Vec<RecordId>> {
    raw.iter().map(|id| record_id(id)).collect()
}
