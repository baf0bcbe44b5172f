//! Terminal rendering. The only module allowed to print.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use csync::view::{ContactDetail, ContactRow, FieldSchemaView};
use serde_json::Value;

pub fn success(message: &str) {
    println!("{message}");
}

pub fn notice(message: &str) {
    eprintln!("warning: {message}");
}

pub fn contacts(rows: &[ContactRow]) {
    if rows.is_empty() {
        println!("No contacts found.");
        return;
    }

    println!(
        "{:<8} {:<24} {:<32} {:<13} {:<16} {:<20}",
        "ID", "Name", "Email", "Status", "Phone", "Created"
    );
    println!("{:-<118}", "");
    for row in rows {
        println!(
            "{:<8} {:<24} {:<32} {:<13} {:<16} {:<20}",
            row.id, row.name, row.email, row.status, row.phone, row.created
        );
    }
    println!("\n{} contacts", rows.len());
}

pub fn detail(contact: &ContactDetail) {
    let lines = [
        ("ID", &contact.id),
        ("Name", &contact.name),
        ("Email", &contact.email),
        ("Phone", &contact.phone),
        ("Status", &contact.status),
        ("Date of birth", &contact.date_of_birth),
        ("Address", &contact.address_line_1),
        ("", &contact.address_line_2),
        ("City", &contact.city),
        ("State", &contact.state),
        ("Postal code", &contact.postal_code),
        ("Country", &contact.country),
        ("Tags", &contact.tags),
        ("Lists", &contact.lists),
        ("Photo", &contact.photo),
    ];
    for (label, value) in lines {
        println!("{label:<14} {value}");
    }
}

pub fn fields(fields: &[FieldSchemaView]) {
    if fields.is_empty() {
        println!("No custom fields defined.");
        return;
    }

    println!("{:<24} {:<12} {:<20} {:<20} Options", "Label", "Type", "Slug", "Key");
    println!("{:-<100}", "");
    for field in fields {
        println!(
            "{:<24} {:<12} {:<20} {:<20} {}",
            field.label,
            field.field_type,
            field.slug,
            field.field_key,
            field.options.join(", ")
        );
    }
}

pub fn created(echo: &Value) {
    println!("Contact created.");
    match serde_json::to_string_pretty(echo) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{echo}"),
    }
}
