//! # CLI Argument Definitions

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use csync::domain::ContactStatus;
use csync::domain::config::ApiConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "csync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Browse, create and export contacts of a FluentCRM site")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the `[api]` config section.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Config file (toml, json, yaml); `./csync.*` is used when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Site root, e.g. https://crm.example.com
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Application password
    #[arg(short, long, global = true, env = "CSYNC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Contacts requested per page
    #[arg(long, global = true)]
    pub per_page: Option<u32>,

    /// Stop after this many contacts
    #[arg(long, global = true)]
    pub max_records: Option<usize>,
}

impl ConnectionArgs {
    /// Layers the flags that were given over the loaded settings.
    pub fn apply(&self, mut api: ApiConfig) -> ApiConfig {
        if let Some(url) = &self.base_url {
            api.base_url.clone_from(url);
        }
        if let Some(username) = &self.username {
            api.username.clone_from(username);
        }
        if let Some(password) = &self.password {
            api.password.clone_from(password);
        }
        if let Some(per_page) = self.per_page {
            api.per_page = per_page;
        }
        if self.max_records.is_some() {
            api.max_records = self.max_records;
        }
        api
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify the base URL and credentials
    TestConnection,
    /// Browse and create contacts
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
    /// List the custom field definitions
    Fields,
    /// Write JSON exports to a directory
    Export {
        /// Target directory
        #[arg(long, global = true, default_value = ".")]
        out: PathBuf,

        #[command(subcommand)]
        target: ExportTarget,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContactsAction {
    /// Table of all contacts
    List,
    /// Details of one contact
    Show { id: String },
    /// Create a contact
    Create(Box<CreateArgs>),
}

#[derive(Debug, Subcommand)]
pub enum ExportTarget {
    /// Every contact, verbatim
    All,
    /// A linear workflow over the selected contacts
    Workflow {
        /// Contact id to include (repeatable)
        #[arg(long = "id", required = true)]
        ids: Vec<String>,
    },
    /// Custom field definitions
    Fields,
    /// A single contact
    Contact { id: String },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value_t = ContactStatus::Subscribed)]
    pub status: ContactStatus,

    #[arg(long, default_value = "")]
    pub prefix: String,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,

    #[arg(long, default_value = "")]
    pub address_line_1: String,

    #[arg(long, default_value = "")]
    pub address_line_2: String,

    #[arg(long, default_value = "")]
    pub city: String,

    #[arg(long, default_value = "")]
    pub state: String,

    #[arg(long, default_value = "")]
    pub postal_code: String,

    #[arg(long, default_value = "")]
    pub country: String,

    /// Tag id (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// List id (repeatable)
    #[arg(long = "list")]
    pub lists: Vec<String>,

    /// Custom field answer as slug=value; checkbox values may be comma-separated
    #[arg(long = "custom", value_parser = parse_custom)]
    pub custom: Vec<(String, String)>,
}

fn parse_custom(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(slug, value)| (slug.trim().to_owned(), value.to_owned()))
        .filter(|(slug, _)| !slug.is_empty())
        .ok_or_else(|| format!("expected slug=value, got `{raw}`"))
}
