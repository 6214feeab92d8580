//! Command line front end over [`ContentQueue`](cs_app::ContentQueue).

mod render;
mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cs_core::content::{ContentStatus, SortKey};

pub use run::run;

#[derive(Debug, Parser)]
#[command(name = "content-stack")]
#[command(version, about = "Content inbox client", long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/content-stack/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the queue with optional filters
    List(ListArgs),
    /// Submit new content
    Add {
        #[command(subcommand)]
        source: AddSource,
        /// Add even if the backend reports a duplicate
        #[arg(short, long, global = true)]
        force: bool,
    },
    /// Edit an item's title, tags, category or status
    Update(UpdateArgs),
    /// Delete one item
    Remove { id: String },
    /// Delete several items after confirmation
    BulkRemove {
        #[arg(required = true)]
        ids: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Full-text search on the backend
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Compare the local queue with the backend (exit code 2 when out of sync)
    CheckSync {
        #[arg(long)]
        json: bool,
    },
    /// Branding settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AddSource {
    /// Plain text; reads stdin when omitted
    Paste { text: Option<String> },
    /// A web page to fetch
    Url { url: String },
    /// A local file
    File {
        path: PathBuf,
        /// Submit as a drag-and-drop instead of an upload
        #[arg(long)]
        drop: bool,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive match on title and content
    #[arg(short, long)]
    pub text: Option<String>,
    #[arg(short, long)]
    pub status: Option<ContentStatus>,
    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_enum, default_value_t = SortArg::Timestamp)]
    pub sort: SortArg,
    /// Ascending order (newest first otherwise)
    #[arg(long)]
    pub asc: bool,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    /// Replaces all tags; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub status: Option<ContentStatus>,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        company_name: Option<String>,
        #[arg(long)]
        primary_color: Option<String>,
    },
    /// Store an image file as the logo
    Logo { path: PathBuf },
    ClearLogo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Timestamp,
    Title,
    Size,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Timestamp => SortKey::Timestamp,
            SortArg::Title => SortKey::Title,
            SortArg::Size => SortKey::Size,
        }
    }
}
