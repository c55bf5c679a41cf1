//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the tff CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use feedfactory_api::prelude::ResourceKind;

/// tff - A Rust CLI for the FeedFactory API
#[derive(Parser, Debug)]
#[command(name = "tff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output the raw API response as JSON
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override API token (default: from .env/keyring/config)
    #[arg(long, global = true, env = "FF_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Load environment variables from this .env file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, env = "FF_API_URL", hide = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search, inspect, export and publish events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },

    /// Search, inspect, export and publish locations
    Locations {
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Search, inspect, export and publish routes
    Routes {
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Search, inspect, export and publish venues
    Venues {
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Search, inspect, export and publish event groups
    #[command(name = "eventgroups")]
    EventGroups {
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Look up keywords, markers and categories
    Dictionary {
        #[command(subcommand)]
        command: DictionaryCommands,
    },

    /// Show account information
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },

    /// Set up the API token interactively
    Configure,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// The resource kind a resource command group operates on.
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        match self {
            Commands::Events { .. } => Some(ResourceKind::Event),
            Commands::Locations { .. } => Some(ResourceKind::Location),
            Commands::Routes { .. } => Some(ResourceKind::Route),
            Commands::Venues { .. } => Some(ResourceKind::Venue),
            Commands::EventGroups { .. } => Some(ResourceKind::EventGroup),
            _ => None,
        }
    }
}

/// Event subcommands
#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List and search events
    List(EventListArgs),

    /// Export events to a file (Excel or uitkrant)
    Export(EventExportArgs),

    #[command(flatten)]
    Item(ItemCommands),
}

/// Location, route, venue and event group subcommands
#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// List and search resources
    List(ListArgs),

    /// Export resources to an Excel file
    Export(ExportArgs),

    #[command(flatten)]
    Item(ItemCommands),
}

/// Subcommands that act on a single resource
#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Show all details of a resource
    Get {
        /// Resource ID
        id: String,
    },

    /// Delete a resource
    Delete {
        /// Resource ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Make a resource publicly visible
    Publish {
        /// Resource ID
        id: String,
    },

    /// Hide a resource from public view
    Unpublish {
        /// Resource ID
        id: String,
    },

    /// List the editor comments on a resource
    Comments {
        /// Resource ID
        id: String,
    },

    /// Add an editor comment to a resource
    Comment {
        /// Resource ID
        id: String,

        /// Comment text
        message: String,
    },

    /// Show the revision history of a resource
    Revisions {
        /// Resource ID
        id: String,
    },
}

/// Filters shared by every resource kind
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Full-text search ('tag:keyword' and 'marker:name' are supported)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Comma-separated markers; prefix with '!' to exclude
    #[arg(long)]
    pub markers: Option<String>,

    /// Comma-separated keywords
    #[arg(long)]
    pub keywords: Option<String>,

    /// Comma-separated category types
    #[arg(long)]
    pub types: Option<String>,

    /// Comma-separated categories
    #[arg(long)]
    pub categories: Option<String>,

    /// Workflow status
    #[arg(short = 'w', long = "wfstatus", value_enum)]
    pub wfstatus: Option<WorkflowStatusArg>,

    /// Published state (true/false)
    #[arg(long, value_name = "BOOL")]
    pub published: Option<bool>,

    /// Include deleted resources
    #[arg(long)]
    pub deleted: bool,

    /// Owner (username or email)
    #[arg(long)]
    pub owner: Option<String>,

    /// User organisation (account name without spaces)
    #[arg(long = "userorganisation")]
    pub user_organisation: Option<String>,

    /// TRC ID
    #[arg(long = "trcid")]
    pub trc_id: Option<String>,

    /// External ID
    #[arg(long = "externalid")]
    pub external_id: Option<String>,

    /// Language (nl, en, de)
    #[arg(long = "lang")]
    pub language: Option<String>,

    /// Updated after: 3d, 2w, 1mo, 1y or 2026-01-15
    #[arg(long)]
    pub updated_since: Option<String>,
}

/// Filters only events understand
#[derive(Args, Debug, Default)]
pub struct EventFilterArgs {
    /// Event dates from (relative or yyyy-mm-dd)
    #[arg(long)]
    pub date_from: Option<String>,

    /// Event dates up to (relative or yyyy-mm-dd)
    #[arg(long)]
    pub date_to: Option<String>,

    /// Location ID
    #[arg(long)]
    pub location_id: Option<String>,

    /// City name
    #[arg(long)]
    pub city: Option<String>,

    /// Center point as lat,lon (e.g. 52.37,4.89)
    #[arg(long)]
    pub geo: Option<String>,

    /// Distance from --geo (e.g. 10km)
    #[arg(long)]
    pub geo_distance: Option<String>,
}

/// Arguments for listing resources
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Sort field
    #[arg(short = 'o', long, value_enum, default_value = "modified")]
    pub sort: SortArg,

    /// Sort ascending (default: newest first)
    #[arg(long)]
    pub asc: bool,

    /// Results per page (maximum 5000)
    #[arg(short = 'l', long, default_value = "25")]
    pub size: u32,

    /// Page number (0-indexed)
    #[arg(short, long, default_value = "0")]
    pub page: u32,
}

/// Arguments for listing events
#[derive(Args, Debug)]
pub struct EventListArgs {
    #[command(flatten)]
    pub list: ListArgs,

    #[command(flatten)]
    pub event: EventFilterArgs,
}

/// Arguments for exporting resources
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (e.g. export.xlsx)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Comma-separated category property IDs to add as columns
    #[arg(long = "export-propertyids", value_name = "IDS")]
    pub property_ids: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Sort field
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Sort ascending
    #[arg(long)]
    pub asc: bool,
}

/// Arguments for exporting events
#[derive(Args, Debug)]
pub struct EventExportArgs {
    #[command(flatten)]
    pub export: ExportArgs,

    /// Export format ('uitkrant' requires --date-from and --date-to)
    #[arg(long, value_enum, default_value = "excel")]
    pub format: FormatArg,

    #[command(flatten)]
    pub event: EventFilterArgs,
}

/// Workflow status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkflowStatusArg {
    Draft,
    #[value(name = "readyforvalidation")]
    ReadyForValidation,
    Approved,
    Rejected,
    Deleted,
    Archived,
}

/// Sort fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Modified,
    Created,
    Title,
    #[value(name = "wfstatus")]
    WorkflowStatus,
}

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Excel,
    Uitkrant,
}

/// Dictionary subcommands
#[derive(Subcommand, Debug)]
pub enum DictionaryCommands {
    /// Show the keywords available for a resource type
    Keywords {
        /// Resource type: event, eventGroup, route, location or venue
        kind: ResourceKind,
    },

    /// Show the markers available for a resource type
    Markers {
        /// Resource type: event, eventGroup, route, location or venue
        kind: ResourceKind,
    },

    /// Show the category tree
    Ontology,

    /// List selectable categories with their IDs
    Categories {
        /// Label language
        #[arg(long, default_value = "nl")]
        lang: String,
    },
}

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountsCommands {
    /// Show the authenticated user
    Me,

    /// List available accounts
    List,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open config in $EDITOR
    Edit,

    /// Set a config value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Show config file path
    Path,
}

/// Shell types for completions
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
