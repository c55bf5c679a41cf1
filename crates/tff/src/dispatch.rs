//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split into those that run without an API token (configuration,
//! completions) and those that need an authenticated client.

use feedfactory_api::prelude::{FeedFactoryClient, ResourceKind};

use crate::cli::{
    AccountsCommands, Cli, Commands, ConfigCommands, DictionaryCommands, EventCommands,
    ResourceCommands,
};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that can be executed without authentication.
pub trait NoAuthCommand {
    /// Execute the command without requiring an API token.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that require authentication.
#[allow(async_fn_in_trait)]
pub trait AuthCommand {
    /// Execute the command with an authenticated client.
    async fn execute(&self, ctx: &CommandContext, client: &FeedFactoryClient) -> Result<()>;
}

/// Commands that don't require authentication.
pub enum NoAuthDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a crate::cli::Shell),
    Help,
}

impl<'a> NoAuthDispatch<'a> {
    /// Try to create a no-auth dispatch from the CLI command.
    /// Returns None if the command requires authentication or is interactive.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config {
                command: Some(ConfigCommands::Edit),
            }) => None,
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl NoAuthCommand for NoAuthDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("tff - FeedFactory CLI");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch synchronous config subcommands. `config edit` is handled by the
/// caller since it waits on the editor.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Edit) => {
            Err(CommandError::Config("edit requires async context".into()))
        }
    }
}

/// Commands that require authentication.
pub enum AuthDispatch<'a> {
    Events(&'a EventCommands),
    Resource {
        kind: ResourceKind,
        command: &'a ResourceCommands,
    },
    Dictionary(&'a DictionaryCommands),
    Accounts(&'a AccountsCommands),
}

impl<'a> AuthDispatch<'a> {
    /// Create an auth dispatch from the CLI command.
    /// Returns None if the command doesn't require authentication.
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        let group = cli.command.as_ref()?;
        match group {
            Commands::Events { command } => Some(Self::Events(command)),
            Commands::Locations { command }
            | Commands::Routes { command }
            | Commands::Venues { command }
            | Commands::EventGroups { command } => Some(Self::Resource {
                kind: group.resource_kind()?,
                command,
            }),
            Commands::Dictionary { command } => Some(Self::Dictionary(command)),
            Commands::Accounts { command } => Some(Self::Accounts(command)),
            Commands::Configure | Commands::Config { .. } | Commands::Completions { .. } => None,
        }
    }
}

impl AuthCommand for AuthDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext, client: &FeedFactoryClient) -> Result<()> {
        match self {
            Self::Events(command) => commands::resources::execute_events(ctx, client, command).await,
            Self::Resource { kind, command } => {
                commands::resources::execute(ctx, client, *kind, command).await
            }
            Self::Dictionary(command) => commands::dictionary::execute(ctx, client, command).await,
            Self::Accounts(command) => commands::accounts::execute(ctx, client, command).await,
        }
    }
}
