//! Command implementations for the tff CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod accounts;
pub mod completions;
pub mod config;
pub mod dictionary;
pub mod keyring;
pub mod resources;
pub mod setup;

use std::io::{self, IsTerminal};

use dialoguer::Confirm;
use feedfactory_api::prelude::{FeedFactoryClient, QueryError};

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// API or transport error.
    #[error(transparent)]
    Api(#[from] feedfactory_api::error::Error),

    /// Filter validation error.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Filter validation error tied to the flag that caused it.
    #[error("{flag}: {source}")]
    Flag {
        flag: &'static str,
        #[source]
        source: QueryError,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Wraps a validation error with the flag it came from.
    pub fn flag(flag: &'static str) -> impl FnOnce(QueryError) -> Self {
        move |source| CommandError::Flag { flag, source }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are disabled by `--no-color`, by `NO_COLOR` and when stdout is
    /// not a terminal.
    pub fn from_cli(cli: &Cli) -> Self {
        let use_colors = !cli.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal();
        Self {
            json_output: cli.json,
            use_colors,
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}

/// Builds an API client, pointed at `api_url` when one is configured.
pub fn build_client(token: &str, api_url: Option<&str>) -> Result<FeedFactoryClient> {
    let mut builder = FeedFactoryClient::builder(token);
    if let Some(url) = api_url {
        builder = builder.base_url(url);
    }
    Ok(builder.build()?)
}

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Aborted,
}

/// Asks the user to confirm a destructive operation.
///
/// `force` skips the prompt. Without a terminal there is nobody to ask, so
/// the operation is aborted.
pub fn confirm(prompt: &str, force: bool) -> Result<ConfirmResult> {
    if force {
        return Ok(ConfirmResult::Confirmed);
    }
    if !io::stdin().is_terminal() {
        return Ok(ConfirmResult::Aborted);
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))?;

    Ok(if confirmed {
        ConfirmResult::Confirmed
    } else {
        ConfirmResult::Aborted
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_confirm_force_skips_prompt() {
        assert_eq!(confirm("Delete?", true).unwrap(), ConfirmResult::Confirmed);
    }

    #[test]
    fn test_context_from_cli() {
        let cli = Cli::parse_from(["tff", "--json", "-q", "--no-color", "accounts", "me"]);
        let ctx = CommandContext::from_cli(&cli);
        assert!(ctx.json_output);
        assert!(ctx.quiet);
        assert!(!ctx.verbose);
        assert!(!ctx.use_colors);
    }

    #[test]
    fn test_flag_error_names_the_flag() {
        let err = CommandError::flag("--updated-since")(QueryError::invalid_time_expression("3x"));
        assert!(err.to_string().starts_with("--updated-since: invalid time expression"));
    }
}
