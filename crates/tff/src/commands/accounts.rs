//! Account command implementations.

use feedfactory_api::prelude::FeedFactoryClient;

use super::{CommandContext, Result};
use crate::cli::AccountsCommands;
use crate::output::helpers::pretty_json;

/// Executes an `accounts` subcommand. Both print the API response as JSON.
pub async fn execute(
    _ctx: &CommandContext,
    client: &FeedFactoryClient,
    command: &AccountsCommands,
) -> Result<()> {
    let body = match command {
        AccountsCommands::Me => client.account_me().await?,
        AccountsCommands::List => client.accounts().await?,
    };
    println!("{}", pretty_json(&body)?);
    Ok(())
}
