//! Dictionary command implementations.
//!
//! Keywords, markers and the category ontology live on the account document.
//! Keywords and markers are shown as returned; the ontology is rendered as a
//! tree or flattened into a lookup table of selectable categories.

use feedfactory_api::prelude::{FeedFactoryClient, Ontology};
use serde_json::Value;

use super::{CommandContext, Result};
use crate::cli::DictionaryCommands;
use crate::output::{format_categories_table, format_ontology_tree};

/// Executes a `dictionary` subcommand.
pub async fn execute(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    command: &DictionaryCommands,
) -> Result<()> {
    match command {
        DictionaryCommands::Keywords { kind } => {
            let keywords = client.dictionary_keywords(*kind).await?;
            println!("{}", serde_json::to_string_pretty(&keywords)?);
        }
        DictionaryCommands::Markers { kind } => {
            let markers = client.dictionary_markers(*kind).await?;
            println!("{}", serde_json::to_string_pretty(&markers)?);
        }
        DictionaryCommands::Ontology => {
            let raw = client.ontology().await?;
            print!("{}", render_ontology(ctx, raw)?);
        }
        DictionaryCommands::Categories { lang } => {
            let raw = client.ontology().await?;
            print!("{}", render_categories(ctx, raw, lang)?);
        }
    }
    Ok(())
}

/// Renders the ontology as a tree, or as JSON when requested or when it
/// does not have the expected shape.
fn render_ontology(ctx: &CommandContext, raw: Value) -> Result<String> {
    if !ctx.json_output {
        if let Ok(ontology) = serde_json::from_value::<Ontology>(raw.clone()) {
            return Ok(format_ontology_tree(&ontology));
        }
    }
    Ok(format!("{}\n", serde_json::to_string_pretty(&raw)?))
}

fn render_categories(ctx: &CommandContext, raw: Value, lang: &str) -> Result<String> {
    let ontology: Ontology = serde_json::from_value(raw)?;
    let categories = ontology.flatten(lang);

    if ctx.json_output {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&categories)?));
    }
    Ok(format_categories_table(&categories, ctx.use_colors))
}
