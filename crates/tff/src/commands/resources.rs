//! Resource command implementations.
//!
//! Events, locations, routes, venues and event groups share one flow,
//! parameterized by [`ResourceKind`]. Events add their own filters through
//! [`EventFilterCriteria`]; everything downstream of the criteria is generic
//! over [`QueryCriteria`].

use std::path::Path;
use std::str::FromStr;

use feedfactory_api::models::{parse_comments, parse_revisions};
use feedfactory_api::prelude::{
    build_export_query, EventFilterCriteria, ExportCriteria, ExportFormat, FeedFactoryClient,
    FilterCriteria, GeoPoint, GeoRadius, LabelList, MarkerFilter, QueryCriteria, Resource,
    ResourceKind, SearchResult, SortField, WorkflowStatus,
};
use feedfactory_api::time_expr;
use serde::Serialize;
use tracing::debug;

use super::{confirm, CommandContext, CommandError, ConfirmResult, Result};
use crate::cli::{
    EventCommands, EventExportArgs, EventFilterArgs, EventListArgs, ExportArgs, FilterArgs,
    FormatArg, ItemCommands, ListArgs, ResourceCommands, SortArg, WorkflowStatusArg,
};
use crate::output::helpers::{capitalize, pretty_json};
use crate::output::{
    format_comments, format_resource_details, format_resources_table, format_revisions,
};

impl From<WorkflowStatusArg> for WorkflowStatus {
    fn from(arg: WorkflowStatusArg) -> Self {
        match arg {
            WorkflowStatusArg::Draft => WorkflowStatus::Draft,
            WorkflowStatusArg::ReadyForValidation => WorkflowStatus::ReadyForValidation,
            WorkflowStatusArg::Approved => WorkflowStatus::Approved,
            WorkflowStatusArg::Rejected => WorkflowStatus::Rejected,
            WorkflowStatusArg::Deleted => WorkflowStatus::Deleted,
            WorkflowStatusArg::Archived => WorkflowStatus::Archived,
        }
    }
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Modified => SortField::Modified,
            SortArg::Created => SortField::Created,
            SortArg::Title => SortField::Title,
            SortArg::WorkflowStatus => SortField::WorkflowStatus,
        }
    }
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Excel => ExportFormat::Excel,
            FormatArg::Uitkrant => ExportFormat::Uitkrant,
        }
    }
}

// ------------------------------------------------------------------
// Criteria
// ------------------------------------------------------------------

/// Builds the common criteria from filter flags.
///
/// # Errors
///
/// Returns [`CommandError::Flag`] when `--updated-since` is not a valid time
/// expression.
pub fn filter_criteria(args: &FilterArgs) -> Result<FilterCriteria> {
    let updated_since = args
        .updated_since
        .as_deref()
        .map(time_expr::parse)
        .transpose()
        .map_err(CommandError::flag("--updated-since"))?;

    Ok(FilterCriteria {
        search: args.search.clone(),
        markers: args.markers.as_deref().map(MarkerFilter::new),
        keywords: LabelList::from(args.keywords.as_deref()),
        types: LabelList::from(args.types.as_deref()),
        categories: LabelList::from(args.categories.as_deref()),
        workflow_status: args.wfstatus.map(WorkflowStatus::from),
        published: args.published,
        include_deleted: args.deleted,
        owner: args.owner.clone(),
        user_organisation: args.user_organisation.clone(),
        trc_id: args.trc_id.clone(),
        external_id: args.external_id.clone(),
        language: args.language.clone(),
        updated_since,
        ..Default::default()
    })
}

/// Adds the event-only flags to `base`.
///
/// # Errors
///
/// Returns [`CommandError::Flag`] for an unparseable date bound or geo
/// center.
pub fn event_criteria(base: FilterCriteria, args: &EventFilterArgs) -> Result<EventFilterCriteria> {
    let date_from = args
        .date_from
        .as_deref()
        .map(time_expr::parse_date)
        .transpose()
        .map_err(CommandError::flag("--date-from"))?;
    let date_to = args
        .date_to
        .as_deref()
        .map(time_expr::parse_date)
        .transpose()
        .map_err(CommandError::flag("--date-to"))?;
    let geo_center = args
        .geo
        .as_deref()
        .map(GeoPoint::from_str)
        .transpose()
        .map_err(CommandError::flag("--geo"))?;

    Ok(EventFilterCriteria {
        base,
        date_from,
        date_to,
        location_id: args.location_id.clone(),
        city: args.city.clone(),
        geo_center,
        geo_radius: args
            .geo_distance
            .as_deref()
            .filter(|radius| !radius.trim().is_empty())
            .map(GeoRadius::new),
    })
}

fn list_criteria(args: &ListArgs) -> Result<FilterCriteria> {
    Ok(FilterCriteria {
        sort_field: Some(args.sort.into()),
        sort_ascending: args.asc,
        page_size: args.size,
        page_index: args.page,
        ..filter_criteria(&args.filter)?
    })
}

fn export_criteria(args: &ExportArgs) -> Result<FilterCriteria> {
    Ok(FilterCriteria {
        sort_field: args.sort.map(SortField::from),
        sort_ascending: args.asc,
        ..filter_criteria(&args.filter)?
    })
}

fn export_options(args: &ExportArgs, format: ExportFormat) -> ExportCriteria {
    ExportCriteria {
        property_column_ids: LabelList::from(args.property_ids.as_deref()),
        format,
    }
}

// ------------------------------------------------------------------
// Dispatch
// ------------------------------------------------------------------

/// Executes an `events` subcommand.
pub async fn execute_events(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    command: &EventCommands,
) -> Result<()> {
    let kind = ResourceKind::Event;
    match command {
        EventCommands::List(EventListArgs { list, event }) => {
            let criteria = event_criteria(list_criteria(list)?, event)?;
            execute_list(ctx, client, kind, &criteria).await
        }
        EventCommands::Export(EventExportArgs {
            export,
            format,
            event,
        }) => {
            let criteria = event_criteria(export_criteria(export)?, event)?;
            let options = export_options(export, (*format).into());
            execute_export(ctx, client, kind, &criteria, &options, &export.output).await
        }
        EventCommands::Item(item) => execute_item(ctx, client, kind, item).await,
    }
}

/// Executes a subcommand for a non-event resource kind.
pub async fn execute(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    command: &ResourceCommands,
) -> Result<()> {
    match command {
        ResourceCommands::List(args) => {
            let criteria = list_criteria(args)?;
            execute_list(ctx, client, kind, &criteria).await
        }
        ResourceCommands::Export(args) => {
            let criteria = export_criteria(args)?;
            let options = export_options(args, ExportFormat::Excel);
            execute_export(ctx, client, kind, &criteria, &options, &args.output).await
        }
        ResourceCommands::Item(item) => execute_item(ctx, client, kind, item).await,
    }
}

/// Executes a subcommand that acts on a single resource.
pub async fn execute_item(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    command: &ItemCommands,
) -> Result<()> {
    match command {
        ItemCommands::Get { id } => execute_get(ctx, client, kind, id).await,
        ItemCommands::Delete { id, force } => execute_delete(ctx, client, kind, id, *force).await,
        ItemCommands::Publish { id } => execute_publish(ctx, client, kind, id, true).await,
        ItemCommands::Unpublish { id } => execute_publish(ctx, client, kind, id, false).await,
        ItemCommands::Comments { id } => execute_comments(ctx, client, kind, id).await,
        ItemCommands::Comment { id, message } => {
            execute_add_comment(ctx, client, kind, id, message).await
        }
        ItemCommands::Revisions { id } => execute_revisions(ctx, client, kind, id).await,
    }
}

// ------------------------------------------------------------------
// Listing and export
// ------------------------------------------------------------------

/// Lists one page of `kind` matching `criteria`.
pub async fn execute_list<C>(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    criteria: &C,
) -> Result<()>
where
    C: QueryCriteria + ?Sized,
{
    let query = criteria.build_query()?;
    debug!(kind = %kind, query = %query, "listing");
    let body = client.list_raw(kind, &query).await?;

    if ctx.json_output {
        println!("{}", pretty_json(&body)?);
        return Ok(());
    }

    let page: SearchResult = serde_json::from_slice(&body)?;
    let resources = page.resources()?;
    if !ctx.quiet {
        print!(
            "{}",
            format_resources_table(kind, &resources, &page, ctx.use_colors)
        );
    }
    Ok(())
}

/// Downloads an export of `kind` to `output`.
pub async fn execute_export<C>(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    criteria: &C,
    options: &ExportCriteria,
    output: &Path,
) -> Result<()>
where
    C: QueryCriteria + ?Sized,
{
    let query = build_export_query(kind, criteria, options)?;
    debug!(kind = %kind, query = %query, "exporting");
    let bytes = client.export(kind, &query).await?;
    tokio::fs::write(output, &bytes).await?;

    if ctx.json_output {
        let out = ExportOutput {
            kind: kind.plural(),
            path: &output.display().to_string(),
            bytes: bytes.len(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if !ctx.quiet {
        println!(
            "Exported {} to {} ({} bytes)",
            kind.plural(),
            output.display(),
            bytes.len()
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ExportOutput<'a> {
    kind: &'a str,
    path: &'a str,
    bytes: usize,
}

// ------------------------------------------------------------------
// Single resources
// ------------------------------------------------------------------

async fn execute_get(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    id: &str,
) -> Result<()> {
    let body = client.get_resource(kind, id).await?;

    if ctx.json_output {
        println!("{}", pretty_json(&body)?);
        return Ok(());
    }

    let resource: Resource = serde_json::from_slice(&body)?;
    print!("{}", format_resource_details(kind, &resource, ctx.use_colors));
    Ok(())
}

async fn execute_delete(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    id: &str,
    force: bool,
) -> Result<()> {
    let prompt = format!("Are you sure you want to delete {} {}?", kind.singular(), id);
    if confirm(&prompt, force)? == ConfirmResult::Aborted {
        if !ctx.quiet {
            eprintln!("Cancelled.");
        }
        return Ok(());
    }

    client.delete_resource(kind, id).await?;
    report_action(ctx, kind, id, "deleted")
}

async fn execute_publish(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    id: &str,
    publish: bool,
) -> Result<()> {
    if publish {
        client.publish(kind, id).await?;
        report_action(ctx, kind, id, "published")
    } else {
        client.unpublish(kind, id).await?;
        report_action(ctx, kind, id, "unpublished")
    }
}

async fn execute_add_comment(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    id: &str,
    message: &str,
) -> Result<()> {
    client.add_comment(kind, id, message).await?;

    if ctx.json_output {
        return report_action(ctx, kind, id, "commented");
    }
    if !ctx.quiet {
        println!("Comment added to {} {}.", kind.singular(), id);
    }
    Ok(())
}

async fn execute_comments(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    id: &str,
) -> Result<()> {
    let body = client.comments(kind, id).await?;
    let text = match parse_comments(&body) {
        Some(comments) if !ctx.json_output => format_comments(&comments),
        _ => raw_body(&body),
    };
    print_block(&text);
    Ok(())
}

async fn execute_revisions(
    ctx: &CommandContext,
    client: &FeedFactoryClient,
    kind: ResourceKind,
    id: &str,
) -> Result<()> {
    let body = client.revisions(kind, id).await?;
    let text = match parse_revisions(&body) {
        Some(revisions) if !ctx.json_output => format_revisions(&revisions),
        _ => raw_body(&body),
    };
    print_block(&text);
    Ok(())
}

/// Pretty JSON when the body parses, the body as text otherwise.
fn raw_body(body: &[u8]) -> String {
    pretty_json(body).unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned())
}

fn print_block(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

#[derive(Serialize)]
struct ActionOutput<'a> {
    kind: &'a str,
    id: &'a str,
    status: &'a str,
}

fn report_action(ctx: &CommandContext, kind: ResourceKind, id: &str, status: &str) -> Result<()> {
    if ctx.json_output {
        let out = ActionOutput {
            kind: kind.singular(),
            id,
            status,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if !ctx.quiet {
        println!("{}", action_message(kind, id, status));
    }
    Ok(())
}

fn action_message(kind: ResourceKind, id: &str, status: &str) -> String {
    format!("{} {} {}.", capitalize(kind.singular()), id, status)
}
