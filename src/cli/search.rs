//! Search command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, SearchArgs};
use crate::client::{SearchQuery, SkyfishApi};
use crate::config::{Config, CredentialProvider};
use crate::error::Result;
use crate::folders::FolderIndex;
use crate::models::SearchRow;
use crate::output::progress::Spinner;
use crate::output::{Formattable, json, table};
use crate::search::{self, ResultSummary, SearchResultPage, resolve_scope};

/// Run a search and print one page of results.
///
/// A failed search is logged and reported as "no results" rather than
/// failing the command.
pub async fn run(opts: &GlobalOptions, args: &SearchArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let query = build_query(&ctx.config, args);

    let spinner = Spinner::start(ctx.format, "Searching...");
    let result = search::search(ctx.client.as_ref(), &query).await;
    let index = match result {
        Ok(ref page) if !page.is_empty() => folder_index(ctx.client.as_ref()).await,
        _ => FolderIndex::default(),
    };
    spinner.finish();

    let page = result.unwrap_or_else(|e| {
        log::error!("Search failed: {}", e);
        SearchResultPage::default()
    });
    let summary = page.summary(query.page_size);
    let rows: Vec<SearchRow> = page
        .items
        .iter()
        .map(|record| SearchRow::new(record, &index, ctx.root_scope()))
        .collect();

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", json::format_json_with_summary(&page, &summary.to_string())?)
        }
        OutputFormat::Table => rows.print(ctx.format)?,
        OutputFormat::Pretty => {
            let headline = summary.to_string();
            if summary == ResultSummary::None {
                println!("{}", headline.yellow());
            } else {
                println!("{}", headline.bold());
                println!("{}", table::format_table(&rows));
            }
        }
    }

    Ok(())
}

/// Combine the command line with the configured defaults.
pub fn build_query(config: &Config, args: &SearchArgs) -> SearchQuery {
    let types = if args.types.is_empty() {
        config.media_types.clone()
    } else {
        args.types.clone()
    };

    SearchQuery::new()
        .text(args.text())
        .folder_ids(resolve_scope(args.folder, config.root_scope()))
        .media_types(types)
        .order(args.order)
        .page_size(args.limit.unwrap_or(config.page_size()))
        .page(args.page)
}

/// Folder index for path labels; an unavailable listing just means no labels
async fn folder_index<A: SkyfishApi + ?Sized>(api: &A) -> FolderIndex {
    match api.get_folders().await {
        Ok(folders) => FolderIndex::new(&folders),
        Err(e) => {
            log::warn!("Could not load folders for labels: {}", e);
            FolderIndex::default()
        }
    }
}
