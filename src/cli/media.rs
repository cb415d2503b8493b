//! Media command implementations

use colored::Colorize;
use serde::Serialize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::SkyfishApi;
use crate::error::Result;
use crate::models::MediaItemDisplay;
use crate::output::progress::Spinner;
use crate::output::{Formattable, json};

/// Show the details of a media item
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let spinner = Spinner::start(ctx.format, "Fetching item...");
    let item = ctx.client.get_item(id).await;
    spinner.finish();
    let item = item?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&item)?),
        OutputFormat::Table => vec![MediaItemDisplay::from(&item)].print(ctx.format)?,
        OutputFormat::Pretty => {
            let display = MediaItemDisplay::from(&item);
            println!("{}", display.filename.bold());
            println!("  ID:        {}", display.id);
            println!("  Type:      {}", display.kind);
            println!("  Import as: {}", display.bundle);
            println!("  Title:     {}", display.title);
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct DownloadInfo {
    id: u64,
    filename: String,
    url: String,
}

/// Print a time-limited download URL for a media item
pub async fn url(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let spinner = Spinner::start(ctx.format, "Requesting download location...");
    let info = download_info(ctx.client.as_ref(), id).await;
    spinner.finish();
    let info = info?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&info)?),
        OutputFormat::Table => println!("{}", info.url),
        OutputFormat::Pretty => {
            println!("{}", info.filename.bold());
            println!("{}", info.url.cyan());
            println!("{}", "The link expires after a few minutes.".dimmed());
        }
    }

    Ok(())
}

async fn download_info<A: SkyfishApi + ?Sized>(api: &A, id: u64) -> Result<DownloadInfo> {
    let filename = api.get_filename(id).await?;
    let url = api.get_item_download_url(id).await?;
    Ok(DownloadInfo { id, filename, url })
}
