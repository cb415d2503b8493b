//! Folder command implementations

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::folders::{FolderCatalog, FolderChoices, FolderNode};
use crate::models::{FolderOptionRow, FolderRow};
use crate::output::progress::Spinner;
use crate::output::{Formattable, json};

/// Show the folder hierarchy
pub async fn tree(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let catalog = fetch(&ctx).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&catalog.roots)?),
        OutputFormat::Table => FolderRow::flatten(&catalog.roots).print(ctx.format)?,
        OutputFormat::Pretty => {
            if catalog.roots.is_empty() {
                println!("{}", "No folders found.".yellow());
            }
            print!("{}", render_tree(&catalog.roots));
        }
    }

    Ok(())
}

/// List the folders a search can be limited to
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let catalog = fetch(&ctx).await?;
    let choices = catalog.choices(ctx.root_scope(), &ctx.config.omit_folder_ids);

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&choices)?),
        format => {
            if format == OutputFormat::Pretty {
                println!("{}", headline(&choices));
            }
            let rows: Vec<FolderOptionRow> =
                choices.options.into_iter().map(FolderOptionRow::from).collect();
            rows.print(format)?;
        }
    }

    Ok(())
}

async fn fetch(ctx: &CommandContext) -> Result<FolderCatalog> {
    let spinner = Spinner::start(ctx.format, "Fetching folders...");
    let catalog = FolderCatalog::fetch(ctx.client.as_ref()).await;
    spinner.finish();
    catalog
}

fn headline(choices: &FolderChoices) -> String {
    match choices.scope_id {
        Some(id) => format!(
            "Folders in {} (searched when none is chosen: {})",
            choices.scope_name.bold(),
            id
        ),
        None => format!("Folders in {}", choices.scope_name.bold()),
    }
}

/// Indented tree with descendant counts
fn render_tree(roots: &[FolderNode]) -> String {
    let mut out = String::new();
    let mut stack: Vec<(&FolderNode, usize)> = roots.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        let count = node.descendant_count();
        let suffix = if count > 0 {
            format!(" ({} below)", count).dimmed().to_string()
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{}{} {}{}\n",
            "  ".repeat(depth),
            node.name,
            format!("#{}", node.id).dimmed(),
            suffix
        ));
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
    out
}
