//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::{Config, CredentialProvider};
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Skyfish Configuration Status".bold());

    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "skyfish init".cyan()
            );
            println!();
            return Ok(());
        }
    };

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!("Config file: {}", config_path.display().to_string().cyan());
    println!();

    match config.validate_auth() {
        Ok(()) => println!(
            "{} Credentials configured for {}",
            "✓".green(),
            config.username().unwrap_or_default().bold()
        ),
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            println!("  → Run 'skyfish init' to configure");
        }
    }

    if config.cache_minutes == 0 {
        println!("{} Folder cache disabled", "○".dimmed());
    } else {
        println!(
            "{} Folders cached for {} minutes",
            "✓".green(),
            config.cache_minutes
        );
    }
    println!("{} {} items per page", "✓".green(), config.page_size);

    match config.root_scope() {
        Some(id) => println!("{} Limited to root folder {}", "✓".green(), id),
        None => println!("{} Browsing all folders", "○".dimmed()),
    }

    if !config.omit_folder_ids.is_empty() {
        let ids: Vec<String> = config.omit_folder_ids.iter().map(u64::to_string).collect();
        println!("{} Omitting folders: {}", "○".dimmed(), ids.join(", "));
    }

    if !config.media_types.is_empty() {
        let types: Vec<&str> = config.media_types.iter().map(|t| t.as_str()).collect();
        println!("{} Media types: {}", "○".dimmed(), types.join(" or "));
    }

    // API host status (only show if custom)
    if let Some(host) = opts.api_host_ref().or(config.api_host.as_deref()) {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }

    println!();

    Ok(())
}
