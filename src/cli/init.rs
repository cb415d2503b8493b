//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, MultiSelect, Password, Select, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::client::{Credentials, MediaType, SkyfishApi, SkyfishClient};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};
use crate::folders::{FolderNode, build_tree};

const ALL_TYPES: [MediaType; 4] = [
    MediaType::Image,
    MediaType::Vector,
    MediaType::Video,
    MediaType::Generic,
];

/// Run the init command
///
/// Credentials are only saved after they authenticate successfully.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();
    let existing = Config::load_at(opts.config_ref()).unwrap_or_default();

    println!("{}", "Welcome to Skyfish!".bold().green());
    println!("Let's set up your Skyfish connection.\n");

    let mut username = Input::<String>::with_theme(&theme).with_prompt("Skyfish username");
    if let Some(ref current) = existing.username {
        username = username.default(current.clone());
    }
    let username = username.interact_text()?;

    let password = Password::with_theme(&theme)
        .with_prompt("Skyfish password")
        .interact()?;

    let mut api_key = Input::<String>::with_theme(&theme).with_prompt("Skyfish API key");
    if let Some(ref current) = existing.api_key {
        api_key = api_key.default(current.clone());
    }
    let api_key = api_key.interact_text()?;

    let secret = Password::with_theme(&theme)
        .with_prompt("Skyfish API secret")
        .interact()?;

    let credentials = Credentials {
        username,
        password,
        api_key,
        secret,
    };

    println!("\n{}", "Authenticating...".cyan());
    let api_host = opts.api_host.clone().or_else(|| existing.api_host.clone());
    let client = verify(credentials.clone(), api_host).await?;
    println!("{}", "✓ Authentication successful!".green());

    let cache_minutes: u64 = Input::with_theme(&theme)
        .with_prompt("Cache folder listings for how many minutes? (0 disables)")
        .default(existing.cache_minutes)
        .interact_text()?;

    let page_size: usize = Input::with_theme(&theme)
        .with_prompt("Items per search page")
        .default(existing.page_size)
        .interact_text()?;

    println!("\n{}", "Fetching your folders...".cyan());
    let roots = build_tree(&client.get_folders().await?)?;
    let (root_folder_id, omit_folder_ids) = if roots.is_empty() {
        println!(
            "{}",
            "⚠ No folders found. Check the Skyfish user's permissions.".yellow()
        );
        (0, Vec::new())
    } else {
        choose_folders(&theme, &roots, &existing)?
    };

    let media_types = choose_media_types(&theme, &existing.media_types)?;

    let config = Config {
        username: Some(credentials.username),
        password: Some(credentials.password),
        api_key: Some(credentials.api_key),
        secret: Some(credentials.secret),
        cache_minutes,
        page_size,
        root_folder_id,
        omit_folder_ids,
        media_types,
        api_host: existing.api_host,
    };
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "skyfish status".cyan());
    println!("  {} - Browse folders", "skyfish folder tree".cyan());
    println!("  {} - Search the library", "skyfish search <terms>".cyan());

    Ok(())
}

/// Authenticate, turning a rejected login into a credentials error.
async fn verify(credentials: Credentials, api_host: Option<String>) -> Result<SkyfishClient> {
    match SkyfishClient::connect_with_host(credentials, api_host).await {
        Err(Error::Api(e)) if e.is_unauthorized() => Err(ConfigError::InvalidCredentials.into()),
        other => other,
    }
}

fn choose_folders(
    theme: &ColorfulTheme,
    roots: &[FolderNode],
    existing: &Config,
) -> Result<(u64, Vec<u64>)> {
    let mut labels = vec!["-- Show all folders --".to_string()];
    labels.extend(roots.iter().map(|f| f.name.clone()));

    let current = roots
        .iter()
        .position(|f| f.id == existing.root_folder_id)
        .map_or(0, |i| i + 1);

    let selection = Select::with_theme(theme)
        .with_prompt("Limit choices to this top-level folder")
        .items(&labels)
        .default(current)
        .interact()?;
    let root_folder_id = match selection {
        0 => 0,
        i => roots[i - 1].id,
    };

    let names: Vec<&str> = roots.iter().map(|f| f.name.as_str()).collect();
    let checked: Vec<bool> = roots
        .iter()
        .map(|f| existing.omit_folder_ids.contains(&f.id))
        .collect();
    let omitted = MultiSelect::with_theme(theme)
        .with_prompt("Omit these top-level folders (space to toggle)")
        .items(&names)
        .defaults(&checked)
        .interact()?;

    Ok((root_folder_id, omitted.into_iter().map(|i| roots[i].id).collect()))
}

fn choose_media_types(theme: &ColorfulTheme, current: &[MediaType]) -> Result<Vec<MediaType>> {
    let names: Vec<&str> = ALL_TYPES.iter().map(|t| t.as_str()).collect();
    let checked: Vec<bool> = ALL_TYPES.iter().map(|t| current.contains(t)).collect();

    let selected = MultiSelect::with_theme(theme)
        .with_prompt("Media types to request (none selected = all)")
        .items(&names)
        .defaults(&checked)
        .interact()?;

    Ok(selected.into_iter().map(|i| ALL_TYPES[i]).collect())
}
