//! Skyfish CLI - browse and search a Skyfish media library

use clap::{CommandFactory, Parser};

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod folders;
mod models;
mod output;
mod search;

use cli::{CacheCommands, Cli, Commands, FolderCommands, GlobalOptions, MediaCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` forces debug output; otherwise RUST_LOG applies, defaulting to warnings
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("skyfish", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("skyfish version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Folder(cmd) => match cmd {
            FolderCommands::Tree => cli::folder::tree(&opts).await,
            FolderCommands::List => cli::folder::list(&opts).await,
        },
        Commands::Search(args) => cli::search::run(&opts, &args).await,
        Commands::Media(cmd) => match cmd {
            MediaCommands::Get { id } => cli::media::get(&opts, id).await,
            MediaCommands::Url { id } => cli::media::url(&opts, id).await,
        },
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Status => cli::cache::status(opts.format),
            CacheCommands::Clear => cli::cache::clear(opts.format),
            CacheCommands::Path => cli::cache::path(),
        },
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "skyfish", &mut std::io::stdout());
            Ok(())
        }
    }
}
