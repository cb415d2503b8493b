//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod cache;
pub mod context;
pub mod folder;
pub mod init;
pub mod media;
pub mod search;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

use crate::client::{MediaType, SortOrder};

/// Skyfish CLI - browse and search a Skyfish media library
#[derive(Parser, Debug)]
#[command(name = "skyfish")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "SKYFISH_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "SKYFISH_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SKYFISH_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "SKYFISH_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Custom API host (for development/testing)
    #[arg(long, global = true, env = "SKYFISH_API_HOST", hide = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store and verify Skyfish credentials
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Browse the folder hierarchy
    #[command(subcommand)]
    Folder(FolderCommands),

    /// Search the media library
    Search(SearchArgs),

    /// Inspect media items
    #[command(subcommand)]
    Media(MediaCommands),

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   skyfish completion bash > /etc/bash_completion.d/skyfish
  zsh:    skyfish completion zsh > \"${fpath[1]}/_skyfish\"
  fish:   skyfish completion fish > ~/.config/fish/completions/skyfish.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Folder subcommands
#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Show the folder hierarchy
    Tree,

    /// List the folders a search can be limited to
    List,
}

/// Search arguments
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search terms (omit to browse everything)
    pub query: Vec<String>,

    /// Limit to this folder and its sub-folders
    #[arg(long, short = 'f')]
    pub folder: Option<u64>,

    /// Media type to include (repeatable; defaults to the configured types)
    #[arg(long = "type", short = 't', value_enum)]
    pub types: Vec<MediaType>,

    /// Sort order
    #[arg(long, short = 'o', value_enum, default_value = "relevance")]
    pub order: SortOrder,

    /// Page number (1-based)
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Items per page (defaults to the configured page size)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl SearchArgs {
    /// Search terms joined into one query string
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}

/// Media subcommands
#[derive(Subcommand, Debug)]
pub enum MediaCommands {
    /// Show the details of a media item
    Get {
        /// Media ID
        id: u64,
    },

    /// Print a time-limited download URL for a media item
    Url {
        /// Media ID
        id: u64,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,

    /// Clear all cached data
    Clear,

    /// Show cache directory path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::parse_from([
            "skyfish", "search", "red", "boat", "--type", "image", "-t", "video", "--order",
            "created", "--page", "2", "--folder", "12",
        ]);

        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.text(), "red boat");
                assert_eq!(args.types, vec![MediaType::Image, MediaType::Video]);
                assert_eq!(args.order, SortOrder::Created);
                assert_eq!(args.page, 2);
                assert_eq!(args.folder, Some(12));
                assert_eq!(args.limit, None);
            }
            other => panic!("Expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_search_without_terms() {
        let cli = Cli::parse_from(["skyfish", "search"]);
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.text(), "");
                assert_eq!(args.page, 1);
            }
            other => panic!("Expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_media_url() {
        let cli = Cli::parse_from(["skyfish", "media", "url", "42"]);
        assert!(matches!(
            cli.command,
            Commands::Media(MediaCommands::Url { id: 42 })
        ));
    }
}
