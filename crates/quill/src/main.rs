//! Quill - a text editor session with undo and directory keyword search.
//!
//! This is the main entry point for the quill CLI.

mod commands;
mod menu;

use clap::{Parser, Subcommand};
use menu::Menu;
use quill_core::Config;
use quill_search::WalkOptions;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "quill")]
#[command(author, version, about = "Edit text files with undo and search directories by keyword", long_about = None)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Interactive {
        /// Directory to search and index
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
    /// List files containing a keyword
    Search {
        /// Keyword to look for (case-sensitive)
        keyword: String,
        /// Directory to search
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Print output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a keyword index and print it
    Index {
        /// Keywords to index
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
        /// Directory to index
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Print output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show configuration
    Config,
    /// Print version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Get current directory
    let cwd = std::env::current_dir()?;
    let (config, sources) = Config::load(Some(&cwd))?;

    let log_file = commands::init_logging(cli.verbose, &config);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting quill");

    let result = match cli.command {
        Some(Commands::Search { keyword, root, json }) => {
            let root = resolve_root(&cwd, root, &config);
            commands::run_search(
                &mut std::io::stdout().lock(),
                &root,
                &keyword,
                walk_options(&config),
                json,
            )
        }
        Some(Commands::Index {
            keywords,
            root,
            json,
        }) => {
            let root = resolve_root(&cwd, root, &config);
            commands::run_index(
                &mut std::io::stdout().lock(),
                &root,
                &keywords,
                walk_options(&config),
                json,
            )
        }
        Some(Commands::Config) => show_config(&config, &sources),
        Some(Commands::Version) => {
            print_version();
            Ok(())
        }
        Some(Commands::Interactive { root }) => run_interactive(&cwd, root, &config),
        None => run_interactive(&cwd, None, &config),
    };

    // Print log file location on exit
    if let Some(path) = log_file {
        eprintln!("Logs: {}", path.display());
    }

    result
}

/// Run the numbered menu on stdin/stdout.
fn run_interactive(cwd: &Path, root: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let root = root.or_else(|| config.root().map(Path::to_path_buf));
    let stdin = std::io::stdin();

    let mut menu = Menu::new(stdin.lock(), std::io::stdout(), cwd)
        .with_root(root)
        .with_walk_options(walk_options(config))
        .with_history_config(config.history())?;
    menu.run()
}

/// `--root`, then the configured root, then the working directory.
fn resolve_root(cwd: &Path, root: Option<PathBuf>, config: &Config) -> PathBuf {
    let root = root
        .or_else(|| config.root().map(Path::to_path_buf))
        .unwrap_or_else(|| cwd.to_path_buf());
    quill_util::path::absolutize(&root, cwd)
}

fn walk_options(config: &Config) -> WalkOptions {
    WalkOptions::with_extension(config.extension())
        .follow_links(config.follow_links.unwrap_or(false))
}

/// Show configuration sources and the merged result.
fn show_config(config: &Config, sources: &[PathBuf]) -> anyhow::Result<()> {
    println!("Configuration sources:");
    if sources.is_empty() {
        println!("  (none)");
    } else {
        for source in sources {
            println!("  {}", source.display());
        }
    }
    println!();

    println!("Current configuration:");
    println!("{}", serde_json::to_string_pretty(config)?);

    Ok(())
}

/// Print version information.
fn print_version() {
    println!("quill {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Edit text files with undo and search directories by keyword.");
}
