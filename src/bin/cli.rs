//! leakview CLI
//!
//! Local entry point for browsing the defect catalog.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leakview::{error::Result, models::Config, pipeline, utils};

/// leakview - Resource Leak Catalog Viewer
#[derive(Parser, Debug)]
#[command(
    name = "leakview",
    version,
    about = "Browse resource-leak defects and view their source annotated"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "leakview.toml")]
    config: PathBuf,

    /// Catalog file to use instead of the configured one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress section headers and summaries
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog records
    List {
        /// Only show records of this project
        #[arg(long)]
        project: Option<String>,

        /// Show at most this many records
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Fetch one record's source file and show the defect region
    Show {
        /// Record id
        id: u64,

        /// Override the artifact base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Read artifacts from a local directory instead of HTTP
        #[arg(long)]
        corpus_dir: Option<PathBuf>,
    },

    /// Read record ids from stdin, one per line, and show each
    Browse,

    /// Check the catalog for invalid line ranges and duplicate ids
    Check,

    /// Render a markdown document to HTML
    Docs {
        /// Markdown input
        input: PathBuf,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    utils::log::init(cli.quiet);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(catalog) = cli.catalog {
        config.catalog.path = Some(catalog);
    }
    log::debug!("Catalog: {}", config.catalog.location());

    match cli.command {
        Command::List { project, limit } => {
            config.validate()?;
            pipeline::run_list(&config, project.as_deref(), limit).await?;
        }

        Command::Show {
            id,
            base_url,
            corpus_dir,
        } => {
            if let Some(base_url) = base_url {
                config.fetcher.base_url = base_url;
            }
            if corpus_dir.is_some() {
                config.fetcher.corpus_dir = corpus_dir;
            }
            config.validate()?;
            pipeline::run_show(&config, id).await?;
        }

        Command::Browse => {
            config.validate()?;
            pipeline::run_browse(&config).await?;
        }

        Command::Check => {
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            pipeline::run_check(&config).await?;
            log::info!("All checks passed!");
        }

        Command::Docs { input, output } => {
            pipeline::run_docs(&input, output.as_deref()).await?;
        }
    }

    Ok(())
}
