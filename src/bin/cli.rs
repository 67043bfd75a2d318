//! Open Practice Library bot CLI
//!
//! Finds practices that have no post yet and writes them to a CSV file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use oplbot::{
    error::Result,
    models::Config,
    pipeline,
    services::{AuthorDirectory, PracticeIngestor},
};

/// oplbot - Open Practice Library social bot
#[derive(Parser, Debug)]
#[command(name = "oplbot", version, about = "OpenPracticeLibrary - Twitter Bot")]
struct Cli {
    /// Path to the configuration file (default: config.yaml, config.yml or config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile practices with published posts and write the pending ones
    Sync {
        /// Treat every practice as pending, not just the ones never posted
        #[arg(short, long)]
        all: bool,

        /// Keep raw author ids instead of resolving mentions
        #[arg(long)]
        no_authors: bool,

        /// Clone or pull the practice repository first
        #[arg(long)]
        sync_repo: bool,

        /// Output CSV path (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bearer token for the post listing API
        #[arg(long, env = "OPLBOT_BEARER_TOKEN", hide_env_values = true)]
        bearer_token: Option<String>,
    },

    /// Print parsed practices as JSON without contacting the API
    Practices {
        /// Keep raw author ids instead of resolving mentions
        #[arg(long)]
        no_authors: bool,
    },

    /// Validate configuration and input files
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_from(cli.config.as_deref(), ".")?;

    match cli.command {
        Command::Sync {
            all,
            no_authors,
            sync_repo,
            output,
            bearer_token,
        } => {
            config.pipeline.force_all |= all;
            config.pipeline.resolve_authors &= !no_authors;
            config.pipeline.sync_repo |= sync_repo;
            if let Some(path) = output {
                config.output.path = path;
            }
            if bearer_token.is_some() {
                config.bearer_token = bearer_token;
            }
            config.validate()?;

            let summary = pipeline::run_sync(&config)?;
            match summary.output {
                Some(path) => log::info!("Pending practices saved to {}", path.display()),
                None => log::info!("All practices already published"),
            }
        }

        Command::Practices { no_authors } => {
            config.pipeline.resolve_authors &= !no_authors;
            let records = pipeline::run_practices(&config)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("Config OK");

            match config.bearer_token() {
                Ok(_) => log::info!("Bearer token present"),
                Err(e) => log::warn!("{}", e),
            }

            let ingestor = PracticeIngestor::new(&config.library);
            let outcome = ingestor.ingest_detailed()?;
            log::info!(
                "Practices in {}: {} listed, {} parsed, {} skipped",
                ingestor.directory().display(),
                outcome.listed,
                outcome.documents.len(),
                outcome.skipped.len()
            );

            if config.pipeline.resolve_authors {
                let authors =
                    AuthorDirectory::load(&config.library.authors_file, &config.library)?;
                log::info!(
                    "Author table {}: {} authors",
                    config.library.authors_file.display(),
                    authors.len()
                );
            }

            log::info!("All validations passed!");
        }
    }

    Ok(())
}

/// Main entry point for the CLI application.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("oplbot starting...");

    match run(cli) {
        Ok(()) => {
            log::info!("Done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
