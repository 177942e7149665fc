use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use docdex::cli::{Cli, Commands, ProjectsCommand};
use docdex::config::Config;
use docdex::logging::init_logging;
use docdex::metrics;

#[tokio::main]
async fn main() -> Result<()> {
    // Determine project root (current directory)
    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Load configuration (if available, otherwise use defaults)
    let config = Config::load(&project_root).unwrap_or_default();

    // Initialize logging with configuration
    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &project_root)?;

    tracing::info!("docdex starting up");
    tracing::debug!("Loaded configuration from: {}", project_root.display());

    // Register Prometheus metrics
    metrics::register_metrics();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            docdex::commands::init::run(force).await?;
        }
        Commands::Check { docs, strict } => {
            docdex::commands::check::run(docs, strict).await?;
        }
        Commands::Search {
            query,
            limit,
            mode,
            owner,
            docs,
        } => {
            docdex::commands::search::run(&query, limit, mode, owner, docs).await?;
        }
        Commands::List {
            owner,
            category,
            docs,
        } => {
            docdex::commands::list::run(owner, category, docs).await?;
        }
        Commands::Export {
            output,
            pretty,
            docs,
        } => {
            docdex::commands::export::run(output, pretty, docs).await?;
        }
        Commands::Fmt { check, docs } => {
            docdex::commands::fmt::run(check, docs).await?;
        }
        Commands::Stats { prometheus, docs } => {
            docdex::commands::stats::run(prometheus, docs).await?;
        }
        Commands::Status => {
            docdex::commands::status::run().await?;
        }
        Commands::Serve { docs } => {
            docdex::commands::serve::run(docs).await?;
        }
        Commands::Web { port, watch, docs } => {
            docdex::commands::web::run(port, watch, docs).await?;
        }
        Commands::Watch { debounce_ms, docs } => {
            docdex::commands::watch::run(debounce_ms, docs).await?;
        }
        Commands::Projects { command } => match command {
            ProjectsCommand::List => {
                docdex::commands::projects::list().await?;
            }
            ProjectsCommand::Add { name } => {
                docdex::commands::projects::add(name).await?;
            }
            ProjectsCommand::Remove { name } => {
                docdex::commands::projects::remove(name).await?;
            }
            ProjectsCommand::Switch { name } => {
                docdex::commands::projects::switch(name).await?;
            }
            ProjectsCommand::Status => {
                docdex::commands::projects::status().await?;
            }
        },
    }

    Ok(())
}
