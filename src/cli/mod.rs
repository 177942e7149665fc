use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docdex")]
#[command(author, version, about = "Search index toolkit and local search server for generated documentation")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize docdex in the current directory
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Parse the documentation tree and verify table invariants
    Check {
        /// Path to the generated documentation tree
        #[arg(short, long)]
        docs: Option<PathBuf>,

        /// Exit with an error if any validation issue is found
        #[arg(long)]
        strict: bool,
    },

    /// Search the documentation index
    Search {
        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Matching strategy: exact, prefix, substring, or fuzzy
        #[arg(short, long)]
        mode: Option<String>,

        /// Only show anchors whose owner matches this glob pattern
        #[arg(long)]
        owner: Option<String>,

        /// Path to the generated documentation tree
        #[arg(short, long)]
        docs: Option<PathBuf>,
    },

    /// List entries in the documentation index
    List {
        /// Only show entries with an owner matching this glob pattern
        #[arg(long)]
        owner: Option<String>,

        /// Filter by shard category (functions, classes, ...)
        #[arg(long)]
        category: Option<String>,

        /// Path to the generated documentation tree
        #[arg(short, long)]
        docs: Option<PathBuf>,
    },

    /// Export the merged table as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Path to the generated documentation tree
        #[arg(short, long)]
        docs: Option<PathBuf>,
    },

    /// Rewrite index shards in the canonical layout
    Fmt {
        /// Verify shards are canonical without rewriting them
        #[arg(long)]
        check: bool,

        /// Path to the generated documentation tree
        #[arg(short, long)]
        docs: Option<PathBuf>,
    },

    /// Show index statistics and metrics
    Stats {
        /// Output in Prometheus format
        #[arg(long)]
        prometheus: bool,

        /// Path to the generated documentation tree
        #[arg(short, long)]
        docs: Option<PathBuf>,
    },

    /// Show the active documentation tree and its index status
    Status,

    /// Start the MCP server (stdio transport)
    Serve {
        /// Path to the generated documentation tree
        #[arg(short, long)]
        docs: Option<PathBuf>,
    },

    /// Start the web search UI and JSON API
    Web {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Reload the table when the generator rewrites the shards
        #[arg(long)]
        watch: bool,

        /// Path to the generated documentation tree
        #[arg(short, long)]
        docs: Option<PathBuf>,
    },

    /// Watch the shard directory and reload on regeneration
    Watch {
        /// Debounce delay in milliseconds
        #[arg(long, default_value = "500")]
        debounce_ms: u64,

        /// Path to the generated documentation tree
        #[arg(short, long)]
        docs: Option<PathBuf>,
    },

    /// Manage registered documentation trees
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },
}

/// Subcommands for documentation tree management.
#[derive(Subcommand)]
pub enum ProjectsCommand {
    /// List all registered trees
    List,

    /// Register the current directory as a documentation tree
    Add {
        /// Name for the tree
        name: String,
    },

    /// Remove a tree from the registry
    Remove {
        /// Name of the tree to remove
        name: String,
    },

    /// Set the default tree
    Switch {
        /// Name of the tree to switch to
        name: String,
    },

    /// Show the current registry status
    Status,
}
