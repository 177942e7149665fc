//! Command implementations for the docdex CLI.

pub mod check;
pub mod export;
pub mod fmt;
pub mod init;
pub mod list;
pub mod projects;
pub mod search;
pub mod serve;
pub mod stats;
pub mod status;
pub mod watch;
pub mod web;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::registry::GlobalRegistry;
use crate::scanner::{ScanOutcome, Scanner};
use crate::Config;

/// Resolution of which documentation tree a command operates on.
pub(crate) struct ResolvedTree {
    /// Directory the configuration was loaded from
    pub project_root: PathBuf,
    pub config: Config,
    /// Root of the generated documentation tree
    pub docs_root: PathBuf,
}

/// Pick the documentation tree for a command.
///
/// Precedence: an explicit `--docs` flag, then the configured tree of an
/// initialized current directory, then the registry's default tree, and
/// finally the current directory itself.
pub(crate) fn resolve_tree(explicit: Option<&Path>) -> Result<ResolvedTree> {
    let cwd = env::current_dir()?;

    if let Some(path) = explicit {
        let docs_root = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };
        let config = Config::load(&cwd).unwrap_or_default();
        return Ok(ResolvedTree {
            project_root: cwd,
            config,
            docs_root,
        });
    }

    if Config::is_initialized(&cwd) {
        let config = Config::load(&cwd)?;
        let docs_root = config.docs_root(&cwd);
        return Ok(ResolvedTree {
            project_root: cwd,
            config,
            docs_root,
        });
    }

    if let Ok(registry) = GlobalRegistry::load() {
        if let Some(project) = registry.default_project_info() {
            info!("Using default registered tree '{}'", project.name);
            let config = Config::load(&project.path).unwrap_or_default();
            let docs_root = config.docs_root(&project.path);
            return Ok(ResolvedTree {
                project_root: project.path.clone(),
                config,
                docs_root,
            });
        }
    }

    Ok(ResolvedTree {
        project_root: cwd.clone(),
        config: Config::default(),
        docs_root: cwd,
    })
}

/// Resolve a tree and scan it, failing loudly when it holds no shards.
pub(crate) fn load_tree(
    explicit: Option<&Path>,
    progress: bool,
) -> Result<(ResolvedTree, ScanOutcome)> {
    let resolved = resolve_tree(explicit)?;

    let scanner = Scanner::new(resolved.docs_root.clone(), resolved.config.scanner.clone());
    let outcome = scanner.scan_with_progress(progress)?;

    if outcome.report.shards_found == 0 {
        anyhow::bail!(
            "No index shards found under {:?}.\n\
             Point docdex at a generated documentation tree with --docs, or set\n\
             scanner.docs_dir in .docdex/config.toml.",
            resolved.docs_root
        );
    }

    Ok((resolved, outcome))
}
