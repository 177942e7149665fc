//! Status command: show the active tree and registry state.

use std::env;

use anyhow::Result;

use super::resolve_tree;
use crate::registry::GlobalRegistry;
use crate::scanner::Walker;
use crate::Config;

pub async fn run() -> Result<()> {
    let cwd = env::current_dir()?;
    let resolved = resolve_tree(None)?;

    println!("docdex Status");
    println!("=============\n");

    if Config::is_initialized(&cwd) {
        println!("Configuration: {}", Config::docdex_dir(&cwd).join("config.toml").display());
    } else {
        println!("Configuration: none (run 'docdex init' to create one)");
    }

    println!("Documentation tree: {}", resolved.docs_root.display());

    let walker = Walker::new(resolved.docs_root.clone(), &resolved.config.scanner);
    let shard_count = walker.count_shards();
    if shard_count == 0 {
        println!("Index shards: none found");
    } else {
        println!("Index shards: {}", shard_count);
    }

    println!("Default search mode: {}", resolved.config.search.mode);

    let registry = GlobalRegistry::load()?;
    println!();
    if registry.is_empty() {
        println!("Registered trees: none");
    } else {
        println!("Registered trees: {}", registry.project_count());
        match registry.default_project_info() {
            Some(project) => println!("Default tree: {} ({})", project.name, project.display_path()),
            None => println!("Default tree: not set"),
        }
    }

    Ok(())
}
