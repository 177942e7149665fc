//! Documentation tree management commands.

use anyhow::{bail, Result};
use std::env;

use crate::registry::{GlobalRegistry, ProjectInfo, TreeStats};
use crate::scanner::Scanner;
use crate::Config;

/// List all registered trees.
pub async fn list() -> Result<()> {
    let registry = GlobalRegistry::load()?;

    if registry.is_empty() {
        println!("No documentation trees registered.");
        println!("\nTo register one, navigate to its directory and run:");
        println!("  docdex projects add <name>");
        return Ok(());
    }

    let default_name = registry.default_project.as_deref();

    println!("Registered documentation trees:\n");
    println!(
        "{:<3} {:<20} {:<50} {:>8} {:>8}",
        "", "NAME", "PATH", "SHARDS", "ENTRIES"
    );
    println!("{}", "-".repeat(93));

    for project in registry.list_projects() {
        let is_default = Some(project.name.as_str()) == default_name;
        let default_marker = if is_default { "*" } else { "" };

        let (shards, entries) = project
            .stats
            .as_ref()
            .map(|s| (s.shard_count.to_string(), s.entry_count.to_string()))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));

        let path_display = truncate(&project.display_path(), 48);
        let path_status = if project.path_exists() {
            path_display
        } else {
            format!("{} (missing)", path_display)
        };

        println!(
            "{:<3} {:<20} {:<50} {:>8} {:>8}",
            default_marker,
            truncate(&project.name, 18),
            path_status,
            shards,
            entries
        );
    }

    println!("\n* = default tree");
    println!("\nTotal: {} tree(s)", registry.project_count());

    Ok(())
}

/// Register the current directory as a documentation tree.
pub async fn add(name: String) -> Result<()> {
    let current_dir = env::current_dir()?;
    let canonical_path = current_dir
        .canonicalize()
        .unwrap_or_else(|_| current_dir.clone());

    let mut registry = GlobalRegistry::load()?;

    if let Some(existing) = registry.find_by_path(&canonical_path) {
        bail!(
            "This directory is already registered as tree '{}'.\n\
             Use 'docdex projects remove {}' first if you want to re-register it.",
            existing.name,
            existing.name
        );
    }

    // Scan up front so the listing has numbers and obvious mistakes
    // (pointing at a directory without an index) fail here.
    let config = Config::load(&canonical_path).unwrap_or_default();
    let docs_root = config.docs_root(&canonical_path);
    let scanner = Scanner::new(docs_root.clone(), config.scanner.clone());
    let outcome = scanner.scan()?;

    if outcome.report.shards_found == 0 {
        bail!(
            "No index shards found under {:?}.\n\
             Register the root of a generated documentation tree.",
            docs_root
        );
    }

    let mut project = ProjectInfo::new(name.clone(), canonical_path);
    project.update_stats(TreeStats::new(
        outcome.report.shards_loaded,
        outcome.index.len(),
        outcome.index.target_count(),
    ));
    project.mark_scanned();

    registry.add_project(project)?;

    // First registered tree becomes the default.
    if registry.project_count() == 1 {
        registry.set_default(&name)?;
    }

    registry.save()?;

    println!(
        "✓ Registered tree '{}' ({} entries)",
        name,
        outcome.index.len()
    );

    Ok(())
}

/// Remove a tree from the registry.
pub async fn remove(name: String) -> Result<()> {
    let mut registry = GlobalRegistry::load()?;

    match registry.remove_project(&name) {
        Some(project) => {
            registry.save()?;
            println!("✓ Removed tree '{}' ({})", name, project.display_path());
        }
        None => bail!("No tree named '{}' in the registry", name),
    }

    Ok(())
}

/// Set the default tree.
pub async fn switch(name: String) -> Result<()> {
    let mut registry = GlobalRegistry::load()?;
    registry.set_default(&name)?;
    registry.save()?;

    println!("✓ Default tree is now '{}'", name);
    Ok(())
}

/// Show the current registry status.
pub async fn status() -> Result<()> {
    let registry = GlobalRegistry::load()?;
    let cwd = env::current_dir()?;
    let canonical = cwd.canonicalize().unwrap_or(cwd);

    match registry.find_by_path(&canonical) {
        Some(project) => {
            println!("Current directory is registered as '{}'", project.name);
            if let Some(stats) = &project.stats {
                println!(
                    "  {} shards, {} entries, {} anchors",
                    stats.shard_count, stats.entry_count, stats.target_count
                );
            }
            if let Some(scanned) = project.last_scanned {
                println!("  Last scanned: {}", scanned.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
        None => println!("Current directory is not a registered tree."),
    }

    match registry.default_project_info() {
        Some(project) => println!("Default tree: {} ({})", project.name, project.display_path()),
        None => println!("Default tree: not set"),
    }

    Ok(())
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let head: String = value.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
