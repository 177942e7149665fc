use anyhow::{bail, Result};
use std::env;
use tracing::info;

use crate::Config;

pub async fn run(force: bool) -> Result<()> {
    let root = env::current_dir()?;

    if Config::is_initialized(&root) && !force {
        bail!(
            "docdex is already initialized in {:?} (use --force to overwrite)",
            Config::docdex_dir(&root)
        );
    }

    let config = Config::default();
    config.save(&root)?;

    info!("Initialized docdex in {:?}", Config::docdex_dir(&root));
    println!(
        "✓ Created {} with default configuration",
        Config::docdex_dir(&root).display()
    );
    println!("\nNext steps:");
    println!("  1. Point scanner.docs_dir in .docdex/config.toml at your generated documentation");
    println!("  2. Run 'docdex check' to load and validate the search index");
    println!("  3. Run 'docdex web' to open the search UI");

    Ok(())
}
