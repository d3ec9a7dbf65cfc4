//! Init command - write an example cimm.toml

use anyhow::{Context, Result};
use cimm::config::EXAMPLE_CONFIG;
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(dir: &Path, force: bool) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join("cimm.toml");
    if config_path.exists() && !force {
        println!(
            "{} Already initialized at {} (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Assess a snapshot", style("cimm assess snapshot.json").cyan());
    println!("  {} Plan the next level", style("cimm recommend snapshot.json --target 3").cyan());

    Ok(())
}
