//! Snapshot input
//!
//! Reads practice snapshots collected elsewhere: JSON or TOML files with a
//! flat `dimension = score` map, or inline `dimension=score` pairs.

use crate::models::PracticeSnapshot;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load a snapshot from a file (`-` reads JSON from stdin)
pub fn load_snapshot(path: &Path) -> Result<PracticeSnapshot> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read snapshot from stdin")?;
        return parse_snapshot_json(&content).context("Invalid snapshot on stdin");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let snapshot = if is_toml {
        toml::from_str::<PracticeSnapshot>(&content)
            .with_context(|| format!("Invalid snapshot {}", path.display()))?
    } else {
        parse_snapshot_json(&content)
            .with_context(|| format!("Invalid snapshot {}", path.display()))?
    };

    debug!(
        "Loaded snapshot with {} dimensions from {}",
        snapshot.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Parse a JSON object of `dimension: score`
pub fn parse_snapshot_json(content: &str) -> Result<PracticeSnapshot> {
    Ok(serde_json::from_str(content)?)
}

/// Build a snapshot from `dimension=score` pairs
pub fn parse_inline_scores<S: AsRef<str>>(pairs: &[S]) -> Result<PracticeSnapshot> {
    let mut scores = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let pair = pair.as_ref();
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected dimension=score, got '{}'", pair))?;
        let score: u32 = value
            .trim()
            .parse()
            .with_context(|| format!("'{}' is not a valid score in '{}'", value.trim(), pair))?;
        scores.push((name.trim().to_string(), score));
    }
    Ok(PracticeSnapshot::new(scores)?)
}
