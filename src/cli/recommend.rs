//! Recommend command - roadmap toward a target level

use anyhow::{Context, Result};
use cimm::config::{DimensionRubric, ProjectConfig};
use cimm::models::PracticeSnapshot;
use cimm::scoring;
use console::style;
use serde_json::json;

/// Run the recommend command
pub fn run(
    config: &ProjectConfig,
    rubric: &DimensionRubric,
    snapshot: &PracticeSnapshot,
    target: Option<u8>,
    as_json: bool,
) -> Result<()> {
    let target = target
        .or(config.target_level.map(|t| t.value()))
        .context("No target level. Pass --target <1-5> or set target_level in cimm.toml")?;

    let assessment = scoring::score(snapshot, rubric)?;
    let recommendations = scoring::recommend(&assessment, target)?;

    if as_json {
        let out = json!({
            "overall_level": assessment.overall_level.value(),
            "target_level": target,
            "recommendations": recommendations,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!(
            "{} Every dimension already meets level {}",
            style("✓").green(),
            target
        );
        return Ok(());
    }

    println!(
        "\n{} from level {} ({}) to level {}\n",
        style("Roadmap").bold(),
        assessment.overall_level,
        assessment.overall_level.name(),
        target
    );
    for (i, rec) in recommendations.iter().enumerate() {
        println!("  {} {}", style(format!("{:>2}.", i + 1)).dim(), rec);
    }
    println!();

    Ok(())
}
