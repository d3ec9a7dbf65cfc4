//! Rubric command - print the effective rubric

use anyhow::Result;
use cimm::config::DimensionRubric;
use console::style;

/// Run the rubric command
pub fn run(rubric: &DimensionRubric, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(rubric)?);
        return Ok(());
    }

    println!("\n{}\n", style("Effective rubric").bold());
    for (dimension, steps) in rubric.iter() {
        let ladder: Vec<String> = steps
            .iter()
            .map(|s| format!("{}→L{}", s.threshold, s.level))
            .collect();
        println!("  {:<20} {}", style(dimension).cyan(), ladder.join("  "));
    }
    println!();

    Ok(())
}
