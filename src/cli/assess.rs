//! Assess command - score a snapshot and render the report

use anyhow::Result;
use cimm::config::{DimensionRubric, ProjectConfig};
use cimm::models::{MaturityLevel, MaturityReport, PracticeSnapshot};
use cimm::reporters::{self, OutputFormat};
use cimm::scoring::{self, MaturityScorer};
use console::style;
use std::path::Path;
use tracing::{info, warn};

/// Run the assess command
#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &ProjectConfig,
    rubric: &DimensionRubric,
    snapshot: &PracticeSnapshot,
    format: Option<&str>,
    output_path: Option<&Path>,
    target: Option<u8>,
    fail_below: Option<u8>,
    explain: bool,
) -> Result<()> {
    let target = match target {
        Some(raw) => Some(scoring::target_level(raw)?),
        None => config.target_level,
    };
    let fail_below = match fail_below {
        Some(raw) => Some(scoring::target_level(raw)?),
        None => config.defaults.fail_below,
    };
    let format: OutputFormat = format
        .or(config.defaults.format.as_deref())
        .unwrap_or("text")
        .parse()?;
    let explain = explain || config.defaults.explain.unwrap_or(false);

    let scorer = match target {
        Some(t) => MaturityScorer::new(rubric).with_target(t),
        None => MaturityScorer::new(rubric),
    };
    let assessment = scorer.score(snapshot)?;

    // Without a target the roadmap aims one level above the current one
    let roadmap_target = target.or_else(|| assessment.overall_level.next());
    let recommendations = match roadmap_target {
        Some(t) => scoring::recommend(&assessment, t.value())?,
        None => Vec::new(),
    };

    info!(
        "Maturity level {} ({}) across {} dimensions, {} gaps",
        assessment.overall_level,
        assessment.overall_level.name(),
        assessment.dimensions.len(),
        assessment.gaps.len()
    );

    let report = MaturityReport::from_assessment(&assessment, recommendations);
    let mut output = reporters::report_with_format(&report, format)?;
    if explain {
        if format == OutputFormat::Json {
            warn!("--explain has no effect with {} output", format);
        } else {
            output.push('\n');
            output.push_str(&scoring::explain(&assessment));
            output.push('\n');
        }
    }

    match output_path {
        Some(path) => {
            let path = if path.extension().is_none() {
                path.with_extension(reporters::file_extension(format))
            } else {
                path.to_path_buf()
            };
            std::fs::write(&path, &output)?;
            // stderr keeps stdout clean for piping
            eprintln!(
                "Report written to: {}",
                style(path.display()).cyan()
            );
        }
        None => println!("{}", output),
    }

    check_fail_threshold(fail_below, assessment.overall_level);
    Ok(())
}

/// Exit with code 1 when the overall level is under the CI gate
fn check_fail_threshold(fail_below: Option<MaturityLevel>, overall: MaturityLevel) {
    if let Some(threshold) = fail_below {
        if overall < threshold {
            eprintln!(
                "Failing due to --fail-below={} (overall level is {})",
                threshold, overall
            );
            std::process::exit(1);
        }
    }
}
