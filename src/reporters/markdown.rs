//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - Team wikis and engineering handbooks

use crate::models::{MaturityLevel, MaturityReport};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &MaturityReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_summary(report));
    md.push('\n');

    md.push_str(&render_dimensions(report));
    md.push('\n');

    md.push_str(&render_gaps(report));
    md.push('\n');

    if !report.recommendations.is_empty() {
        md.push_str(&render_roadmap(report));
        md.push('\n');
    }

    md.push_str(&render_level_scale());

    Ok(md)
}

fn render_header(report: &MaturityReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        r#"# CI/CD Maturity Report

**Level: {}/5 ({})**

Generated: {}
"#,
        report.overall_level, report.level_name, timestamp
    )
}

fn render_summary(report: &MaturityReport) -> String {
    let description = MaturityLevel::new(report.overall_level)
        .map(MaturityLevel::description)
        .unwrap_or_default();
    let target = report
        .target_level
        .map(|t| t.to_string())
        .unwrap_or_else(|| "next level".to_string());

    format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| **Overall Level** | {} ({}) |
| **Target** | {} |
| **Dimensions Assessed** | {} |
| **Open Gaps** | {} |
| **Assessment** | {} |
"#,
        report.overall_level,
        report.level_name,
        target,
        report.dimension_levels.len(),
        report.gaps.len(),
        description
    )
}

fn render_dimensions(report: &MaturityReport) -> String {
    let mut s = String::from(
        "## Dimensions\n\n| Dimension | Raw Score | Level | Next Level At |\n|-----------|-----------|-------|---------------|\n",
    );
    for d in &report.dimensions {
        let next = d
            .next_threshold
            .map(|t| t.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let name = if d.level.value() == report.overall_level {
            format!("**{}**", d.dimension)
        } else {
            d.dimension.clone()
        };
        s.push_str(&format!(
            "| {} | {} | {} ({}) | {} |\n",
            name,
            d.raw_score,
            d.level,
            d.level.name(),
            next
        ));
    }
    s
}

fn render_gaps(report: &MaturityReport) -> String {
    let mut s = String::from("## Gaps\n\n");
    if report.gaps.is_empty() {
        s.push_str("No gaps. Every dimension meets the target.\n");
    }
    for gap in &report.gaps {
        s.push_str(&format!("- {}\n", gap));
    }
    s
}

fn render_roadmap(report: &MaturityReport) -> String {
    let mut s = String::from("## Roadmap\n\n");
    for (i, rec) in report.recommendations.iter().enumerate() {
        s.push_str(&format!("{}. {}\n", i + 1, rec));
    }
    s
}

fn render_level_scale() -> String {
    let mut s = String::from("## Level Scale\n\n| Level | Name | Meaning |\n|-------|------|---------|\n");
    for level in MaturityLevel::all() {
        s.push_str(&format!(
            "| {} | {} | {} |\n",
            level,
            level.name(),
            level.description()
        ));
    }
    s
}
