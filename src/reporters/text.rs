//! Text (terminal) reporter with colors and formatting

use crate::models::{MaturityLevel, MaturityReport};
use anyhow::Result;

/// Level colors (ANSI escape codes)
fn level_color(level: u8) -> &'static str {
    match level {
        5 => "\x1b[32m", // Green
        4 => "\x1b[92m", // Light green
        3 => "\x1b[33m", // Yellow
        2 => "\x1b[91m", // Light red
        _ => "\x1b[31m", // Red
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Render report as formatted terminal output
pub fn render(report: &MaturityReport) -> Result<String> {
    let mut out = String::new();

    // Header
    let level_c = level_color(report.overall_level);
    out.push_str(&format!("\n{BOLD}CI/CD Maturity Assessment{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Overall level: {level_c}{BOLD}{}/5 {}{RESET}",
        report.overall_level, report.level_name
    ));
    if let Some(target) = report.target_level {
        out.push_str(&format!("  Target: {}", target));
    }
    out.push_str("\n\n");

    // Per-dimension table
    out.push_str(&format!("{BOLD}DIMENSIONS{RESET}\n"));
    out.push_str(&format!(
        "{DIM}  DIMENSION            RAW  LEVEL  NEXT AT{RESET}\n"
    ));
    for d in &report.dimensions {
        let c = level_color(d.level.value());
        let next = match d.next_threshold {
            Some(t) => t.to_string(),
            None => "-".to_string(),
        };
        let weakest = if d.level.value() == report.overall_level {
            format!("  {DIM}<- weakest{RESET}")
        } else {
            String::new()
        };
        out.push_str(&format!(
            "  {:<20} {:>3}  {c}{:>5}{RESET}  {:>7}{}\n",
            d.dimension,
            d.raw_score,
            d.level.value(),
            next,
            weakest
        ));
    }
    out.push('\n');

    // Gaps
    out.push_str(&format!("{BOLD}GAPS{RESET} ({} total)\n", report.gaps.len()));
    if report.gaps.is_empty() {
        out.push_str(&format!("  {DIM}none{RESET}\n"));
    }
    for gap in &report.gaps {
        out.push_str(&format!("  - {}\n", gap));
    }

    if !report.recommendations.is_empty() {
        out.push('\n');
        out.push_str(&format!("{BOLD}ROADMAP{RESET}\n"));
        for (i, rec) in report.recommendations.iter().enumerate() {
            out.push_str(&format!("  {DIM}{:>2}.{RESET} {}\n", i + 1, rec));
        }
    }
    out.push('\n');

    // Tip based on level
    if let Some(level) = MaturityLevel::new(report.overall_level) {
        out.push_str(&format!("{DIM}{}.{RESET}\n", level.description()));
        if level < MaturityLevel::MAX {
            out.push_str(&format!(
                "{DIM}Run `cimm recommend --target {}` for a roadmap to the next level.{RESET}\n",
                level.value() + 1
            ));
        }
    }

    Ok(out)
}
