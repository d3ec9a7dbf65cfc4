//! JSON reporter
//!
//! Outputs the full MaturityReport as pretty-printed JSON.
//! The top-level `overall_level`, `dimension_levels` and `gaps` fields are
//! stable for downstream tooling.

use crate::models::MaturityReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &MaturityReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
