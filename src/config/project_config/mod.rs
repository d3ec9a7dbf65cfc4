//! Project-level configuration support
//!
//! Loads per-project configuration from `cimm.toml`, `.cimmrc.json`,
//! or `.cimm.yaml` files in the given directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # cimm.toml
//!
//! target_level = 4
//!
//! [rubric]
//! skip_defaults = false
//!
//! [rubric.dimensions]
//! testing = [[0, 1], [4, 2], [6, 3], [8, 4], [10, 5]]
//! performance = [[0, 1], [3, 2], [5, 3], [7, 4], [9, 5]]
//!
//! [defaults]
//! format = "text"
//! fail_below = 2
//! ```

use crate::config::rubric::{DimensionRubric, RubricError};
use crate::models::MaturityLevel;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Example configuration written by `cimm init`
pub const EXAMPLE_CONFIG: &str = r#"# cimm configuration
#
# Level the roadmap aims for (1-5). Gaps and recommendations are computed
# against it when no --target is passed on the command line.
target_level = 3

[rubric]
# Set to true to drop the built-in ladders and use only the ones below
skip_defaults = false

# Each ladder is a list of [threshold, level] pairs. The highest threshold
# not above a dimension's raw score (0-10) decides its level; scores below
# the first threshold sit at level 1.
[rubric.dimensions]
# testing = [[0, 1], [3, 2], [7, 3], [9, 4], [10, 5]]
# performance = [[0, 1], [3, 2], [5, 3], [7, 4], [9, 5]]

[defaults]
# Default output format (text, json, markdown)
format = "text"

# Exit with code 1 when the overall level is below this value
# fail_below = 2
"#;

/// Project-level configuration loaded from cimm.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Level gaps and recommendations aim for
    #[serde(default)]
    pub target_level: Option<MaturityLevel>,

    /// Rubric overrides
    #[serde(default)]
    pub rubric: RubricConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Rubric section of the project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RubricConfig {
    /// If true, the built-in ladders are not used at all
    #[serde(default)]
    pub skip_defaults: bool,

    /// Ladders keyed by dimension name, as `[threshold, level]` pairs
    #[serde(default)]
    pub dimensions: BTreeMap<String, Vec<(u32, u8)>>,
}

impl RubricConfig {
    /// Built-in rubric (unless skipped) with configured ladders layered on top
    pub fn effective_rubric(&self) -> Result<DimensionRubric, RubricError> {
        let configured = if self.dimensions.is_empty() {
            None
        } else {
            Some(DimensionRubric::from_pairs(
                self.dimensions.iter().map(|(k, v)| (k, v.iter().copied())),
            )?)
        };

        match (self.skip_defaults, configured) {
            (true, Some(rubric)) => Ok(rubric),
            (true, None) => Err(RubricError::Empty),
            (false, Some(rubric)) => {
                let mut merged = DimensionRubric::builtin();
                merged.merge(rubric);
                Ok(merged)
            }
            (false, None) => Ok(DimensionRubric::builtin()),
        }
    }
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Fail (exit 1) when the overall level is below this
    #[serde(default)]
    pub fail_below: Option<MaturityLevel>,

    /// Append the scoring explanation to text output
    #[serde(default)]
    pub explain: Option<bool>,
}

impl ProjectConfig {
    /// The rubric this project scores against
    pub fn rubric(&self) -> Result<DimensionRubric, RubricError> {
        self.rubric.effective_rubric()
    }
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `cimm.toml`
/// 2. `.cimmrc.json`
/// 3. `.cimm.yaml` / `.cimm.yml`
///
/// Returns default configuration if no config file is found or the one
/// found cannot be parsed.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join("cimm.toml");
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(".cimmrc.json");
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    for yaml_name in &[".cimm.yaml", ".cimm.yml"] {
        let yaml_path = dir.join(yaml_name);
        if !yaml_path.exists() {
            continue;
        }
        match load_yaml_config(&yaml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", yaml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", yaml_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load an explicitly named config file; errors propagate to the caller
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "json" => load_json_config(path),
        "yaml" | "yml" => load_yaml_config(path),
        _ => load_toml_config(path),
    }
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

fn load_yaml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;

    // YAML is a superset of JSON, so pure-JSON YAML files work
    if let Ok(config) = serde_json::from_str::<ProjectConfig>(&content) {
        return Ok(config);
    }

    anyhow::bail!(
        "YAML config files with non-JSON syntax are not supported.\n\
         Please convert {} to TOML format (cimm.toml) or use JSON syntax.",
        path.display()
    )
}
