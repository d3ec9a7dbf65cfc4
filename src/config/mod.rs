//! Configuration module for cimm
//!
//! This module handles:
//! - Dimension rubrics (built-in ladders and validation)
//! - Project-level configuration (cimm.toml)
//! - CLI defaults

mod project_config;
mod rubric;

pub use project_config::{
    load_config_file, load_project_config, CliDefaults, ProjectConfig, RubricConfig,
    EXAMPLE_CONFIG,
};
pub use rubric::{DimensionRubric, RubricError, RubricStep};
