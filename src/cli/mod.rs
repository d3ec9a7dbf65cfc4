//! CLI command definitions and handlers

mod assess;
mod init;
mod recommend;
mod rubric;

use anyhow::{Context, Result};
use cimm::config::{load_config_file, load_project_config, DimensionRubric, ProjectConfig};
use cimm::input::{load_snapshot, parse_inline_scores};
use cimm::models::PracticeSnapshot;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// cimm - CI/CD maturity assessment
///
/// Scores delivery practices against a staged rubric. The weakest
/// dimension caps the overall level.
#[derive(Parser, Debug)]
#[command(name = "cimm")]
#[command(
    version,
    about = "CI/CD maturity assessment: score practices against a staged rubric and plan the next level",
    long_about = "cimm reads a snapshot of raw practice scores (0-10) for dimensions such as \
version_control, build_automation, testing, deployment, monitoring and security, maps each \
onto a maturity level (1-5) through a rubric, and reports the overall level as the minimum \
across dimensions.",
    after_help = "\
Examples:
  cimm assess snapshot.json                       Assess a collected snapshot
  cimm assess --score testing=7 --score security=3
  cimm assess snapshot.json --format json         JSON output for scripting
  cimm assess snapshot.json --fail-below 3        Exit code 1 below level 3 (CI gate)
  cimm recommend snapshot.json --target 4         Roadmap to level 4
  cimm rubric                                     Show the effective rubric
  cimm init                                       Write an example cimm.toml"
)]
pub struct Cli {
    /// Directory searched for cimm.toml / .cimmrc.json / .cimm.yaml
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Explicit config file (overrides discovery)
    #[arg(long, short = 'c', global = true, env = "CIMM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess a practice snapshot and report levels and gaps
    #[command(after_help = "\
Examples:
  cimm assess snapshot.json                          Text report
  cimm assess snapshot.toml --format markdown -o maturity.md
  cimm assess - < snapshot.json                      Read JSON from stdin
  cimm assess snapshot.json --target 4               Gaps relative to level 4
  cimm assess snapshot.json --explain                Show the scoring breakdown")]
    Assess {
        /// Snapshot file (JSON or TOML, `-` for stdin)
        snapshot: Option<PathBuf>,

        /// Inline raw score, repeatable (e.g. --score testing=7)
        #[arg(long = "score", short = 's', value_name = "DIMENSION=SCORE")]
        scores: Vec<String>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout); the format extension is added when missing
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Target level (1-5) for gaps and roadmap
        #[arg(long, short = 't')]
        target: Option<u8>,

        /// Exit with code 1 if the overall level is below this (1-5)
        #[arg(long)]
        fail_below: Option<u8>,

        /// Append the scoring breakdown
        #[arg(long)]
        explain: bool,
    },

    /// Print a roadmap toward a target level
    Recommend {
        /// Snapshot file (JSON or TOML, `-` for stdin)
        snapshot: Option<PathBuf>,

        /// Inline raw score, repeatable (e.g. --score testing=7)
        #[arg(long = "score", short = 's', value_name = "DIMENSION=SCORE")]
        scores: Vec<String>,

        /// Target level (1-5); defaults to target_level from config
        #[arg(long, short = 't')]
        target: Option<u8>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective rubric (built-in ladders plus config overrides)
    Rubric {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an example cimm.toml into --dir
    Init {
        /// Overwrite an existing cimm.toml
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Assess {
            ref snapshot,
            ref scores,
            ref format,
            ref output,
            target,
            fail_below,
            explain,
        } => {
            let (config, rubric) = load_context(&cli)?;
            let snapshot = resolve_snapshot(snapshot.as_deref(), scores)?;
            assess::run(
                &config,
                &rubric,
                &snapshot,
                format.as_deref(),
                output.as_deref(),
                target,
                fail_below,
                explain,
            )
        }

        Commands::Recommend {
            ref snapshot,
            ref scores,
            target,
            json,
        } => {
            let (config, rubric) = load_context(&cli)?;
            let snapshot = resolve_snapshot(snapshot.as_deref(), scores)?;
            recommend::run(&config, &rubric, &snapshot, target, json)
        }

        Commands::Rubric { json } => {
            let (_, rubric) = load_context(&cli)?;
            rubric::run(&rubric, json)
        }

        Commands::Init { force } => init::run(&cli.dir, force),

        Commands::Version => {
            println!("cimm {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load project config and the rubric it describes
fn load_context(cli: &Cli) -> Result<(ProjectConfig, DimensionRubric)> {
    let config = match &cli.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_project_config(&cli.dir),
    };
    let rubric = config.rubric().context("Invalid rubric configuration")?;
    Ok((config, rubric))
}

/// Snapshot from a file or from inline --score pairs (not both)
fn resolve_snapshot(path: Option<&Path>, scores: &[String]) -> Result<PracticeSnapshot> {
    match (path, scores.is_empty()) {
        (Some(_), false) => {
            anyhow::bail!("Pass either a snapshot file or --score pairs, not both")
        }
        (Some(path), true) => load_snapshot(path),
        (None, false) => parse_inline_scores(scores),
        (None, true) => anyhow::bail!(
            "No snapshot given. Pass a snapshot file (or `-` for stdin) or --score dimension=score"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_assess_flags() {
        let cli = Cli::try_parse_from([
            "cimm", "assess", "snap.json", "--format", "json", "--target", "4", "--fail-below", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Assess {
                snapshot,
                format,
                target,
                fail_below,
                ..
            } => {
                assert_eq!(snapshot, Some(PathBuf::from("snap.json")));
                assert_eq!(format.as_deref(), Some("json"));
                assert_eq!(target, Some(4));
                assert_eq!(fail_below, Some(2));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["cimm", "assess", "x.json", "--format", "sarif"]).is_err());
    }

    #[test]
    fn test_resolve_snapshot_requires_one_source() {
        assert!(resolve_snapshot(None, &[]).is_err());
        assert!(resolve_snapshot(Some(Path::new("x.json")), &["testing=1".to_string()]).is_err());
        let snapshot = resolve_snapshot(None, &["testing=4".to_string()]).unwrap();
        assert_eq!(snapshot.get("testing"), Some(4));
    }
}
