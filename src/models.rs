//! Core data models for cimm
//!
//! These models are shared by the scorer, the config layer and the
//! reporters: practice snapshots, maturity levels and assessments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Highest raw score a collector may report for a dimension
pub const MAX_RAW_SCORE: u32 = 10;

/// The six practice areas every default rubric covers
pub const STANDARD_DIMENSIONS: &[&str] = &[
    "version_control",
    "build_automation",
    "testing",
    "deployment",
    "monitoring",
    "security",
];

/// Errors raised while building a [`PracticeSnapshot`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot contains no dimensions")]
    Empty,

    #[error("raw score {score} for '{dimension}' is out of range (0-{max})", max = MAX_RAW_SCORE)]
    ScoreOutOfRange { dimension: String, score: u32 },

    #[error("invalid dimension name '{0}'")]
    InvalidDimensionName(String),

    #[error("dimension '{0}' is given more than once")]
    DuplicateDimension(String),
}

/// A discrete maturity level, always within 1..=5
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct MaturityLevel(u8);

impl MaturityLevel {
    pub const INITIAL: MaturityLevel = MaturityLevel(1);
    pub const MANAGED: MaturityLevel = MaturityLevel(2);
    pub const DEFINED: MaturityLevel = MaturityLevel(3);
    pub const MEASURED: MaturityLevel = MaturityLevel(4);
    pub const OPTIMIZING: MaturityLevel = MaturityLevel(5);

    pub const MIN: MaturityLevel = Self::INITIAL;
    pub const MAX: MaturityLevel = Self::OPTIMIZING;

    /// Build a level, returning `None` outside 1..=5
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&value)
            .then_some(MaturityLevel(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The level directly above this one (None at the top)
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "Initial",
            2 => "Managed",
            3 => "Defined",
            4 => "Measured",
            _ => "Optimizing",
        }
    }

    /// One-line characterization used by the reporters
    pub fn description(self) -> &'static str {
        match self.0 {
            1 => "Ad-hoc, manual processes with little automation",
            2 => "Basic automation exists but is applied inconsistently",
            3 => "Standardized, automated pipelines across teams",
            4 => "Delivery is measured and quality gates are data-driven",
            _ => "Continuous improvement driven by feedback and metrics",
        }
    }

    /// All levels in ascending order
    pub fn all() -> impl Iterator<Item = MaturityLevel> {
        (Self::MIN.0..=Self::MAX.0).map(MaturityLevel)
    }
}

impl TryFrom<u8> for MaturityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        MaturityLevel::new(value)
            .ok_or_else(|| format!("maturity level {} is outside 1-5", value))
    }
}

impl From<MaturityLevel> for u8 {
    fn from(level: MaturityLevel) -> u8 {
        level.0
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize a dimension name to snake_case for lookup
///
/// `BuildAutomation`, `build-automation` and `Build Automation` all map to
/// `build_automation`.
pub fn normalize_dimension_name(name: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = name.trim().chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            // Split camelCase and the end of acronyms (CIBuild -> ci_build)
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && i + 1 < chars.len()
                && chars[i + 1].is_lowercase();

            if (prev_is_lower || is_acronym_end) && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else if *c == '-' || *c == ' ' || *c == '_' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(*c);
        }
    }

    result.trim_end_matches('_').to_string()
}

/// Raw practice scores per dimension, as collected by an external observer
///
/// Immutable once constructed; iteration is in ascending dimension order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PracticeSnapshot {
    scores: BTreeMap<String, u32>,
}

impl PracticeSnapshot {
    /// Build a snapshot, normalizing names and validating score ranges
    pub fn new<I, K>(scores: I) -> Result<Self, SnapshotError>
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (name, score) in scores {
            let dimension = normalize_dimension_name(name.as_ref());
            if dimension.is_empty() {
                return Err(SnapshotError::InvalidDimensionName(
                    name.as_ref().to_string(),
                ));
            }
            if score > MAX_RAW_SCORE {
                return Err(SnapshotError::ScoreOutOfRange { dimension, score });
            }
            if map.contains_key(&dimension) {
                return Err(SnapshotError::DuplicateDimension(dimension));
            }
            map.insert(dimension, score);
        }

        if map.is_empty() {
            return Err(SnapshotError::Empty);
        }

        Ok(Self { scores: map })
    }

    pub fn get(&self, dimension: &str) -> Option<u32> {
        self.scores.get(dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<'de> Deserialize<'de> for PracticeSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
        PracticeSnapshot::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Scoring result for a single dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: String,
    pub raw_score: u32,
    pub level: MaturityLevel,
    /// Lowest raw score that lifts the dimension above its current level,
    /// `None` when the rubric has no higher step
    pub next_threshold: Option<u32>,
}

/// Distance from a dimension's level to the next one up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub dimension: String,
    pub current_level: MaturityLevel,
    pub required_score: Option<u32>,
}

impl std::fmt::Display for Gap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let next = self.current_level.value() + 1;
        match self.required_score {
            Some(t) => write!(
                f,
                "dimension {} is at level {}; reaching {} requires raw score >= {}",
                self.dimension, self.current_level, next, t
            ),
            None => write!(
                f,
                "dimension {} is at level {}; level {} is not reachable under the current rubric",
                self.dimension, self.current_level, next
            ),
        }
    }
}

/// Output of the scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityAssessment {
    /// Minimum of the per-dimension levels
    pub overall_level: MaturityLevel,
    /// Per-dimension details keyed by dimension name
    pub dimensions: BTreeMap<String, DimensionScore>,
    pub gaps: Vec<Gap>,
    /// Target used when gaps were computed (None = distance to next level)
    pub target_level: Option<MaturityLevel>,
}

impl MaturityAssessment {
    /// Per-dimension levels as a flat map
    pub fn dimension_levels(&self) -> BTreeMap<String, MaturityLevel> {
        self.dimensions
            .iter()
            .map(|(name, d)| (name.clone(), d.level))
            .collect()
    }

    /// Gap statements rendered as human-readable strings
    pub fn gap_statements(&self) -> Vec<String> {
        self.gaps.iter().map(ToString::to_string).collect()
    }

    /// Dimensions sitting at the overall level (the ones capping maturity)
    pub fn weakest_dimensions(&self) -> Vec<&str> {
        self.dimensions
            .values()
            .filter(|d| d.level == self.overall_level)
            .map(|d| d.dimension.as_str())
            .collect()
    }
}

/// Flat, serialization-friendly report handed to the reporters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaturityReport {
    pub overall_level: u8,
    pub level_name: String,
    pub dimension_levels: BTreeMap<String, u8>,
    pub gaps: Vec<String>,
    #[serde(default)]
    pub target_level: Option<u8>,
    #[serde(default)]
    pub dimensions: Vec<DimensionScore>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl MaturityReport {
    pub fn from_assessment(assessment: &MaturityAssessment, recommendations: Vec<String>) -> Self {
        Self {
            overall_level: assessment.overall_level.value(),
            level_name: assessment.overall_level.name().to_string(),
            dimension_levels: assessment
                .dimension_levels()
                .into_iter()
                .map(|(k, v)| (k, v.value()))
                .collect(),
            gaps: assessment.gap_statements(),
            target_level: assessment.target_level.map(MaturityLevel::value),
            dimensions: assessment.dimensions.values().cloned().collect(),
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maturity_level_bounds() {
        assert!(MaturityLevel::new(0).is_none());
        assert!(MaturityLevel::new(6).is_none());
        assert_eq!(MaturityLevel::new(3), Some(MaturityLevel::DEFINED));
        assert_eq!(MaturityLevel::OPTIMIZING.next(), None);
        assert_eq!(MaturityLevel::INITIAL.next(), Some(MaturityLevel::MANAGED));
        assert_eq!(MaturityLevel::all().count(), 5);
    }

    #[test]
    fn test_maturity_level_serde() {
        let level: MaturityLevel = serde_json::from_str("4").unwrap();
        assert_eq!(level, MaturityLevel::MEASURED);
        assert!(serde_json::from_str::<MaturityLevel>("9").is_err());
        assert_eq!(serde_json::to_string(&MaturityLevel::MANAGED).unwrap(), "2");
    }

    #[test]
    fn test_normalize_dimension_name() {
        assert_eq!(normalize_dimension_name("BuildAutomation"), "build_automation");
        assert_eq!(normalize_dimension_name("build-automation"), "build_automation");
        assert_eq!(normalize_dimension_name("Build Automation"), "build_automation");
        assert_eq!(normalize_dimension_name("version_control"), "version_control");
        assert_eq!(normalize_dimension_name("CIBuild"), "ci_build");
        assert_eq!(normalize_dimension_name("  testing "), "testing");
    }

    #[test]
    fn test_snapshot_validation() {
        assert_eq!(
            PracticeSnapshot::new(Vec::<(&str, u32)>::new()),
            Err(SnapshotError::Empty)
        );
        assert_eq!(
            PracticeSnapshot::new([("testing", 11)]),
            Err(SnapshotError::ScoreOutOfRange {
                dimension: "testing".into(),
                score: 11
            })
        );
        assert!(matches!(
            PracticeSnapshot::new([("--", 3)]),
            Err(SnapshotError::InvalidDimensionName(_))
        ));

        let snapshot = PracticeSnapshot::new([("Testing", 7), ("security", 2)]).unwrap();
        assert_eq!(snapshot.get("testing"), Some(7));
        assert_eq!(snapshot.dimensions().collect::<Vec<_>>(), vec!["security", "testing"]);
    }

    #[test]
    fn test_snapshot_deserialize_validates() {
        let snapshot: PracticeSnapshot =
            serde_json::from_str(r#"{"version_control": 8, "testing": 3}"#).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert!(serde_json::from_str::<PracticeSnapshot>(r#"{"testing": 42}"#).is_err());
        assert!(serde_json::from_str::<PracticeSnapshot>("{}").is_err());
    }

    #[test]
    fn test_gap_display() {
        let gap = Gap {
            dimension: "testing".into(),
            current_level: MaturityLevel::DEFINED,
            required_score: Some(9),
        };
        assert_eq!(
            gap.to_string(),
            "dimension testing is at level 3; reaching 4 requires raw score >= 9"
        );

        let capped = Gap {
            required_score: None,
            ..gap
        };
        assert!(capped.to_string().contains("not reachable"));
    }

    #[test]
    fn test_snapshot_rejects_names_that_collide_after_normalizing() {
        assert_eq!(
            PracticeSnapshot::new([("testing", 9), ("Testing", 1)]),
            Err(SnapshotError::DuplicateDimension("testing".into()))
        );

        let err = serde_json::from_str::<PracticeSnapshot>(r#"{"testing": 9, "Testing": 1}"#)
            .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
