//! Dimension rubrics
//!
//! A rubric maps each dimension's raw score onto a maturity level through
//! an ordered ladder of `(threshold, level)` steps. The built-in rubric
//! covers the six standard dimensions; project config can replace or extend
//! it.

use crate::models::{normalize_dimension_name, MaturityLevel, MAX_RAW_SCORE};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Built-in ladders for the standard dimensions
const DEFAULT_LADDERS: &[(&str, [(u32, u8); 5])] = &[
    ("version_control", [(0, 1), (2, 2), (4, 3), (7, 4), (9, 5)]),
    ("build_automation", [(0, 1), (3, 2), (5, 3), (7, 4), (9, 5)]),
    ("testing", [(0, 1), (3, 2), (7, 3), (9, 4), (10, 5)]),
    ("deployment", [(0, 1), (3, 2), (5, 3), (8, 4), (10, 5)]),
    ("monitoring", [(0, 1), (3, 2), (5, 3), (7, 4), (9, 5)]),
    ("security", [(0, 1), (2, 2), (5, 3), (7, 4), (9, 5)]),
];

/// Rubric well-formedness errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RubricError {
    #[error("rubric defines no dimensions")]
    Empty,

    #[error("dimension '{0}' has an empty threshold list")]
    EmptyLadder(String),

    #[error("dimension '{dimension}': thresholds must be strictly ascending (got {threshold} after {previous})")]
    UnorderedThresholds {
        dimension: String,
        previous: u32,
        threshold: u32,
    },

    #[error("dimension '{dimension}': level {level} at threshold {threshold} is lower than the step before it")]
    DecreasingLevel {
        dimension: String,
        threshold: u32,
        level: u8,
    },

    #[error("dimension '{dimension}': level {level} is outside 1-5")]
    LevelOutOfRange { dimension: String, level: u8 },

    #[error("dimension '{dimension}': threshold {threshold} exceeds the maximum raw score ({max})", max = MAX_RAW_SCORE)]
    ThresholdOutOfRange { dimension: String, threshold: u32 },

    #[error("dimension '{0}' is defined more than once")]
    DuplicateDimension(String),
}

/// One rung of a dimension ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RubricStep {
    pub threshold: u32,
    pub level: MaturityLevel,
}

/// Per-dimension threshold ladders, validated at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DimensionRubric {
    ladders: BTreeMap<String, Vec<RubricStep>>,
}

impl DimensionRubric {
    /// Build a rubric from raw `(threshold, level)` pairs
    ///
    /// Dimension names are normalized; every ladder must be non-empty with
    /// strictly ascending thresholds and non-decreasing levels.
    pub fn from_pairs<I, K, L>(ladders: I) -> Result<Self, RubricError>
    where
        I: IntoIterator<Item = (K, L)>,
        K: AsRef<str>,
        L: IntoIterator<Item = (u32, u8)>,
    {
        let mut map = BTreeMap::new();
        for (name, pairs) in ladders {
            let dimension = normalize_dimension_name(name.as_ref());
            if map.contains_key(&dimension) {
                return Err(RubricError::DuplicateDimension(dimension));
            }
            let ladder = validate_ladder(&dimension, pairs)?;
            map.insert(dimension, ladder);
        }

        if map.is_empty() {
            return Err(RubricError::Empty);
        }

        Ok(Self { ladders: map })
    }

    /// The built-in rubric for the standard dimensions
    pub fn builtin() -> Self {
        let ladders = DEFAULT_LADDERS
            .iter()
            .map(|(name, steps)| {
                let steps = steps
                    .iter()
                    .filter_map(|&(threshold, level)| {
                        MaturityLevel::new(level).map(|level| RubricStep { threshold, level })
                    })
                    .collect();
                (name.to_string(), steps)
            })
            .collect();
        Self { ladders }
    }

    /// Replace or add ladders from another rubric
    pub fn merge(&mut self, other: DimensionRubric) {
        self.ladders.extend(other.ladders);
    }

    pub fn contains(&self, dimension: &str) -> bool {
        self.ladders.contains_key(dimension)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.ladders.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RubricStep])> {
        self.ladders.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.ladders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ladders.is_empty()
    }

    /// Level for a raw score, `None` if the dimension is not in the rubric
    ///
    /// The highest threshold not exceeding the score wins; scores below the
    /// lowest threshold sit at level 1.
    pub fn level_for(&self, dimension: &str, raw_score: u32) -> Option<MaturityLevel> {
        let ladder = self.ladders.get(dimension)?;
        let level = ladder
            .iter()
            .take_while(|step| step.threshold <= raw_score)
            .last()
            .map(|step| step.level)
            .unwrap_or(MaturityLevel::INITIAL);
        Some(level)
    }

    /// Lowest threshold whose level exceeds `level`
    pub fn next_threshold(&self, dimension: &str, level: MaturityLevel) -> Option<u32> {
        self.ladders
            .get(dimension)?
            .iter()
            .find(|step| step.level > level)
            .map(|step| step.threshold)
    }
}

impl Default for DimensionRubric {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_ladder<L>(dimension: &str, pairs: L) -> Result<Vec<RubricStep>, RubricError>
where
    L: IntoIterator<Item = (u32, u8)>,
{
    let mut ladder: Vec<RubricStep> = Vec::new();

    for (threshold, raw_level) in pairs {
        let level = MaturityLevel::new(raw_level).ok_or_else(|| RubricError::LevelOutOfRange {
            dimension: dimension.to_string(),
            level: raw_level,
        })?;

        if threshold > MAX_RAW_SCORE {
            return Err(RubricError::ThresholdOutOfRange {
                dimension: dimension.to_string(),
                threshold,
            });
        }

        if let Some(prev) = ladder.last() {
            if threshold <= prev.threshold {
                return Err(RubricError::UnorderedThresholds {
                    dimension: dimension.to_string(),
                    previous: prev.threshold,
                    threshold,
                });
            }
            if level < prev.level {
                return Err(RubricError::DecreasingLevel {
                    dimension: dimension.to_string(),
                    threshold,
                    level: raw_level,
                });
            }
        }

        ladder.push(RubricStep { threshold, level });
    }

    if ladder.is_empty() {
        return Err(RubricError::EmptyLadder(dimension.to_string()));
    }

    Ok(ladder)
}
