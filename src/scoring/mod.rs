//! Weakest-link maturity scoring
//!
//! This module turns a practice snapshot into a maturity assessment and a
//! roadmap. It performs no I/O and holds no state.
//!
//! # Scoring Formula
//!
//! ```text
//! Dimension level = level of the highest rubric threshold <= raw score
//!                   (level 1 when the score is below every threshold)
//! Overall level   = min(dimension levels)
//! ```
//!
//! The overall level is never an average: a single weak dimension caps the
//! whole organization, the same way a staged maturity model requires every
//! criterion of a level to be met.
//!
//! # Example
//!
//! With the ladder `testing = [(0,1), (3,2), (7,3), (9,4), (10,5)]`:
//!
//! - raw score 7 → level 3
//! - next level needs a raw score of 9
//! - if every other dimension sits at 4 or above, the overall level is 3

mod maturity_scorer;

pub use maturity_scorer::MaturityScorer;

use crate::config::DimensionRubric;
use crate::models::{MaturityAssessment, MaturityLevel, PracticeSnapshot};
use thiserror::Error;

/// Caller-input errors raised by the scorer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaturityError {
    #[error("unknown dimension '{0}': not defined in the rubric")]
    UnknownDimension(String),

    #[error("invalid target level {0}: must be between 1 and 5")]
    InvalidTarget(u8),
}

pub type MaturityResult<T> = Result<T, MaturityError>;

/// Parse a raw target level
pub fn target_level(value: u8) -> MaturityResult<MaturityLevel> {
    MaturityLevel::new(value).ok_or(MaturityError::InvalidTarget(value))
}

/// Score a snapshot; gaps show the distance to the next level up
pub fn score(
    snapshot: &PracticeSnapshot,
    rubric: &DimensionRubric,
) -> MaturityResult<MaturityAssessment> {
    MaturityScorer::new(rubric).score(snapshot)
}

/// Score a snapshot; gaps only for dimensions below `target`
pub fn score_with_target(
    snapshot: &PracticeSnapshot,
    rubric: &DimensionRubric,
    target: u8,
) -> MaturityResult<MaturityAssessment> {
    let target = target_level(target)?;
    MaturityScorer::new(rubric).with_target(target).score(snapshot)
}

/// Roadmap toward `target`, one line per lagging dimension in name order
pub fn recommend(assessment: &MaturityAssessment, target: u8) -> MaturityResult<Vec<String>> {
    let target = target_level(target)?;
    Ok(maturity_scorer::recommendations(assessment, target))
}

/// Human-readable breakdown of an assessment
pub fn explain(assessment: &MaturityAssessment) -> String {
    maturity_scorer::explain(assessment)
}
