//! Rubric-driven maturity scorer

use super::{MaturityError, MaturityResult};
use crate::config::DimensionRubric;
use crate::models::{DimensionScore, Gap, MaturityAssessment, MaturityLevel, PracticeSnapshot};
use std::collections::BTreeMap;
use tracing::debug;

/// Scores snapshots against a rubric
#[derive(Debug, Clone, Copy)]
pub struct MaturityScorer<'a> {
    rubric: &'a DimensionRubric,
    target: Option<MaturityLevel>,
}

impl<'a> MaturityScorer<'a> {
    pub fn new(rubric: &'a DimensionRubric) -> Self {
        Self {
            rubric,
            target: None,
        }
    }

    /// Restrict gap statements to dimensions below `target`
    pub fn with_target(mut self, target: MaturityLevel) -> Self {
        self.target = Some(target);
        self
    }

    /// Calculate the assessment for a snapshot
    pub fn score(&self, snapshot: &PracticeSnapshot) -> MaturityResult<MaturityAssessment> {
        let mut dimensions = BTreeMap::new();

        for (name, raw_score) in snapshot.iter() {
            let level = self
                .rubric
                .level_for(name, raw_score)
                .ok_or_else(|| MaturityError::UnknownDimension(name.to_string()))?;
            let next_threshold = self.rubric.next_threshold(name, level);

            debug!(
                "Dimension {}: raw={} level={} next={:?}",
                name, raw_score, level, next_threshold
            );

            dimensions.insert(
                name.to_string(),
                DimensionScore {
                    dimension: name.to_string(),
                    raw_score,
                    level,
                    next_threshold,
                },
            );
        }

        let overall_level = dimensions
            .values()
            .map(|d| d.level)
            .min()
            .unwrap_or(MaturityLevel::INITIAL);

        let cutoff = self.target.unwrap_or(MaturityLevel::MAX);
        let gaps = dimensions
            .values()
            .filter(|d| d.level < cutoff)
            .map(|d| Gap {
                dimension: d.dimension.clone(),
                current_level: d.level,
                required_score: d.next_threshold,
            })
            .collect();

        Ok(MaturityAssessment {
            overall_level,
            dimensions,
            gaps,
            target_level: self.target,
        })
    }
}

pub(super) fn recommendations(assessment: &MaturityAssessment, target: MaturityLevel) -> Vec<String> {
    // BTreeMap iteration keeps this in ascending dimension order
    assessment
        .dimensions
        .values()
        .filter(|d| d.level < target)
        .map(|d| {
            let next = d.level.value() + 1;
            match d.next_threshold {
                Some(threshold) => format!(
                    "{}: currently level {} ({}); raise the raw score from {} to at least {} to reach level {}",
                    d.dimension,
                    d.level,
                    d.level.name(),
                    d.raw_score,
                    threshold,
                    next
                ),
                None => format!(
                    "{}: currently level {} ({}); level {} is not reachable under the current rubric",
                    d.dimension,
                    d.level,
                    d.level.name(),
                    next
                ),
            }
        })
        .collect()
}

pub(super) fn explain(assessment: &MaturityAssessment) -> String {
    let mut lines = Vec::new();
    let overall = assessment.overall_level;

    lines.push(format!(
        "# Maturity Level: {} ({})\n",
        overall,
        overall.name()
    ));

    lines.push("## Scoring Formula\n".to_string());
    lines.push("```".to_string());
    lines.push("Dimension = level of highest rubric threshold <= raw score (else 1)".to_string());
    lines.push("Overall   = min(dimension levels)".to_string());
    lines.push("```\n".to_string());

    lines.push("## Dimensions\n".to_string());
    for d in assessment.dimensions.values() {
        let marker = if d.level == overall { " (weakest link)" } else { "" };
        let next = match d.next_threshold {
            Some(t) => format!("next level at raw score {}", t),
            None if d.level == MaturityLevel::MAX => "top level".to_string(),
            None => "no higher step in rubric".to_string(),
        };
        lines.push(format!(
            "- **{}**: raw {} → level {} ({}), {}{}",
            d.dimension,
            d.raw_score,
            d.level,
            d.level.name(),
            next,
            marker
        ));
    }
    lines.push(String::new());

    let weakest = assessment.weakest_dimensions();
    lines.push(format!(
        "Overall level is capped at {} by: {}",
        overall,
        weakest.join(", ")
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MAX_RAW_SCORE, STANDARD_DIMENSIONS};
    use crate::scoring::{recommend, score, score_with_target};

    fn testing_rubric() -> DimensionRubric {
        DimensionRubric::from_pairs([("testing", vec![(0, 1), (3, 2), (7, 3), (9, 4), (10, 5)])])
            .unwrap()
    }

    fn sample_snapshot() -> PracticeSnapshot {
        PracticeSnapshot::new([
            ("version_control", 8),
            ("build_automation", 5),
            ("testing", 3),
            ("deployment", 4),
            ("monitoring", 6),
            ("security", 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_dimension_level() {
        let rubric = testing_rubric();
        let snapshot = PracticeSnapshot::new([("testing", 7)]).unwrap();
        let assessment = score(&snapshot, &rubric).unwrap();

        assert_eq!(assessment.dimensions["testing"].level, MaturityLevel::DEFINED);
        assert_eq!(assessment.dimensions["testing"].next_threshold, Some(9));
        assert_eq!(assessment.overall_level, MaturityLevel::DEFINED);
    }

    #[test]
    fn test_unknown_dimension() {
        let rubric = testing_rubric();
        let snapshot = PracticeSnapshot::new([("testing", 7), ("performance", 4)]).unwrap();
        assert_eq!(
            score(&snapshot, &rubric),
            Err(MaturityError::UnknownDimension("performance".into()))
        );
    }

    #[test]
    fn test_all_maximal_is_optimizing() {
        let rubric = DimensionRubric::builtin();
        let snapshot =
            PracticeSnapshot::new(STANDARD_DIMENSIONS.iter().map(|d| (*d, MAX_RAW_SCORE))).unwrap();
        let assessment = score(&snapshot, &rubric).unwrap();

        assert_eq!(assessment.overall_level, MaturityLevel::OPTIMIZING);
        assert!(assessment.gaps.is_empty());
    }

    #[test]
    fn test_weakest_link_caps_overall() {
        let rubric = DimensionRubric::builtin();
        for weak in STANDARD_DIMENSIONS {
            let snapshot = PracticeSnapshot::new(
                STANDARD_DIMENSIONS
                    .iter()
                    .map(|d| (*d, if d == weak { 0 } else { MAX_RAW_SCORE })),
            )
            .unwrap();
            let assessment = score(&snapshot, &rubric).unwrap();

            assert_eq!(assessment.overall_level, MaturityLevel::INITIAL, "weak={weak}");
            assert_eq!(assessment.weakest_dimensions(), vec![*weak]);
        }
    }

    #[test]
    fn test_overall_is_minimum_not_average() {
        let rubric = DimensionRubric::builtin();
        let assessment = score(&sample_snapshot(), &rubric).unwrap();

        let min = assessment.dimension_levels().values().copied().min().unwrap();
        assert_eq!(assessment.overall_level, min);
        assert_eq!(assessment.dimension_levels()["version_control"], MaturityLevel::MEASURED);
        assert_eq!(assessment.dimension_levels()["security"], MaturityLevel::MANAGED);
        assert_eq!(assessment.overall_level, MaturityLevel::MANAGED);
    }

    #[test]
    fn test_score_is_idempotent() {
        let rubric = DimensionRubric::builtin();
        let snapshot = sample_snapshot();
        assert_eq!(score(&snapshot, &rubric), score(&snapshot, &rubric));
    }

    #[test]
    fn test_gaps_without_target_show_next_level() {
        let rubric = testing_rubric();
        let snapshot = PracticeSnapshot::new([("testing", 7)]).unwrap();
        let assessment = score(&snapshot, &rubric).unwrap();

        assert_eq!(
            assessment.gap_statements(),
            vec!["dimension testing is at level 3; reaching 4 requires raw score >= 9"]
        );
        assert_eq!(assessment.target_level, None);
    }

    #[test]
    fn test_gaps_with_target_skip_satisfied_dimensions() {
        let rubric = DimensionRubric::builtin();
        let assessment = score_with_target(&sample_snapshot(), &rubric, 3).unwrap();

        let gap_dims: Vec<&str> = assessment.gaps.iter().map(|g| g.dimension.as_str()).collect();
        // build_automation=5 and monitoring=6 already reach level 3
        assert_eq!(gap_dims, vec!["deployment", "security", "testing"]);
        assert_eq!(assessment.target_level, Some(MaturityLevel::DEFINED));
    }

    #[test]
    fn test_score_with_invalid_target() {
        let rubric = DimensionRubric::builtin();
        assert_eq!(
            score_with_target(&sample_snapshot(), &rubric, 0),
            Err(MaturityError::InvalidTarget(0))
        );
    }

    #[test]
    fn test_recommend_invalid_target() {
        let rubric = testing_rubric();
        let snapshot = PracticeSnapshot::new([("testing", 7)]).unwrap();
        let assessment = score(&snapshot, &rubric).unwrap();
        assert_eq!(recommend(&assessment, 6), Err(MaturityError::InvalidTarget(6)));
        assert_eq!(recommend(&assessment, 0), Err(MaturityError::InvalidTarget(0)));
    }

    #[test]
    fn test_recommend_at_overall_level_is_empty() {
        let rubric = DimensionRubric::builtin();
        let assessment = score(&sample_snapshot(), &rubric).unwrap();
        let recs = recommend(&assessment, assessment.overall_level.value()).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_recommend_orders_by_dimension_name() {
        let rubric = DimensionRubric::builtin();
        let assessment = score(&sample_snapshot(), &rubric).unwrap();
        let recs = recommend(&assessment, 4).unwrap();

        let names: Vec<&str> = recs
            .iter()
            .map(|r| r.split(':').next().unwrap_or_default())
            .collect();
        assert_eq!(
            names,
            vec!["build_automation", "deployment", "monitoring", "security", "testing"]
        );
        assert!(recs[0].contains("currently level 3"));
        assert!(recs[0].contains("at least 7"));
    }

    #[test]
    fn test_capped_rubric_reports_unreachable() {
        let rubric = DimensionRubric::from_pairs([("monitoring", vec![(0, 1), (5, 2)])]).unwrap();
        let snapshot = PracticeSnapshot::new([("monitoring", 9)]).unwrap();
        let assessment = score(&snapshot, &rubric).unwrap();

        assert_eq!(assessment.overall_level, MaturityLevel::MANAGED);
        assert!(assessment.gap_statements()[0].contains("not reachable"));
        let recs = recommend(&assessment, 5).unwrap();
        assert!(recs[0].contains("not reachable"));
    }

    #[test]
    fn test_explain_names_weakest_link() {
        let rubric = DimensionRubric::builtin();
        let assessment = score(&sample_snapshot(), &rubric).unwrap();
        let text = explain(&assessment);

        assert!(text.contains("# Maturity Level: 2 (Managed)"));
        assert!(text.contains("capped at 2 by: deployment, security, testing"));
    }
}
