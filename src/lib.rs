//! cimm - CI/CD maturity assessment
//!
//! Library half of the `cimm` CLI. The scorer itself is a pure function
//! over a [`models::PracticeSnapshot`] and a [`config::DimensionRubric`]:
//!
//! ```
//! use cimm::config::DimensionRubric;
//! use cimm::models::{MaturityLevel, PracticeSnapshot};
//!
//! let rubric = DimensionRubric::from_pairs([
//!     ("testing", vec![(0, 1), (3, 2), (7, 3), (9, 4), (10, 5)]),
//! ]).unwrap();
//! let snapshot = PracticeSnapshot::new([("testing", 7)]).unwrap();
//!
//! let assessment = cimm::scoring::score(&snapshot, &rubric).unwrap();
//! assert_eq!(assessment.overall_level, MaturityLevel::DEFINED);
//! ```

pub mod config;
pub mod input;
pub mod models;
pub mod reporters;
pub mod scoring;
