//! Data maturity assessment scoring.
//!
//! Turns a respondent's answers and the question catalog into per-dimension
//! averages, an overall maturity score and a named maturity tier.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod utils;

pub use crate::core::answer::{Answer, AnswerError, ExclusionKind, Identifier, ScoreValue};
pub use crate::core::catalog::{CatalogError, DimensionDefinition, QuestionCatalog};
pub use crate::core::score::{DimensionScore, OverallResult, score_dimension, score_overall};
pub use crate::core::tier::{MaturityTier, TierTable, TierTableError};
pub use crate::core::{Assessment, MaturityScorer};
pub use crate::error::ScoringError;
