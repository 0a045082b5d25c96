pub mod answer;
pub mod catalog;
pub mod report;
pub mod score;
pub mod tier;

use crate::config::Config;
use crate::core::answer::{Answer, Identifier};
use crate::core::catalog::QuestionCatalog;
use crate::core::report::FinalReport;
use crate::core::score::{DimensionScore, OverallResult, score_dimension, score_overall};
use crate::core::tier::TierTable;
use crate::error::ScoringError;
use crate::utils::fs as fs_utils;
use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Scores for one respondent, recomputed on demand and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub dimensions: Vec<DimensionScore>,
    pub overall: OverallResult,
}

impl Assessment {
    /// Weakest assessed dimensions first. Ties keep catalog order.
    pub fn focus_areas(&self, limit: usize) -> Vec<&DimensionScore> {
        let mut assessed: Vec<&DimensionScore> = self
            .dimensions
            .iter()
            .filter(|score| score.is_assessed())
            .collect();
        assessed.sort_by(|a, b| a.average_score.total_cmp(&b.average_score));
        assessed.truncate(limit);
        assessed
    }
}

/// Stateless scorer over a validated tier table. Safe to share across
/// threads; every call works only on its own arguments.
#[derive(Debug, Clone, Default)]
pub struct MaturityScorer {
    tiers: TierTable,
}

impl MaturityScorer {
    pub fn new(tiers: TierTable) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn score(
        &self,
        answers: &[Answer],
        catalog: &QuestionCatalog,
    ) -> Result<Assessment, ScoringError> {
        check_answers(answers, catalog)?;

        let dimensions: Vec<DimensionScore> = catalog
            .dimensions()
            .iter()
            .map(|dimension| score_dimension(&dimension.id, answers, dimension.question_count()))
            .collect();
        let overall = score_overall(&dimensions, catalog.total_questions(), &self.tiers)?;

        Ok(Assessment {
            dimensions,
            overall,
        })
    }
}

/// Rejects answers that do not line up with the catalog before any
/// averaging happens.
pub fn check_answers(answers: &[Answer], catalog: &QuestionCatalog) -> Result<(), ScoringError> {
    let mut seen = HashSet::new();

    for answer in answers {
        let question_id = answer.question_id();
        if catalog.dimension(answer.dimension_id()).is_none() {
            return Err(ScoringError::UnknownDimension {
                question_id: question_id.to_string(),
                dimension_id: answer.dimension_id().to_string(),
            });
        }

        let Some(expected) = catalog.dimension_of(question_id) else {
            return Err(ScoringError::UnknownQuestion {
                question_id: question_id.to_string(),
            });
        };
        if &expected.id != answer.dimension_id() {
            return Err(ScoringError::DimensionMismatch {
                question_id: question_id.to_string(),
                answered: answer.dimension_id().to_string(),
                expected: expected.id.to_string(),
            });
        }

        if !seen.insert(question_id) {
            return Err(ScoringError::DuplicateAnswer {
                question_id: question_id.to_string(),
            });
        }
    }

    debug!(answers = answers.len(), "answers match catalog");
    Ok(())
}

#[derive(Debug, Clone)]
pub struct AssessmentInputs {
    pub answers_path: PathBuf,
    pub catalog_path: PathBuf,
}

pub struct LoadedInputs {
    pub answers: Vec<Answer>,
    pub catalog: QuestionCatalog,
}

pub fn load_inputs(inputs: &AssessmentInputs) -> Result<LoadedInputs> {
    let catalog = fs_utils::load_catalog(&inputs.catalog_path)?;
    let answers = fs_utils::load_answers(&inputs.answers_path)?;
    Ok(LoadedInputs { answers, catalog })
}

pub fn run_assessment(inputs: &AssessmentInputs, cfg: &Config, cwd: &Path) -> Result<FinalReport> {
    let loaded = load_inputs(inputs)?;
    let scorer = MaturityScorer::new(cfg.tiers.clone());
    let assessment = scorer.score(&loaded.answers, &loaded.catalog)?;

    FinalReport::build(
        &assessment,
        &loaded.catalog,
        scorer.tiers(),
        cfg,
        report::Sources {
            answers: fs_utils::display_path(cwd, &inputs.answers_path),
            catalog: fs_utils::display_path(cwd, &inputs.catalog_path),
        },
    )
}
