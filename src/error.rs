use crate::core::answer::AnswerError;
use crate::core::catalog::CatalogError;
use crate::core::tier::TierTableError;
use thiserror::Error;

/// Failures surfaced while assembling or scoring an assessment.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    TierTable(#[from] TierTableError),
    #[error("no maturity tier covers score {score}; the tier table must span 0 to 5")]
    NoMatchingTier { score: f64 },
    #[error("question {question_id} answers dimension {dimension_id}, which is not in the catalog")]
    UnknownDimension {
        question_id: String,
        dimension_id: String,
    },
    #[error("question {question_id} is not in the catalog")]
    UnknownQuestion { question_id: String },
    #[error(
        "question {question_id} was answered under dimension {answered} but the catalog lists it under {expected}"
    )]
    DimensionMismatch {
        question_id: String,
        answered: String,
        expected: String,
    },
    #[error("question {question_id} was answered more than once")]
    DuplicateAnswer { question_id: String },
}
