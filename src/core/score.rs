use crate::core::answer::{Answer, Identifier, MAX_SCORE, MIN_SCORE};
use crate::core::tier::TierTable;
use crate::error::ScoringError;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Per-dimension aggregate over non-excluded answers.
///
/// `questions_answered == 0` means the dimension was not assessed; its
/// `average_score` of 0 is a placeholder, not a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub dimension_id: Identifier,
    pub average_score: f64,
    pub questions_answered: usize,
    pub total_questions: usize,
    pub completion_ratio: f64,
}

impl DimensionScore {
    pub fn is_assessed(&self) -> bool {
        self.questions_answered > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallResult {
    /// Unrounded; use [`OverallResult::display_score`] for presentation.
    pub overall_score: f64,
    pub maturity_tier: String,
    pub total_questions_answered: usize,
    pub total_questions: usize,
    pub assessed_dimensions: usize,
}

impl OverallResult {
    pub fn display_score(&self) -> f64 {
        round_for_display(self.overall_score)
    }

    pub fn completion_ratio(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        (self.total_questions_answered as f64 / self.total_questions as f64).min(1.0)
    }
}

pub fn score_dimension(
    dimension_id: &Identifier,
    answers: &[Answer],
    total_questions_in_dimension: usize,
) -> DimensionScore {
    let (sum, answered) = answers
        .iter()
        .filter(|answer| answer.dimension_id() == dimension_id && !answer.is_excluded())
        .fold((0.0_f64, 0_usize), |(sum, count), answer| {
            (sum + answer.score_value(), count + 1)
        });

    if answered == 0 {
        debug!(dimension = %dimension_id, "dimension not assessed");
        return DimensionScore {
            dimension_id: dimension_id.clone(),
            average_score: 0.0,
            questions_answered: 0,
            total_questions: total_questions_in_dimension,
            completion_ratio: 0.0,
        };
    }

    let average_score = (sum / answered as f64).clamp(MIN_SCORE, MAX_SCORE);
    let completion_ratio = if total_questions_in_dimension == 0 {
        warn!(
            dimension = %dimension_id,
            answered,
            "dimension has answers but no catalog questions"
        );
        0.0
    } else {
        if answered > total_questions_in_dimension {
            warn!(
                dimension = %dimension_id,
                answered,
                total = total_questions_in_dimension,
                "more answers than catalog questions"
            );
        }
        (answered as f64 / total_questions_in_dimension as f64).min(1.0)
    };

    debug!(
        dimension = %dimension_id,
        average_score,
        answered,
        total = total_questions_in_dimension,
        "scored dimension"
    );

    DimensionScore {
        dimension_id: dimension_id.clone(),
        average_score,
        questions_answered: answered,
        total_questions: total_questions_in_dimension,
        completion_ratio,
    }
}

/// Averages assessed dimensions only; unassessed ones never pull the
/// overall score toward zero. Tier lookup uses the unrounded score.
pub fn score_overall(
    dimension_scores: &[DimensionScore],
    total_questions: usize,
    tiers: &TierTable,
) -> Result<OverallResult, ScoringError> {
    let assessed: Vec<f64> = dimension_scores
        .iter()
        .filter(|score| score.is_assessed())
        .map(|score| score.average_score)
        .collect();

    let overall_score = if assessed.is_empty() {
        MIN_SCORE
    } else {
        (assessed.iter().sum::<f64>() / assessed.len() as f64).clamp(MIN_SCORE, MAX_SCORE)
    };

    let total_questions_answered = dimension_scores
        .iter()
        .map(|score| score.questions_answered)
        .sum();

    let tier = tiers.tier_for(overall_score)?;
    info!(
        overall_score,
        tier = %tier.name,
        assessed = assessed.len(),
        "scored assessment"
    );

    Ok(OverallResult {
        overall_score,
        maturity_tier: tier.name.clone(),
        total_questions_answered,
        total_questions,
        assessed_dimensions: assessed.len(),
    })
}

pub fn round_for_display(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
