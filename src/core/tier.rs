use crate::core::answer::{MAX_SCORE, MIN_SCORE};
use crate::error::ScoringError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TierTableError {
    #[error("tier table is empty")]
    Empty,
    #[error("tier names must not be blank")]
    BlankName,
    #[error("tier {0} is defined more than once")]
    DuplicateName(String),
    #[error("tier {name} has invalid range [{min_score}, {max_score}] (expected 0 <= min <= max <= 5)")]
    InvalidBounds {
        name: String,
        min_score: f64,
        max_score: f64,
    },
    #[error("lowest tier {name} starts at {min_score}, expected 0")]
    DoesNotStartAtZero { name: String, min_score: f64 },
    #[error("highest tier {name} ends at {max_score}, expected 5")]
    DoesNotReachMax { name: String, max_score: f64 },
    #[error("scores between {from} and {to} fall between tiers {lower} and {upper}")]
    Gap {
        lower: String,
        upper: String,
        from: f64,
        to: f64,
    },
    #[error("tier {upper} does not extend past tier {lower}")]
    Shadowed { lower: String, upper: String },
}

/// A named maturity level covering an inclusive score range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityTier {
    pub name: String,
    pub min_score: f64,
    pub max_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MaturityTier {
    pub fn new(name: impl Into<String>, min_score: f64, max_score: f64) -> Self {
        Self {
            name: name.into(),
            min_score,
            max_score,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn contains(&self, score: f64) -> bool {
        self.min_score <= score && score <= self.max_score
    }
}

/// Validated, ascending tier table covering the whole 0-5 scale.
///
/// Adjacent tiers may share a boundary value. Lookup walks the table from
/// the top, so a score sitting exactly on a shared boundary resolves to the
/// higher tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MaturityTier>", into = "Vec<MaturityTier>")]
pub struct TierTable {
    tiers: Vec<MaturityTier>,
}

impl TierTable {
    pub fn new(mut tiers: Vec<MaturityTier>) -> Result<Self, TierTableError> {
        if tiers.is_empty() {
            return Err(TierTableError::Empty);
        }

        let mut names = HashSet::new();
        for tier in &tiers {
            if tier.name.trim().is_empty() {
                return Err(TierTableError::BlankName);
            }
            if !names.insert(tier.name.as_str()) {
                return Err(TierTableError::DuplicateName(tier.name.clone()));
            }
            let in_scale = |value: f64| value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value);
            if !in_scale(tier.min_score)
                || !in_scale(tier.max_score)
                || tier.min_score > tier.max_score
            {
                return Err(TierTableError::InvalidBounds {
                    name: tier.name.clone(),
                    min_score: tier.min_score,
                    max_score: tier.max_score,
                });
            }
        }

        tiers.sort_by(|a, b| a.min_score.total_cmp(&b.min_score));

        let first = &tiers[0];
        if first.min_score != MIN_SCORE {
            return Err(TierTableError::DoesNotStartAtZero {
                name: first.name.clone(),
                min_score: first.min_score,
            });
        }
        let last = &tiers[tiers.len() - 1];
        if last.max_score != MAX_SCORE {
            return Err(TierTableError::DoesNotReachMax {
                name: last.name.clone(),
                max_score: last.max_score,
            });
        }

        for pair in tiers.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.min_score <= lower.min_score || upper.max_score <= lower.max_score {
                return Err(TierTableError::Shadowed {
                    lower: lower.name.clone(),
                    upper: upper.name.clone(),
                });
            }
            if upper.min_score > lower.max_score {
                return Err(TierTableError::Gap {
                    lower: lower.name.clone(),
                    upper: upper.name.clone(),
                    from: lower.max_score,
                    to: upper.min_score,
                });
            }
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[MaturityTier] {
        &self.tiers
    }

    pub fn lowest(&self) -> &MaturityTier {
        &self.tiers[0]
    }

    pub fn highest(&self) -> &MaturityTier {
        &self.tiers[self.tiers.len() - 1]
    }

    /// Scores are snapped to nine decimals before matching against bounds.
    pub fn tier_for(&self, score: f64) -> Result<&MaturityTier, ScoringError> {
        let snapped = snap_score(score);
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.contains(snapped))
            .ok_or(ScoringError::NoMatchingTier { score })
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
        }
    }
}

impl TryFrom<Vec<MaturityTier>> for TierTable {
    type Error = TierTableError;

    fn try_from(value: Vec<MaturityTier>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TierTable> for Vec<MaturityTier> {
    fn from(value: TierTable) -> Self {
        value.tiers
    }
}

const LOOKUP_PRECISION: f64 = 1e9;

pub fn snap_score(score: f64) -> f64 {
    (score * LOOKUP_PRECISION).round() / LOOKUP_PRECISION
}

pub fn default_tiers() -> Vec<MaturityTier> {
    vec![
        MaturityTier::new("Initial", 0.0, 1.9)
            .with_description("Data practices are ad hoc and depend on individual effort"),
        MaturityTier::new("Managed", 1.9, 2.7)
            .with_description("Basic data processes exist but are applied inconsistently"),
        MaturityTier::new("Defined", 2.7, 3.5)
            .with_description("Data processes are documented and standardized"),
        MaturityTier::new("Quantitatively Managed", 3.5, 4.3)
            .with_description("Data processes are measured and controlled"),
        MaturityTier::new("Optimizing", 4.3, 5.0)
            .with_description("Data capabilities are continuously improved"),
    ]
}
