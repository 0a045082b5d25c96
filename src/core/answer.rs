use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 5.0;

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.:-]*$").expect("valid identifier regex")
});

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnswerError {
    #[error("invalid {field} {value:?}: expected letters, digits, '_', '.', ':' or '-'")]
    InvalidIdentifier { field: &'static str, value: String },
    #[error("score {value} is outside the 0-5 range")]
    ScoreOutOfRange { value: f64 },
    #[error("unrecognized response {value:?}: expected a score or one of na, ns")]
    UnknownResponse { value: String },
}

/// Question or dimension identifier, checked on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(field: &'static str, value: impl Into<String>) -> Result<Self, AnswerError> {
        let value = value.into();
        if !IDENTIFIER_RE.is_match(&value) {
            return Err(AnswerError::InvalidIdentifier { field, value });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = AnswerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse("identifier", value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A respondent score on the 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ScoreValue(f64);

impl ScoreValue {
    pub fn new(value: f64) -> Result<Self, AnswerError> {
        if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(AnswerError::ScoreOutOfRange { value });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Special answers that count toward neither averages nor completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExclusionKind {
    NotApplicable,
    NotSure,
}

impl ExclusionKind {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "na" | "n/a" | "not_applicable" | "not-applicable" => Some(Self::NotApplicable),
            "ns" | "not_sure" | "not-sure" | "unsure" => Some(Self::NotSure),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotApplicable => "na",
            Self::NotSure => "ns",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    Scored(ScoreValue),
    Excluded(ExclusionKind),
}

/// One respondent's answer to one question.
///
/// Built only through [`Answer::scored`], [`Answer::excluded`] or
/// deserialization, all of which validate identifiers and score bounds.
/// Excluded answers always report a score value of 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawAnswer")]
pub struct Answer {
    question_id: Identifier,
    dimension_id: Identifier,
    response: Response,
}

impl Answer {
    pub fn scored(
        question_id: impl Into<String>,
        dimension_id: impl Into<String>,
        score: f64,
    ) -> Result<Self, AnswerError> {
        Ok(Self {
            question_id: Identifier::parse("question_id", question_id)?,
            dimension_id: Identifier::parse("dimension_id", dimension_id)?,
            response: Response::Scored(ScoreValue::new(score)?),
        })
    }

    pub fn excluded(
        question_id: impl Into<String>,
        dimension_id: impl Into<String>,
        kind: ExclusionKind,
    ) -> Result<Self, AnswerError> {
        Ok(Self {
            question_id: Identifier::parse("question_id", question_id)?,
            dimension_id: Identifier::parse("dimension_id", dimension_id)?,
            response: Response::Excluded(kind),
        })
    }

    pub fn question_id(&self) -> &Identifier {
        &self.question_id
    }

    pub fn dimension_id(&self) -> &Identifier {
        &self.dimension_id
    }

    pub fn response(&self) -> Response {
        self.response
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self.response, Response::Excluded(_))
    }

    pub fn score_value(&self) -> f64 {
        match self.response {
            Response::Scored(score) => score.value(),
            Response::Excluded(_) => 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    question_id: String,
    dimension_id: String,
    response: RawResponse,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawResponse {
    Score(f64),
    Token(String),
}

impl TryFrom<RawAnswer> for Answer {
    type Error = AnswerError;

    fn try_from(raw: RawAnswer) -> Result<Self, Self::Error> {
        match raw.response {
            RawResponse::Score(score) => Self::scored(raw.question_id, raw.dimension_id, score),
            RawResponse::Token(token) => match ExclusionKind::parse(&token) {
                Some(kind) => Self::excluded(raw.question_id, raw.dimension_id, kind),
                None => Err(AnswerError::UnknownResponse { value: token }),
            },
        }
    }
}
