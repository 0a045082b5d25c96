use crate::core::answer::Identifier;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("question catalog defines no dimensions")]
    Empty,
    #[error("dimension {0} is defined more than once")]
    DuplicateDimension(String),
    #[error("dimension {0} has no questions")]
    EmptyDimension(String),
    #[error("question {question_id} appears in both {first} and {second}")]
    DuplicateQuestion {
        question_id: String,
        first: String,
        second: String,
    },
}

/// A scoreable grouping of survey questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionDefinition {
    pub id: Identifier,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Identifier>,
}

impl DimensionDefinition {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// The static question catalog: which questions exist and which dimension
/// each one belongs to. Dimension order is preserved from the source file.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct QuestionCatalog {
    dimensions: Vec<DimensionDefinition>,
    question_index: HashMap<Identifier, usize>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    dimensions: Vec<DimensionDefinition>,
}

impl TryFrom<RawCatalog> for QuestionCatalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Self::new(raw.dimensions)
    }
}

impl QuestionCatalog {
    pub fn new(dimensions: Vec<DimensionDefinition>) -> Result<Self, CatalogError> {
        if dimensions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen_dimensions = HashSet::new();
        let mut question_index = HashMap::new();
        for (idx, dimension) in dimensions.iter().enumerate() {
            if !seen_dimensions.insert(dimension.id.clone()) {
                return Err(CatalogError::DuplicateDimension(dimension.id.to_string()));
            }
            if dimension.questions.is_empty() {
                return Err(CatalogError::EmptyDimension(dimension.id.to_string()));
            }

            for question in &dimension.questions {
                if let Some(previous) = question_index.insert(question.clone(), idx) {
                    return Err(CatalogError::DuplicateQuestion {
                        question_id: question.to_string(),
                        first: dimensions[previous].id.to_string(),
                        second: dimension.id.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            dimensions,
            question_index,
        })
    }

    pub fn dimensions(&self) -> &[DimensionDefinition] {
        &self.dimensions
    }

    pub fn dimension(&self, id: &Identifier) -> Option<&DimensionDefinition> {
        self.dimensions.iter().find(|dimension| &dimension.id == id)
    }

    pub fn dimension_of(&self, question_id: &Identifier) -> Option<&DimensionDefinition> {
        self.question_index
            .get(question_id)
            .map(|idx| &self.dimensions[*idx])
    }

    pub fn total_questions(&self) -> usize {
        self.dimensions
            .iter()
            .map(DimensionDefinition::question_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension(id: &str, questions: &[&str]) -> DimensionDefinition {
        DimensionDefinition {
            id: Identifier::parse("dimension_id", id).unwrap(),
            name: id.to_string(),
            description: None,
            questions: questions
                .iter()
                .map(|q| Identifier::parse("question_id", *q).unwrap())
                .collect(),
        }
    }

    #[test]
    fn counts_questions_across_dimensions() {
        let catalog = QuestionCatalog::new(vec![
            dimension("governance", &["g1", "g2"]),
            dimension("quality", &["q1", "q2", "q3"]),
        ])
        .unwrap();

        assert_eq!(catalog.total_questions(), 5);
        let q2 = Identifier::parse("question_id", "q2").unwrap();
        assert_eq!(catalog.dimension_of(&q2).unwrap().id.as_str(), "quality");
    }

    #[test]
    fn rejects_empty_and_duplicate_definitions() {
        assert_eq!(QuestionCatalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);

        let err = QuestionCatalog::new(vec![dimension("a", &["q1"]), dimension("a", &["q2"])])
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateDimension("a".to_string()));

        let err = QuestionCatalog::new(vec![dimension("a", &[])]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyDimension("a".to_string()));

        let err = QuestionCatalog::new(vec![dimension("a", &["q1"]), dimension("b", &["q1"])])
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateQuestion {
                question_id: "q1".to_string(),
                first: "a".to_string(),
                second: "b".to_string(),
            }
        );
    }

    #[test]
    fn parses_toml_catalog() {
        let input = r#"
[[dimensions]]
id = "governance"
name = "Data Governance"
questions = ["g1", "g2"]

[[dimensions]]
id = "quality"
name = "Data Quality"
description = "Accuracy and completeness of core data"
questions = ["q1"]
"#;
        let catalog: QuestionCatalog = toml::from_str(input).unwrap();
        assert_eq!(catalog.dimensions().len(), 2);
        assert_eq!(catalog.dimensions()[1].name, "Data Quality");
        assert_eq!(catalog.total_questions(), 3);
    }
}
