use crate::core::answer::Answer;
use crate::core::catalog::QuestionCatalog;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnswerDocument {
    answers: Vec<Answer>,
}

pub fn display_path(cwd: &Path, path: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

pub fn load_catalog(path: &Path) -> Result<QuestionCatalog> {
    read_document(path).with_context(|| format!("failed loading catalog {}", path.display()))
}

/// Answers may be a bare JSON array or a document with an `answers` list;
/// TOML files always use `[[answers]]`.
pub fn load_answers(path: &Path) -> Result<Vec<Answer>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading answers file {}", path.display()))?;
    parse_answers(&content, DocumentFormat::from_path(path))
        .with_context(|| format!("failed parsing answers file {}", path.display()))
}

pub fn parse_answers(content: &str, format: DocumentFormat) -> Result<Vec<Answer>> {
    match format {
        DocumentFormat::Json if content.trim_start().starts_with('[') => {
            Ok(serde_json::from_str::<Vec<Answer>>(content)?)
        }
        DocumentFormat::Json => Ok(serde_json::from_str::<AnswerDocument>(content)?.answers),
        DocumentFormat::Toml => Ok(toml::from_str::<AnswerDocument>(content)?.answers),
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    let parsed: T = match DocumentFormat::from_path(path) {
        DocumentFormat::Json => serde_json::from_str(&content)?,
        DocumentFormat::Toml => toml::from_str(&content)?,
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("answers.TOML")),
            DocumentFormat::Toml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("answers.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("answers")),
            DocumentFormat::Json
        );
    }

    #[test]
    fn parses_wrapped_and_bare_answer_lists() {
        let bare = r#"[{"question_id": "q1", "dimension_id": "d", "response": 3}]"#;
        assert_eq!(parse_answers(bare, DocumentFormat::Json).unwrap().len(), 1);

        let wrapped = r#"{"answers": [
            {"question_id": "q1", "dimension_id": "d", "response": 3},
            {"question_id": "q2", "dimension_id": "d", "response": "ns"}
        ]}"#;
        let answers = parse_answers(wrapped, DocumentFormat::Json).unwrap();
        assert_eq!(answers.len(), 2);
        assert!(answers[1].is_excluded());

        let toml = r#"
[[answers]]
question_id = "q1"
dimension_id = "d"
response = 4

[[answers]]
question_id = "q2"
dimension_id = "d"
response = "na"
"#;
        let answers = parse_answers(toml, DocumentFormat::Toml).unwrap();
        assert_eq!(answers[0].score_value(), 4.0);
        assert!(answers[1].is_excluded());
    }

    #[test]
    fn strips_working_directory_from_display_paths() {
        let cwd = Path::new("/work");
        assert_eq!(
            display_path(cwd, Path::new("/work/inputs/answers.json")),
            "inputs/answers.json"
        );
        assert_eq!(display_path(cwd, Path::new("/other/a.json")), "/other/a.json");
    }
}
