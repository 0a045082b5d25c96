use dmascore::config::{self, Config};
use dmascore::core::report::JsonReport;
use dmascore::core::{AssessmentInputs, load_inputs, run_assessment};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn demo_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn demo_inputs() -> AssessmentInputs {
    AssessmentInputs {
        answers_path: demo_path("answers.json"),
        catalog_path: demo_path("catalog.toml"),
    }
}

#[test]
fn scores_demo_assessment() {
    let cwd = Path::new(env!("CARGO_MANIFEST_DIR"));
    let report = run_assessment(&demo_inputs(), &Config::default(), cwd).unwrap();

    assert!((report.raw_score - 9.5 / 3.0).abs() < 1e-12);
    assert_eq!(report.score, 3.2);
    assert_eq!(report.tier, "Defined");
    assert_eq!(report.tier_level, 3);
    assert_eq!(report.questions_answered, 6);
    assert_eq!(report.total_questions, 10);
    assert_eq!(report.assessed_dimensions, 3);
    assert_eq!(report.focus_areas, ["quality", "governance", "analytics"]);
    assert_eq!(report.sources.answers, "demos/answers.json");
    assert!(report.exit.ok);

    let architecture = report
        .dimensions
        .iter()
        .find(|dimension| dimension.id == "architecture")
        .unwrap();
    assert!(!architecture.is_assessed());
    assert!(architecture.tier.is_none());

    let governance = &report.dimensions[0];
    assert_eq!(governance.name, "Data Governance");
    assert_eq!(governance.score, 3.5);
    assert_eq!(governance.tier.as_deref(), Some("Quantitatively Managed"));
}

#[test]
fn json_report_exposes_scores_and_gate() {
    let cwd = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut cfg = Config::default();
    cfg.general.min_completion = 0.75;
    cfg.general.focus_areas = 1;

    let report = run_assessment(&demo_inputs(), &cfg, cwd).unwrap();
    assert!(!report.exit.ok);

    let value = serde_json::to_value(JsonReport::from(&report)).unwrap();
    assert_eq!(value["tier"], "Defined");
    assert_eq!(value["score"], 3.2);
    assert_eq!(value["passed"], false);
    assert_eq!(value["focus_areas"], serde_json::json!(["quality"]));
    assert_eq!(value["gate"]["min_completion"], 0.75);
    assert!(value["dimensions"][2].get("tier").is_none());
}

#[test]
fn custom_tiers_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("dmascore.toml");
    fs::write(
        &config_path,
        r#"
[general]
min_score = 3.5

[[tiers]]
name = "Emerging"
min_score = 0.0
max_score = 3.0

[[tiers]]
name = "Leading"
min_score = 3.0
max_score = 5.0
"#,
    )
    .unwrap();

    let loaded = config::load_config(None, dir.path()).unwrap();
    let report = run_assessment(&demo_inputs(), &loaded.config, dir.path()).unwrap();
    assert_eq!(report.tier, "Leading");
    assert_eq!(report.tier_levels, 2);
    assert!(!report.exit.ok);
    assert!(report.exit.reason_line().contains("min_score"));
}

#[test]
fn mismatched_answers_fail_scoring() {
    let dir = TempDir::new().unwrap();
    let answers_path = dir.path().join("answers.json");
    fs::write(
        &answers_path,
        r#"[{"question_id": "dq-1", "dimension_id": "governance", "response": 3}]"#,
    )
    .unwrap();

    let inputs = AssessmentInputs {
        answers_path,
        catalog_path: demo_path("catalog.toml"),
    };
    let loaded = load_inputs(&inputs).unwrap();
    assert_eq!(loaded.answers.len(), 1);

    let cwd = Path::new(env!("CARGO_MANIFEST_DIR"));
    let err = run_assessment(&inputs, &Config::default(), cwd).unwrap_err();
    assert!(format!("{err:#}").contains("catalog lists it under quality"));
}

#[test]
fn malformed_answer_reports_file() {
    let dir = TempDir::new().unwrap();
    let answers_path = dir.path().join("answers.toml");
    fs::write(
        &answers_path,
        r#"
[[answers]]
question_id = "gov-1"
dimension_id = "governance"
response = 9
"#,
    )
    .unwrap();

    let inputs = AssessmentInputs {
        answers_path,
        catalog_path: demo_path("catalog.toml"),
    };
    let err = load_inputs(&inputs).err().unwrap();
    let message = format!("{err:#}");
    assert!(message.contains("failed parsing answers file"));
    assert!(message.contains("outside the 0-5 range"));
}
