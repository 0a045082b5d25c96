use anyhow::{Context, Result};
use clap::Parser;
use dmascore::cli::{Cli, Commands, ScoreArgs, TiersArgs, ValidateArgs};
use dmascore::config::{self, LoadedConfig};
use dmascore::core::answer::{Answer, ExclusionKind, Response};
use dmascore::core::report::{self, JsonReport};
use dmascore::core::{AssessmentInputs, check_answers};
use dmascore::telemetry;
use dmascore::utils::fs as fs_utils;
use std::path::Path;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Score(args) => run_score(args, &cwd),
        Commands::Init(args) => {
            let path = resolve_path(&cwd, &args.path);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
        Commands::Tiers(args) => run_tiers(args, &cwd),
        Commands::Validate(args) => run_validate(args, &cwd),
    }
}

fn load_config(cli_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    let loaded = config::load_config(cli_path, cwd)?;
    telemetry::init(&loaded.config.general.log_level)?;
    if let Some(source) = &loaded.source {
        tracing::debug!(path = %source.display(), "loaded config");
    }
    Ok(loaded)
}

fn run_score(args: ScoreArgs, cwd: &Path) -> Result<i32> {
    let loaded = load_config(args.config.as_deref(), cwd)?;
    let inputs = AssessmentInputs {
        answers_path: resolve_path(cwd, &args.answers),
        catalog_path: resolve_path(cwd, &args.catalog),
    };
    let report = dmascore::core::run_assessment(&inputs, &loaded.config, cwd)?;

    let output_json = args.json || loaded.config.general.json;
    if output_json {
        let json_report = JsonReport::from(&report);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        report::print_human(&report);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}

fn run_tiers(args: TiersArgs, cwd: &Path) -> Result<i32> {
    let loaded = load_config(args.config.as_deref(), cwd)?;

    if args.json || loaded.config.general.json {
        println!("{}", serde_json::to_string_pretty(&loaded.config.tiers)?);
    } else {
        report::print_tiers(&loaded.config.tiers);
    }
    Ok(0)
}

fn run_validate(args: ValidateArgs, cwd: &Path) -> Result<i32> {
    let loaded = load_config(args.config.as_deref(), cwd)?;
    match &loaded.source {
        Some(source) => println!(
            "config ok: {} ({} tiers)",
            fs_utils::display_path(cwd, source),
            loaded.config.tiers.tiers().len()
        ),
        None => println!(
            "config ok: defaults ({} tiers)",
            loaded.config.tiers.tiers().len()
        ),
    }

    let catalog_path = resolve_path(cwd, &args.catalog);
    let catalog = fs_utils::load_catalog(&catalog_path)?;
    println!(
        "catalog ok: {} dimensions, {} questions",
        catalog.dimensions().len(),
        catalog.total_questions()
    );

    if let Some(answers) = &args.answers {
        let answers_path = resolve_path(cwd, answers);
        let answers = fs_utils::load_answers(&answers_path)?;
        check_answers(&answers, &catalog)
            .with_context(|| format!("answers in {} do not match the catalog", answers_path.display()))?;
        println!(
            "answers ok: {} answers ({})",
            answers.len(),
            exclusion_summary(&answers)
        );
    }

    Ok(0)
}

fn exclusion_summary(answers: &[Answer]) -> String {
    let parts: Vec<String> = [ExclusionKind::NotApplicable, ExclusionKind::NotSure]
        .into_iter()
        .map(|kind| {
            let count = answers
                .iter()
                .filter(|answer| answer.response() == Response::Excluded(kind))
                .count();
            format!("{} {}", count, kind.as_str())
        })
        .collect();
    format!("excluded: {}", parts.join(", "))
}

fn resolve_path(cwd: &Path, path: &Path) -> std::path::PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
