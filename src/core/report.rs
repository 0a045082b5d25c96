use crate::config::Config;
use crate::core::Assessment;
use crate::core::catalog::QuestionCatalog;
use crate::core::score::round_for_display;
use crate::core::tier::{TierTable, snap_score};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Sources {
    pub answers: String,
    pub catalog: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionReport {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub questions_answered: usize,
    pub total_questions: usize,
    pub completion: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

impl DimensionReport {
    pub fn is_assessed(&self) -> bool {
        self.questions_answered > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GateSummary {
    pub min_score: f64,
    pub min_completion: f64,
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct FinalReport {
    pub score: f64,
    pub raw_score: f64,
    pub tier: String,
    /// 1-based position of `tier` in the tier table.
    pub tier_level: usize,
    pub tier_levels: usize,
    pub completion: f64,
    pub questions_answered: usize,
    pub total_questions: usize,
    pub assessed_dimensions: usize,
    pub dimensions: Vec<DimensionReport>,
    pub focus_areas: Vec<String>,
    pub sources: Sources,
    pub gate: GateSummary,
    pub exit: ExitStatus,
}

impl FinalReport {
    pub fn build(
        assessment: &Assessment,
        catalog: &QuestionCatalog,
        tiers: &TierTable,
        cfg: &Config,
        sources: Sources,
    ) -> Result<Self> {
        let overall = &assessment.overall;

        let mut dimensions = Vec::with_capacity(assessment.dimensions.len());
        for score in &assessment.dimensions {
            let name = catalog
                .dimension(&score.dimension_id)
                .map(|dimension| dimension.name.clone())
                .unwrap_or_else(|| score.dimension_id.to_string());
            let tier = if score.is_assessed() {
                Some(tiers.tier_for(score.average_score)?.name.clone())
            } else {
                None
            };
            dimensions.push(DimensionReport {
                id: score.dimension_id.to_string(),
                name,
                score: round_for_display(score.average_score),
                questions_answered: score.questions_answered,
                total_questions: score.total_questions,
                completion: score.completion_ratio,
                tier,
            });
        }

        let focus_areas = assessment
            .focus_areas(cfg.general.focus_areas)
            .into_iter()
            .map(|score| score.dimension_id.to_string())
            .collect();

        let tier_level = tiers
            .tiers()
            .iter()
            .position(|tier| tier.name == overall.maturity_tier)
            .map_or(1, |idx| idx + 1);

        let exit = evaluate_exit(overall.overall_score, overall.completion_ratio(), cfg);

        Ok(Self {
            score: overall.display_score(),
            raw_score: overall.overall_score,
            tier: overall.maturity_tier.clone(),
            tier_level,
            tier_levels: tiers.tiers().len(),
            completion: overall.completion_ratio(),
            questions_answered: overall.total_questions_answered,
            total_questions: overall.total_questions,
            assessed_dimensions: overall.assessed_dimensions,
            dimensions,
            focus_areas,
            sources,
            gate: GateSummary {
                min_score: cfg.general.min_score,
                min_completion: cfg.general.min_completion,
            },
            exit,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub score: f64,
    pub raw_score: f64,
    pub tier: String,
    pub completion: f64,
    pub questions_answered: usize,
    pub total_questions: usize,
    pub assessed_dimensions: usize,
    pub dimensions: Vec<DimensionReport>,
    pub focus_areas: Vec<String>,
    pub sources: Sources,
    pub gate: GateSummary,
    pub passed: bool,
}

impl From<&FinalReport> for JsonReport {
    fn from(report: &FinalReport) -> Self {
        Self {
            score: report.score,
            raw_score: report.raw_score,
            tier: report.tier.clone(),
            completion: report.completion,
            questions_answered: report.questions_answered,
            total_questions: report.total_questions,
            assessed_dimensions: report.assessed_dimensions,
            dimensions: report.dimensions.clone(),
            focus_areas: report.focus_areas.clone(),
            sources: report.sources.clone(),
            gate: report.gate.clone(),
            passed: report.exit.ok,
        }
    }
}

/// Gates compare unrounded values.
pub fn evaluate_exit(score: f64, completion: f64, cfg: &Config) -> ExitStatus {
    let mut reasons = Vec::new();

    if snap_score(score) < cfg.general.min_score {
        reasons.push(format!(
            "score {:.2} is below min_score {:.2}",
            score, cfg.general.min_score
        ));
    }

    if completion < cfg.general.min_completion {
        reasons.push(format!(
            "completion {:.0}% is below min_completion {:.0}%",
            completion * 100.0,
            cfg.general.min_completion * 100.0
        ));
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

fn colored_tier(name: &str, level: usize, levels: usize) -> ColoredString {
    if level <= 1 {
        name.red().bold()
    } else if level >= levels {
        name.green().bold()
    } else {
        name.yellow().bold()
    }
}

pub fn print_human(report: &FinalReport) {
    println!(
        "Data Maturity Score: {:.1}/5 ({})",
        report.score,
        colored_tier(&report.tier, report.tier_level, report.tier_levels)
    );
    println!(
        "answered {}/{} questions ({:.0}%) across {}/{} dimensions",
        report.questions_answered,
        report.total_questions,
        report.completion * 100.0,
        report.assessed_dimensions,
        report.dimensions.len()
    );

    println!();
    println!("{}", "DIMENSIONS".bold());
    for dimension in &report.dimensions {
        if dimension.is_assessed() {
            println!(
                "[{:.1}] {} ({}/{} answered) - {}",
                dimension.score,
                dimension.name,
                dimension.questions_answered,
                dimension.total_questions,
                dimension.tier.as_deref().unwrap_or("-")
            );
        } else {
            println!(
                "[ - ] {} ({}/{} answered) - {}",
                dimension.name,
                dimension.questions_answered,
                dimension.total_questions,
                "not assessed".dimmed()
            );
        }
    }

    if !report.focus_areas.is_empty() {
        println!();
        println!("{}", "FOCUS AREAS".bold());
        for id in &report.focus_areas {
            if let Some(dimension) = report.dimensions.iter().find(|d| &d.id == id) {
                println!("-> {} ({:.1})", dimension.name, dimension.score);
            }
        }
    }

    println!();
    if report.exit.ok {
        println!("exit: {}", "OK".green());
    } else {
        println!(
            "exit: {} ({})",
            "FAILED".red().bold(),
            report.exit.reason_line()
        );
    }
}

pub fn print_tiers(tiers: &TierTable) {
    let levels = tiers.tiers().len();
    for (idx, tier) in tiers.tiers().iter().enumerate() {
        println!(
            "{:.1} - {:.1}  {}",
            tier.min_score,
            tier.max_score,
            colored_tier(&tier.name, idx + 1, levels)
        );
        if let Some(description) = &tier.description {
            println!("           {}", description.dimmed());
        }
    }
}
