use crate::infra::{build_engine, InMemoryOrganizationWeights};
use ai_assessment::assessment::report::ReportContent;
use ai_assessment::assessment::wizard::{
    BasicsStep, PainPointsStep, RolePainPoint, RolesStep, SelectedRole, TechStackStep,
    WizardStepData,
};
use ai_assessment::config::{AppConfig, ScoringConfig};
use ai_assessment::error::AppError;
use ai_assessment::scoring::adoption::{
    AdoptionScoreInputs, ADOPTION_RATE, COST_EFFICIENCY, PERFORMANCE_IMPROVEMENT, TIME_SAVINGS,
};
use ai_assessment::scoring::role::{calculate_role_score, RoleScoreInput};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PrioritizeArgs {
    /// Wizard step data as exported by the assessment UI (JSON)
    #[arg(long)]
    pub(crate) step_data: PathBuf,
    /// Assessment id stamped on the report
    #[arg(long, default_value_t = 1)]
    pub(crate) assessment_id: i64,
    /// Print the raw report JSON instead of the summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RoleScoreArgs {
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    pub(crate) time_savings: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    pub(crate) quality_impact: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    pub(crate) strategic_alignment: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    pub(crate) data_readiness: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    pub(crate) technical_feasibility: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    pub(crate) adoption_risk: Option<i32>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the raw report JSON instead of the summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_prioritize(args: PrioritizeArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.step_data)?;
    let step_data: WizardStepData = serde_json::from_str(&raw)?;
    let scoring = AppConfig::load()?.scoring;

    let report = prioritize(&scoring, args.assessment_id, &step_data).await?;
    emit(&report, args.json)
}

pub(crate) fn run_role_score(args: RoleScoreArgs) -> Result<(), AppError> {
    let input = RoleScoreInput {
        time_savings: args.time_savings,
        quality_impact: args.quality_impact,
        strategic_alignment: args.strategic_alignment,
        data_readiness: args.data_readiness,
        technical_feasibility: args.technical_feasibility,
        adoption_risk: args.adoption_risk,
    };
    let result = calculate_role_score(&input);

    println!("Role score: {}/100 ({})", result.total_score, result.rating.description());
    println!(
        "- Value potential {}/100 (time savings {}, quality impact {}, strategic alignment {})",
        result.value_potential.total,
        result.value_potential.time_savings,
        result.value_potential.quality_impact,
        result.value_potential.strategic_alignment
    );
    println!(
        "- Ease of implementation {}/100 (data readiness {}, technical feasibility {}, adoption risk {})",
        result.ease_of_implementation.total,
        result.ease_of_implementation.data_readiness,
        result.ease_of_implementation.technical_feasibility,
        result.ease_of_implementation.adoption_risk
    );
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("AI transformation assessment demo");
    let report = prioritize(&ScoringConfig::default(), 1, &sample_step_data()).await?;
    emit(&report, args.json)
}

async fn prioritize(
    scoring: &ScoringConfig,
    assessment_id: i64,
    step_data: &WizardStepData,
) -> Result<ReportContent, AppError> {
    let engine = build_engine(scoring, Arc::new(InMemoryOrganizationWeights::default()))?;
    Ok(engine
        .calculate_prioritization(assessment_id, step_data)
        .await?)
}

fn emit(report: &ReportContent, json: bool) -> Result<(), AppError> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).map_err(AppError::Serialization)?
        );
    } else {
        render_report(report);
    }
    Ok(())
}

pub(crate) fn render_report(report: &ReportContent) {
    println!(
        "\nAssessment {} (generated {})",
        report.assessment_id,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("\n{}", report.executive_summary);

    println!("\nPrioritized roles");
    for item in &report.prioritization_data.prioritized_items {
        println!(
            "  {}. {} ({}) value {} | effort {} | total {} | {} priority",
            item.rank,
            item.name,
            item.department,
            item.value_score,
            item.effort_score,
            item.total_score,
            item.priority.label()
        );
    }

    if !report.ai_suggestions.is_empty() {
        println!("\nAI capability suggestions");
        for suggestion in &report.ai_suggestions {
            println!("  {}:", suggestion.role_title);
            if suggestion.capabilities.is_empty() {
                println!("    - suggestions unavailable");
            }
            for capability in &suggestion.capabilities {
                println!("    - {}: {}", capability.name, capability.description);
            }
        }
    }

    println!(
        "\nEstimated annual ROI across top roles: ${:.0}",
        report.performance_impact.estimated_roi
    );
    for impact in &report.performance_impact.role_impacts {
        let metrics: Vec<String> = impact
            .metrics
            .iter()
            .map(|metric| format!("{} +{:.0}%", metric.name, metric.improvement))
            .collect();
        println!("  - {}: {}", impact.role_title, metrics.join(", "));
    }

    let score = &report.ai_adoption_score;
    println!(
        "\nAI adoption score: {:.1}/100 ({})",
        score.overall_score,
        score.qualitative_band.label()
    );
    println!("  {}", score.summary);
    if let Some(roi) = &score.roi {
        let payback = roi
            .payback_period_months
            .map_or_else(|| "n/a".to_string(), |months| format!("{months:.1} months"));
        println!(
            "  ROI {:.1}% | payback {}",
            roi.calculated_roi_percentage, payback
        );
    }

    if !report.prioritization_data.skipped_roles.is_empty() {
        println!(
            "\nSkipped duplicate roles: {}",
            report.prioritization_data.skipped_roles.join(", ")
        );
    }

    if report.is_degraded() {
        println!("\nNote: some sections use placeholder content ({:?})", report.degraded);
    }
}

fn role(id: i64, title: &str, department: &str) -> SelectedRole {
    SelectedRole {
        id: Some(id),
        title: title.to_string(),
        department: department.to_string(),
        ..SelectedRole::default()
    }
}

fn pain(severity: i32, frequency: i32, impact: i32) -> RolePainPoint {
    RolePainPoint {
        severity: Some(severity),
        frequency: Some(frequency),
        impact: Some(impact),
        ..RolePainPoint::default()
    }
}

pub(crate) fn sample_step_data() -> WizardStepData {
    WizardStepData {
        basics: Some(BasicsStep {
            company_name: "Harborview Logistics".to_string(),
            industry: Some("Retail & E-commerce".to_string()),
            size: Some("201-500".to_string()),
            company_stage: Some("Scaling".to_string()),
            industry_maturity: Some("Mature".to_string()),
            ..BasicsStep::default()
        }),
        roles: Some(RolesStep {
            selected_departments: vec!["Support".to_string(), "Sales".to_string()],
            selected_roles: vec![
                role(1, "Customer Support Specialist", "Support"),
                role(2, "Sales Development Representative", "Sales"),
                role(3, "Content Marketing Manager", "Marketing"),
                role(4, "Warehouse Supervisor", "Operations"),
            ],
            prioritized_roles: vec![1, 2],
            ..RolesStep::default()
        }),
        pain_points: Some(PainPointsStep {
            role_specific_pain_points: BTreeMap::from([
                ("1".to_string(), pain(5, 5, 4)),
                ("2".to_string(), pain(4, 4, 4)),
                ("3".to_string(), pain(3, 4, 3)),
                ("4".to_string(), pain(2, 2, 3)),
            ]),
            general_pain_points: Some("Ticket backlog and manual lead research".to_string()),
        }),
        tech_stack: Some(TechStackStep {
            data_availability: vec![
                "structuredData".to_string(),
                "historicalRecords".to_string(),
                "apiAccess".to_string(),
            ],
            ..TechStackStep::default()
        }),
        ai_adoption_score_inputs: Some(AdoptionScoreInputs {
            affected_user_count: Some(40),
            cost_savings_amount: Some(25_000.0),
            ..AdoptionScoreInputs::default()
        }
        .with_component(ADOPTION_RATE, 55.0)
        .with_component(TIME_SAVINGS, 4.0)
        .with_component(COST_EFFICIENCY, 12.0)
        .with_component(PERFORMANCE_IMPROVEMENT, 18.0)),
        ..WizardStepData::default()
    }
}
