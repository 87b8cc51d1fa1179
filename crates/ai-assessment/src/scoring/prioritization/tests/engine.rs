use super::common::*;
use crate::assessment::report::{Level, PriorityLevel, ReportSection};
use crate::assessment::wizard::{RolesStep, WizardStepData};
use crate::scoring::adoption::{AdoptionScoreInputs, QualitativeBand};
use crate::scoring::prioritization::PrioritizationError;
use crate::scoring::role::RoleScoreInput;

#[test]
fn roles_are_ranked_by_value_then_effort() {
    let engine = offline_engine();
    let items = engine.rank_roles(&step_data()).expect("ranked roles");

    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Customer Support Agent",
            "Sales Representative",
            "Financial Analyst",
            "Records Clerk",
        ]
    );
    let ranks: Vec<usize> = items.iter().map(|item| item.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);

    let top = &items[0];
    assert_eq!((top.value_score, top.effort_score, top.total_score), (100, 0, 100));
    assert_eq!(top.priority, PriorityLevel::High);
    assert_eq!(top.id, "1");

    let analyst = &items[2];
    assert_eq!((analyst.value_score, analyst.effort_score), (60, 40));
    assert_eq!(analyst.priority, PriorityLevel::High);

    let clerk = &items[3];
    assert_eq!((clerk.value_score, clerk.effort_score), (20, 80));
    assert_eq!(clerk.priority, PriorityLevel::NotRecommended);
    assert_eq!((clerk.value_level, clerk.effort_level), (Level::Low, Level::High));
}

#[test]
fn ranking_is_deterministic() {
    let engine = offline_engine();
    let data = step_data();
    let first = engine.rank_roles(&data).expect("first run");
    let second = engine.rank_roles(&data).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn equal_scores_fall_back_to_name_order() {
    let mut data = WizardStepData {
        roles: Some(RolesStep {
            selected_roles: vec![
                role(10, "Bookkeeper", "Finance"),
                role(11, "Accountant", "Finance"),
            ],
            ..RolesStep::default()
        }),
        ..WizardStepData::default()
    };
    data.role_ratings
        .insert("10".to_string(), RoleScoreInput::uniform(3));
    data.role_ratings
        .insert("11".to_string(), RoleScoreInput::uniform(3));

    let items = offline_engine().rank_roles(&data).expect("ranked roles");
    assert_eq!(items[0].name, "Accountant");
    assert_eq!(items[1].name, "Bookkeeper");
}

#[test]
fn equal_value_prefers_lower_effort() {
    let mut data = WizardStepData {
        roles: Some(RolesStep {
            selected_roles: vec![
                role(20, "Alpha", "Finance"),
                role(21, "Beta", "Finance"),
            ],
            ..RolesStep::default()
        }),
        ..WizardStepData::default()
    };
    // Same value ratings; Beta is easier to implement.
    data.role_ratings.insert(
        "20".to_string(),
        RoleScoreInput {
            data_readiness: Some(3),
            technical_feasibility: Some(3),
            adoption_risk: Some(3),
            ..RoleScoreInput::uniform(4)
        },
    );
    data.role_ratings
        .insert("21".to_string(), RoleScoreInput::uniform(4));

    let items = offline_engine().rank_roles(&data).expect("ranked roles");
    let ranked: Vec<(&str, u8, u8)> = items
        .iter()
        .map(|item| (item.name.as_str(), item.value_score, item.effort_score))
        .collect();
    assert_eq!(ranked, vec![("Beta", 80, 20), ("Alpha", 80, 40)]);
}

#[test]
fn roles_without_ids_in_different_departments_are_both_ranked() {
    let mut sales = role(0, "Manager", "Sales");
    sales.id = None;
    let mut operations = role(0, "Manager", "Operations");
    operations.id = None;
    let data = WizardStepData {
        roles: Some(RolesStep {
            selected_roles: vec![sales, operations],
            ..RolesStep::default()
        }),
        ..WizardStepData::default()
    };

    let items = offline_engine().rank_roles(&data).expect("ranked roles");
    assert_eq!(items.len(), 2);
    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["Manager/Operations", "Manager/Sales"]);
}

#[tokio::test]
async fn duplicate_selections_are_flagged_in_the_report() {
    let mut first = role(0, "Manager", "Sales");
    first.id = None;
    let second = first.clone();
    let data = WizardStepData {
        roles: Some(RolesStep {
            selected_roles: vec![first, second],
            ..RolesStep::default()
        }),
        ..WizardStepData::default()
    };

    let report = offline_engine()
        .calculate_prioritization(10, &data)
        .await
        .expect("report");
    assert_eq!(report.prioritization_data.prioritized_items.len(), 1);
    assert_eq!(
        report.prioritization_data.skipped_roles,
        vec!["Manager/Sales".to_string()]
    );
    assert!(report.degraded.contains(&ReportSection::PrioritizationData));
}

#[test]
fn unrated_roles_score_neutral() {
    let data = WizardStepData {
        roles: Some(RolesStep {
            selected_roles: vec![role(5, "Paralegal", "Legal")],
            ..RolesStep::default()
        }),
        ..WizardStepData::default()
    };

    let items = offline_engine().rank_roles(&data).expect("ranked roles");
    assert_eq!((items[0].value_score, items[0].effort_score), (60, 40));
    assert_eq!(items[0].priority, PriorityLevel::High);
}

#[test]
fn missing_roles_section_is_rejected() {
    let data = WizardStepData::default();
    match offline_engine().rank_roles(&data) {
        Err(PrioritizationError::MissingSection("roles")) => {}
        other => panic!("expected missing roles section, got {other:?}"),
    }
}

#[test]
fn empty_role_selection_is_rejected() {
    let data = WizardStepData {
        roles: Some(RolesStep::default()),
        ..WizardStepData::default()
    };
    assert!(matches!(
        offline_engine().rank_roles(&data),
        Err(PrioritizationError::NoRolesSelected)
    ));
}

#[tokio::test]
async fn report_covers_top_roles_and_heatmap() {
    let engine = offline_engine();
    let report = engine
        .calculate_prioritization(7, &step_data())
        .await
        .expect("report");

    assert_eq!(report.assessment_id, 7);
    assert!(!report.is_degraded());
    assert_eq!(report.prioritization_data.prioritized_items.len(), 4);
    assert_eq!(report.ai_suggestions.len(), 3);
    assert_eq!(report.ai_suggestions[0].role_title, "Customer Support Agent");
    assert!(!report.ai_suggestions[0].capabilities.is_empty());
    assert_eq!(report.performance_impact.role_impacts.len(), 3);
    assert!(report.performance_impact.estimated_roi > 0.0);
    assert!(report.executive_summary.contains("Northwind"));
    assert!(report.prioritization_data.skipped_roles.is_empty());

    let heatmap = &report.prioritization_data.heatmap;
    assert_eq!(heatmap.cell(Level::High, Level::Low).len(), 3);
    assert_eq!(heatmap.cell(Level::Low, Level::High).len(), 1);
    assert!(heatmap.cell(Level::Medium, Level::Medium).is_empty());
}

#[tokio::test]
async fn adoption_score_is_neutral_without_inputs() {
    let data = step_data();
    assert!(data.ai_adoption_score_inputs.is_none());

    let report = offline_engine()
        .calculate_prioritization(8, &data)
        .await
        .expect("report");
    let score = &report.ai_adoption_score;

    assert_eq!(score.base_score, 50.0);
    assert_eq!(score.missing_categories.len(), 5);
    assert!(score.breakdown_by_category.is_empty());
}

#[tokio::test]
async fn adoption_score_uses_context_defaults() {
    let mut data = step_data();
    data.ai_adoption_score_inputs = Some(AdoptionScoreInputs::default());

    let report = offline_engine()
        .calculate_prioritization(8, &data)
        .await
        .expect("report");
    let score = report.ai_adoption_score;

    // Startup in an immature industry.
    assert_eq!(score.contextual_adjustment.delta, -5.0);
    assert_eq!(score.overall_score, 45.0);
    assert_eq!(score.qualitative_band, QualitativeBand::Average);
}

#[tokio::test]
async fn prioritization_errors_surface_from_async_entry_point() {
    let result = offline_engine()
        .calculate_prioritization(9, &WizardStepData::default())
        .await;
    assert!(matches!(result, Err(PrioritizationError::MissingSection(_))));
}
