//! Wizard step data as submitted by the assessment UI.
//!
//! Every section is optional; validation happens upstream and the engines only read the
//! fields they need.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::scoring::adoption::AdoptionScoreInputs;
use crate::scoring::role::{RoleScoreInput, MAX_RATING, MIN_RATING};

const KNOWN_DATA_SOURCES: [&str; 5] = [
    "structuredData",
    "unstructuredText",
    "historicalRecords",
    "realTimeInputs",
    "apiAccess",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStepData {
    #[serde(default)]
    pub basics: Option<BasicsStep>,
    #[serde(default)]
    pub roles: Option<RolesStep>,
    #[serde(default)]
    pub pain_points: Option<PainPointsStep>,
    #[serde(default)]
    pub tech_stack: Option<TechStackStep>,
    #[serde(default)]
    pub adoption: Option<AdoptionStep>,
    /// Role key → explicit ratings captured on the scoring step.
    #[serde(default)]
    pub role_ratings: BTreeMap<String, RoleScoreInput>,
    #[serde(default)]
    pub ai_adoption_score_inputs: Option<AdoptionScoreInputs>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicsStep {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub stakeholders: Vec<String>,
    #[serde(default)]
    pub company_stage: Option<String>,
    #[serde(default)]
    pub industry_maturity: Option<String>,
    #[serde(default)]
    pub organization_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolesStep {
    #[serde(default)]
    pub selected_departments: Vec<String>,
    #[serde(default)]
    pub selected_roles: Vec<SelectedRole>,
    /// Role ids in the order the user ranked them.
    #[serde(default)]
    pub prioritized_roles: Vec<i64>,
    #[serde(default)]
    pub custom_department: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRole {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

impl SelectedRole {
    /// Key used by the per-role maps: the numeric id when present, otherwise `title/department`
    /// (just the title when the department is blank).
    pub fn key(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None if self.department.trim().is_empty() => self.title.clone(),
            None => format!("{}/{}", self.title, self.department),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PainPointsStep {
    #[serde(default)]
    pub role_specific_pain_points: BTreeMap<String, RolePainPoint>,
    #[serde(default)]
    pub general_pain_points: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePainPoint {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub severity: Option<i32>,
    #[serde(default)]
    pub frequency: Option<i32>,
    #[serde(default)]
    pub impact: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStackStep {
    #[serde(default)]
    pub current_systems: Option<String>,
    #[serde(default)]
    pub data_availability: Vec<String>,
    #[serde(default)]
    pub existing_automation: Option<String>,
    #[serde(default)]
    pub data_quality: Option<i32>,
}

impl TechStackStep {
    /// Explicit data quality, otherwise one point per known data source on top of a base of 1.
    pub fn data_readiness(&self) -> Option<i32> {
        if let Some(quality) = self.data_quality {
            return Some(quality);
        }
        if self.data_availability.is_empty() {
            return None;
        }

        let available: HashSet<&str> = self.data_availability.iter().map(String::as_str).collect();
        let sources = KNOWN_DATA_SOURCES
            .iter()
            .filter(|source| available.contains(*source))
            .count() as i32;
        Some((sources + 1).clamp(i32::from(MIN_RATING), i32::from(MAX_RATING)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionStep {
    #[serde(default)]
    pub role_adoption: BTreeMap<String, RoleAdoption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAdoption {
    #[serde(default)]
    pub openness: Option<String>,
    #[serde(default)]
    pub skills_readiness: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub success_criteria: Option<String>,
    #[serde(default)]
    pub risks: Option<String>,
    #[serde(default)]
    pub suitability: Option<i32>,
}

/// Roles in evaluation order plus the keys of duplicate selections that were left out.
#[derive(Debug, Default)]
pub struct RoleSelection<'a> {
    pub ordered: Vec<&'a SelectedRole>,
    pub skipped: Vec<String>,
}

impl WizardStepData {
    pub fn pain_point(&self, role_key: &str) -> Option<&RolePainPoint> {
        self.pain_points
            .as_ref()
            .and_then(|step| step.role_specific_pain_points.get(role_key))
    }

    /// Explicit ratings for the role, gaps filled from pain points, tech stack and adoption.
    pub fn ratings_for(&self, role: &SelectedRole) -> RoleScoreInput {
        let key = role.key();
        let explicit = self.role_ratings.get(&key).copied().unwrap_or_default();

        let pain = self.pain_point(&key);
        let data_readiness = self
            .tech_stack
            .as_ref()
            .and_then(TechStackStep::data_readiness);
        let suitability = self
            .adoption
            .as_ref()
            .and_then(|step| step.role_adoption.get(&key))
            .and_then(|adoption| adoption.suitability);

        explicit.or(RoleScoreInput {
            time_savings: pain.and_then(|pain| pain.frequency),
            quality_impact: pain.and_then(|pain| pain.severity),
            strategic_alignment: pain.and_then(|pain| pain.impact),
            data_readiness,
            technical_feasibility: data_readiness,
            adoption_risk: suitability,
        })
    }

    /// Selected roles with ranked ids first, then the remainder in selection order.
    ///
    /// Roles whose key was already taken are reported in `skipped` rather than dropped silently.
    pub fn ordered_roles(&self) -> RoleSelection<'_> {
        let mut selection = RoleSelection::default();
        let Some(roles) = self.roles.as_ref() else {
            return selection;
        };

        let mut placed = HashSet::new();
        for id in &roles.prioritized_roles {
            match roles
                .selected_roles
                .iter()
                .position(|role| role.id == Some(*id))
            {
                Some(index) => {
                    if placed.insert(index) {
                        selection.ordered.push(&roles.selected_roles[index]);
                    }
                }
                None => {
                    tracing::warn!(role_id = id, "prioritized role is not among selected roles; skipping");
                }
            }
        }

        for (index, role) in roles.selected_roles.iter().enumerate() {
            if !placed.contains(&index) {
                selection.ordered.push(role);
            }
        }

        let mut keys = HashSet::new();
        selection.ordered.retain(|role| {
            let key = role.key();
            if keys.insert(key.clone()) {
                true
            } else {
                tracing::warn!(role_key = %key, title = %role.title, "duplicate role selection; skipping");
                selection.skipped.push(key);
                false
            }
        });

        selection
    }

    pub fn industry(&self) -> Option<&str> {
        self.basics.as_ref().and_then(|basics| basics.industry.as_deref())
    }
}
