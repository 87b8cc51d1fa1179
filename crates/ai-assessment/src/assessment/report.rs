use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::adoption::CalculatedAiAdoptionScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
    NotRecommended,
}

impl PriorityLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::NotRecommended => "Not recommended",
        }
    }
}

/// Coarse level used for heatmap axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedItem {
    pub id: String,
    pub name: String,
    pub department: String,
    pub value_score: u8,
    pub effort_score: u8,
    pub total_score: u8,
    pub priority: PriorityLevel,
    pub value_level: Level,
    pub effort_level: Level,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapEntry {
    pub id: String,
    pub name: String,
    pub department: String,
}

/// Value level → effort level → roles in that cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapData {
    pub matrix: BTreeMap<Level, BTreeMap<Level, Vec<HeatmapEntry>>>,
}

impl HeatmapData {
    pub fn from_items(items: &[PrioritizedItem]) -> Self {
        let levels = [Level::High, Level::Medium, Level::Low];
        let mut matrix: BTreeMap<Level, BTreeMap<Level, Vec<HeatmapEntry>>> = levels
            .iter()
            .map(|value| {
                let row = levels.iter().map(|effort| (*effort, Vec::new())).collect();
                (*value, row)
            })
            .collect();

        for item in items {
            if let Some(cell) = matrix
                .get_mut(&item.value_level)
                .and_then(|row| row.get_mut(&item.effort_level))
            {
                cell.push(HeatmapEntry {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    department: item.department.clone(),
                });
            }
        }

        Self { matrix }
    }

    pub fn cell(&self, value: Level, effort: Level) -> &[HeatmapEntry] {
        self.matrix
            .get(&value)
            .and_then(|row| row.get(&effort))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationData {
    pub prioritized_items: Vec<PrioritizedItem>,
    pub heatmap: HeatmapData,
    /// Keys of duplicate role selections that were not scored.
    #[serde(default)]
    pub skipped_roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySuggestion {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub role_id: String,
    pub role_title: String,
    pub capabilities: Vec<CapabilitySuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetric {
    pub name: String,
    /// Expected improvement in percent.
    pub improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleImpact {
    pub role_title: String,
    pub metrics: Vec<ImpactMetric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceImpact {
    pub role_impacts: Vec<RoleImpact>,
    pub estimated_roi: f64,
}

/// Report sections that fell back to placeholder content or dropped part of their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    PrioritizationData,
    ExecutiveSummary,
    AiSuggestions,
    PerformanceImpact,
}

/// Report payload persisted verbatim by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContent {
    pub assessment_id: i64,
    pub executive_summary: String,
    pub prioritization_data: PrioritizationData,
    pub ai_suggestions: Vec<AiSuggestion>,
    pub performance_impact: PerformanceImpact,
    pub ai_adoption_score: CalculatedAiAdoptionScore,
    pub degraded: Vec<ReportSection>,
    pub generated_at: DateTime<Utc>,
}

impl ReportContent {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}
