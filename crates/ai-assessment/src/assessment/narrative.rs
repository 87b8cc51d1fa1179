//! Narrative collaborators: executive summaries, capability suggestions and impact estimates.
//!
//! Production deployments plug in an LLM-backed implementation; [`RuleBasedNarrative`] is the
//! offline variant and also supplies the placeholder summary used when a provider fails.

use async_trait::async_trait;
use std::collections::BTreeSet;

use super::report::{CapabilitySuggestion, ImpactMetric, PrioritizedItem};
use super::wizard::RolePainPoint;

/// Role context handed to narrative providers.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleContext {
    pub role_id: String,
    pub title: String,
    pub department: String,
    pub pain_point: Option<RolePainPoint>,
}

/// Assessment-wide context for the executive summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryContext {
    pub assessment_id: i64,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub prioritized_items: Vec<PrioritizedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleImpactEstimate {
    pub metrics: Vec<ImpactMetric>,
    pub estimated_annual_roi: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative provider unavailable: {0}")]
    Unavailable(String),
    #[error("narrative provider returned an invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait NarrativeService: Send + Sync {
    async fn executive_summary(&self, context: &SummaryContext) -> Result<String, NarrativeError>;

    async fn capability_suggestions(
        &self,
        role: &RoleContext,
    ) -> Result<Vec<CapabilitySuggestion>, NarrativeError>;

    async fn performance_impact(
        &self,
        role: &RoleContext,
    ) -> Result<RoleImpactEstimate, NarrativeError>;
}

/// Keyword-driven narrative that needs no external provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedNarrative;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleFamily {
    CustomerSupport,
    Sales,
    Marketing,
    General,
}

impl RoleFamily {
    fn classify(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("customer support") {
            Self::CustomerSupport
        } else if title.contains("sales") {
            Self::Sales
        } else if title.contains("marketing") || title.contains("content") {
            Self::Marketing
        } else {
            Self::General
        }
    }

    fn capabilities(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::CustomerSupport => &[
                ("Natural Language Understanding", "For ticket categorization and automatic routing"),
                ("Response Generation", "For template-based replies to common questions"),
                ("Knowledge Base Integration", "To quickly pull relevant documentation"),
            ],
            Self::Sales => &[
                ("RFP Response Automation", "For extracting key questions and generating draft responses"),
                ("Sales Data Analysis", "For identifying trends and opportunities"),
            ],
            Self::Marketing => &[
                ("Content Generation", "For creating draft marketing materials"),
                ("Social Media Analysis", "For tracking campaign performance"),
            ],
            Self::General => &[
                ("Workflow Automation", "For streamlining repetitive tasks"),
                ("Document Processing", "For extracting and organizing information"),
            ],
        }
    }

    fn metrics(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::CustomerSupport => &[
                ("Time per ticket", 45.0),
                ("Customer satisfaction", 20.0),
                ("Agent capacity", 35.0),
            ],
            Self::Sales => &[
                ("RFP response time", 30.0),
                ("Proposal quality", 25.0),
                ("Deal analysis time", 40.0),
            ],
            Self::Marketing => &[("Content creation time", 35.0), ("Campaign analysis", 30.0)],
            Self::General => &[("Process efficiency", 30.0), ("Error reduction", 25.0)],
        }
    }

    fn annual_roi(self) -> f64 {
        match self {
            Self::CustomerSupport => 120_000.0,
            Self::Sales => 110_000.0,
            Self::Marketing => 90_000.0,
            Self::General => 80_000.0,
        }
    }
}

#[async_trait]
impl NarrativeService for RuleBasedNarrative {
    async fn executive_summary(&self, context: &SummaryContext) -> Result<String, NarrativeError> {
        Ok(template_summary(context))
    }

    async fn capability_suggestions(
        &self,
        role: &RoleContext,
    ) -> Result<Vec<CapabilitySuggestion>, NarrativeError> {
        Ok(RoleFamily::classify(&role.title)
            .capabilities()
            .iter()
            .map(|(name, description)| CapabilitySuggestion {
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect())
    }

    async fn performance_impact(
        &self,
        role: &RoleContext,
    ) -> Result<RoleImpactEstimate, NarrativeError> {
        let family = RoleFamily::classify(&role.title);
        Ok(RoleImpactEstimate {
            metrics: family
                .metrics()
                .iter()
                .map(|(name, improvement)| ImpactMetric {
                    name: name.to_string(),
                    improvement: *improvement,
                })
                .collect(),
            estimated_annual_roi: family.annual_roi(),
        })
    }
}

/// Deterministic executive summary built from the ranked roles alone.
pub fn template_summary(context: &SummaryContext) -> String {
    let top: Vec<&PrioritizedItem> = context.prioritized_items.iter().take(2).collect();
    let Some(lead) = top.first() else {
        return "No roles were scored for this assessment, so no AI transformation opportunities could be ranked yet.".to_string();
    };

    let mut seen = BTreeSet::new();
    let departments: Vec<&str> = top
        .iter()
        .map(|item| item.department.as_str())
        .filter(|department| seen.insert(*department))
        .collect();

    let organization = context
        .company_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("your organization");

    format!(
        "Based on our analysis of the processes and roles at {organization}, we've identified significant opportunities for AI transformation that could lead to efficiency gains and cost savings.\n\n\
         The assessment reveals that {} functions have the highest potential for immediate AI impact, led by {} with a value score of {} and a {} priority rating.\n\n\
         Our recommended approach is a phased implementation starting with these high-impact, low-effort areas to demonstrate quick wins and build organizational momentum for broader AI adoption.",
        departments.join(" and "),
        lead.name,
        lead.value_score,
        lead.priority.label().to_lowercase(),
    )
}
