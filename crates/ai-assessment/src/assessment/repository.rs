use async_trait::async_trait;

use crate::scoring::adoption::CategoryWeights;

/// Read access to organization-specific adoption weights held by the persistence layer.
#[async_trait]
pub trait OrganizationWeightsSource: Send + Sync {
    async fn organization_weights(
        &self,
        organization_id: i64,
    ) -> Result<Option<CategoryWeights>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Source for deployments without per-organization overrides.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOrganizationWeights;

#[async_trait]
impl OrganizationWeightsSource for NoOrganizationWeights {
    async fn organization_weights(
        &self,
        _organization_id: i64,
    ) -> Result<Option<CategoryWeights>, RepositoryError> {
        Ok(None)
    }
}
