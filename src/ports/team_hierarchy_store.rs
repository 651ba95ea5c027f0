//! Team hierarchy store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrganisationId};
use crate::domain::team::TeamHierarchy;

/// One hierarchy document per organisation.
#[async_trait]
pub trait TeamHierarchyStore: Send + Sync {
    /// Returns `None` if the organisation has no hierarchy yet.
    async fn get_by_organisation_id(
        &self,
        organisation_id: &OrganisationId,
    ) -> Result<Option<TeamHierarchy>, DomainError>;

    /// Replaces the organisation's hierarchy.
    async fn save(
        &self,
        organisation_id: &OrganisationId,
        hierarchy: &TeamHierarchy,
    ) -> Result<(), DomainError>;
}
