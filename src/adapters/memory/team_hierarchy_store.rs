//! In-memory TeamHierarchyStore.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, OrganisationId};
use crate::domain::team::{TeamHierarchy, TeamHierarchyDocument};
use crate::ports::TeamHierarchyStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamHierarchyStore {
    documents: Arc<RwLock<HashMap<OrganisationId, TeamHierarchyDocument>>>,
}

impl InMemoryTeamHierarchyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamHierarchyStore for InMemoryTeamHierarchyStore {
    async fn get_by_organisation_id(
        &self,
        organisation_id: &OrganisationId,
    ) -> Result<Option<TeamHierarchy>, DomainError> {
        let documents = self.documents.read().await;
        documents
            .get(organisation_id)
            .map(|doc| TeamHierarchy::try_from(doc.clone()).map_err(DomainError::from))
            .transpose()
    }

    async fn save(
        &self,
        organisation_id: &OrganisationId,
        hierarchy: &TeamHierarchy,
    ) -> Result<(), DomainError> {
        self.documents
            .write()
            .await
            .insert(organisation_id.clone(), TeamHierarchyDocument::from(hierarchy));
        tracing::debug!(
            organisation_id = %organisation_id,
            teams = hierarchy.len(),
            "Saved team hierarchy"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TeamId;
    use crate::domain::team::NewTeam;

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemoryTeamHierarchyStore::new();
        let org = OrganisationId::new("org1").unwrap();
        assert!(store.get_by_organisation_id(&org).await.unwrap().is_none());

        let hierarchy = TeamHierarchy::new(org.clone())
            .add_team(NewTeam::root(TeamId::new("eng").unwrap(), "Engineering"))
            .unwrap();
        store.save(&org, &hierarchy).await.unwrap();

        let loaded = store.get_by_organisation_id(&org).await.unwrap();
        assert_eq!(loaded, Some(hierarchy));
    }
}
