//! GetTeamHierarchyHandler - Query handler for an organisation's teams.

use std::sync::Arc;

use crate::domain::foundation::OrganisationId;
use crate::domain::team::{TeamHierarchy, TeamHierarchyError};
use crate::ports::TeamHierarchyStore;

#[derive(Debug, Clone)]
pub struct GetTeamHierarchyQuery {
    pub organisation_id: OrganisationId,
}

pub struct GetTeamHierarchyHandler {
    hierarchies: Arc<dyn TeamHierarchyStore>,
}

impl GetTeamHierarchyHandler {
    pub fn new(hierarchies: Arc<dyn TeamHierarchyStore>) -> Self {
        Self { hierarchies }
    }

    /// # Errors
    ///
    /// - `HierarchyNotFound` if the organisation has no hierarchy yet
    pub async fn handle(
        &self,
        query: GetTeamHierarchyQuery,
    ) -> Result<TeamHierarchy, TeamHierarchyError> {
        self.hierarchies
            .get_by_organisation_id(&query.organisation_id)
            .await?
            .ok_or(TeamHierarchyError::HierarchyNotFound(query.organisation_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTeamHierarchyStore;
    use crate::domain::foundation::TeamId;
    use crate::domain::team::NewTeam;

    #[tokio::test]
    async fn returns_stored_hierarchy_or_not_found() {
        let store = Arc::new(InMemoryTeamHierarchyStore::new());
        let org = OrganisationId::new("org1").unwrap();
        let handler = GetTeamHierarchyHandler::new(store.clone());
        let query = GetTeamHierarchyQuery {
            organisation_id: org.clone(),
        };

        assert_eq!(
            handler.handle(query.clone()).await,
            Err(TeamHierarchyError::HierarchyNotFound(org.clone()))
        );

        let hierarchy = TeamHierarchy::new(org.clone())
            .add_team(NewTeam::root(TeamId::new("eng").unwrap(), "Engineering"))
            .unwrap();
        store.save(&org, &hierarchy).await.unwrap();
        assert_eq!(handler.handle(query).await, Ok(hierarchy));
    }
}
