//! Decision store port.
//!
//! Decisions live in a document store partitioned by organisation, with
//! optional team and project scoping.
//!
//! # Design
//!
//! - **Id assignment**: `create` issues the id; the domain never invents one
//! - **Last writer wins**: `update` overwrites the stored document
//! - **Live queries**: `subscribe_all` yields the full matching set on every change

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, OrganisationId, ProjectId, TeamId};

/// Snapshots of the decisions matching a scope, one item per change.
pub type DecisionStream = BoxStream<'static, Vec<Decision>>;

/// Which decisions an operation may see.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionScope {
    pub organisation_id: OrganisationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

impl DecisionScope {
    /// Every decision of an organisation.
    pub fn organisation(organisation_id: OrganisationId) -> Self {
        Self {
            organisation_id,
            team_id: None,
            project_id: None,
        }
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// True if `decision` falls inside this scope.
    pub fn contains(&self, decision: &Decision) -> bool {
        decision.organisation_id() == &self.organisation_id
            && self
                .team_id
                .as_ref()
                .map_or(true, |t| decision.team_ids().contains(t))
            && self
                .project_id
                .as_ref()
                .map_or(true, |p| decision.project_ids().contains(p))
    }
}

/// Store port for Decision aggregates.
#[async_trait]
pub trait DecisionStore: Send + Sync {
    /// Loads a decision visible in `scope`.
    ///
    /// Returns `None` if it does not exist or lies outside the scope.
    async fn get(
        &self,
        id: &DecisionId,
        scope: &DecisionScope,
    ) -> Result<Option<Decision>, DomainError>;

    /// Persists a new decision and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// - `IdAlreadyAssigned` if the decision already has an id
    /// - `StorageError` on persistence failure
    async fn create(
        &self,
        decision: &Decision,
        scope: &DecisionScope,
    ) -> Result<Decision, DomainError>;

    /// Overwrites a stored decision.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the decision has no id or is not stored
    /// - `StorageError` on persistence failure
    async fn update(&self, decision: &Decision, scope: &DecisionScope) -> Result<(), DomainError>;

    /// Streams the decisions in `scope`, starting with the current set.
    ///
    /// Dropping the stream unsubscribes.
    async fn subscribe_all(&self, scope: &DecisionScope) -> Result<DecisionStream, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn DecisionStore) {}
    }

    #[test]
    fn scope_filters_by_team_and_project() {
        let org = OrganisationId::new("org1").unwrap();
        let team = TeamId::new("t1").unwrap();
        let decision = Decision::create_empty(org.clone())
            .set_teams([team.clone()].into_iter().collect())
            .unwrap();

        assert!(DecisionScope::organisation(org.clone()).contains(&decision));
        assert!(DecisionScope::organisation(org.clone())
            .with_team(team)
            .contains(&decision));
        assert!(!DecisionScope::organisation(org.clone())
            .with_project(ProjectId::new("p1").unwrap())
            .contains(&decision));
        assert!(!DecisionScope::organisation(OrganisationId::new("org2").unwrap())
            .contains(&decision));
    }
}
