//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! command handler follows the same shape: load the current snapshot,
//! call the pure domain operation, persist the result, publish an event.

pub mod decision;
pub mod team;

pub use decision::{
    AssignStakeholderCommand, AssignStakeholderHandler, AssignStakeholderResult,
    CreateDecisionCommand, CreateDecisionHandler, CreateDecisionResult, DecisionChanges,
    DecisionRoleView, GetDecisionRolesHandler, GetDecisionRolesQuery, LinkDecisionsCommand,
    LinkDecisionsHandler, LinkDecisionsResult, PublishDecisionCommand, PublishDecisionHandler,
    PublishDecisionResult, UnassignStakeholderCommand, UnassignStakeholderHandler,
    UnlinkDecisionsCommand, UnlinkDecisionsHandler, UnlinkDecisionsResult, UpdateDecisionCommand,
    UpdateDecisionHandler,
};
pub use team::{
    ChangeTeamHierarchyHandler, ChangeTeamHierarchyResult, GetTeamHierarchyHandler,
    GetTeamHierarchyQuery, TeamHierarchyCommand,
};

use serde::Serialize;

use crate::domain::foundation::{
    CommandMetadata, DomainError, DomainEvent, ErrorCode, EventEnvelope,
};

/// Wraps an event and stamps it with the command's actor and correlation id.
pub(crate) fn envelope_for<E>(
    event: &E,
    metadata: &CommandMetadata,
) -> Result<EventEnvelope, DomainError>
where
    E: DomainEvent + Serialize,
{
    EventEnvelope::from_event(event)
        .map(|envelope| {
            envelope
                .with_correlation_id(metadata.correlation_id())
                .with_actor_id(metadata.actor_id.to_string())
        })
        .map_err(|err| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize {}: {}", event.event_type(), err),
            )
        })
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::adapters::{InMemoryDecisionStore, InMemoryEventBus, InMemoryRelationshipStore};
    use crate::domain::decision::{Decision, RelationshipRecord, RelationshipType};
    use crate::domain::foundation::{
        CommandMetadata, DecisionId, DomainError, ErrorCode, EventEnvelope, OrganisationId,
        RelationshipRecordId, StakeholderId, TeamId,
    };
    use crate::ports::{
        DecisionScope, DecisionStore, DecisionStream, EventPublisher, RelationshipStore,
        RelationshipStream,
    };

    pub struct FailingPublisher;

    #[async_trait]
    impl EventPublisher for FailingPublisher {
        async fn publish(&self, _event: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "Simulated publish failure"))
        }

        async fn publish_all(&self, _events: Vec<EventEnvelope>) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "Simulated publish failure"))
        }
    }

    fn simulated(what: &str) -> DomainError {
        DomainError::new(ErrorCode::StorageError, format!("Simulated {} failure", what))
    }

    /// Decision store that fails exactly the `n`-th `update` call (1-based).
    pub struct FlakyDecisionStore {
        inner: Arc<InMemoryDecisionStore>,
        fail_on_update: usize,
        updates: AtomicUsize,
    }

    impl FlakyDecisionStore {
        pub fn failing_update(inner: Arc<InMemoryDecisionStore>, n: usize) -> Self {
            Self {
                inner,
                fail_on_update: n,
                updates: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DecisionStore for FlakyDecisionStore {
        async fn get(
            &self,
            id: &DecisionId,
            scope: &DecisionScope,
        ) -> Result<Option<Decision>, DomainError> {
            self.inner.get(id, scope).await
        }

        async fn create(
            &self,
            decision: &Decision,
            scope: &DecisionScope,
        ) -> Result<Decision, DomainError> {
            self.inner.create(decision, scope).await
        }

        async fn update(&self, decision: &Decision, scope: &DecisionScope) -> Result<(), DomainError> {
            let call = self.updates.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_on_update {
                return Err(simulated("update"));
            }
            self.inner.update(decision, scope).await
        }

        async fn subscribe_all(&self, scope: &DecisionScope) -> Result<DecisionStream, DomainError> {
            self.inner.subscribe_all(scope).await
        }
    }

    /// Relationship store whose writes always fail.
    pub struct FailingRelationshipStore;

    #[async_trait]
    impl RelationshipStore for FailingRelationshipStore {
        async fn subscribe(
            &self,
            _decision_id: &DecisionId,
            _organisation_id: &OrganisationId,
        ) -> Result<RelationshipStream, DomainError> {
            Err(simulated("subscribe"))
        }

        async fn add(&self, _record: &RelationshipRecord) -> Result<RelationshipRecordId, DomainError> {
            Err(simulated("add"))
        }

        async fn remove(
            &self,
            _record_id: &RelationshipRecordId,
            _organisation_id: &OrganisationId,
        ) -> Result<(), DomainError> {
            Err(simulated("remove"))
        }

        async fn find(
            &self,
            _from: &DecisionId,
            _to: &DecisionId,
            _relationship_type: RelationshipType,
            _organisation_id: &OrganisationId,
        ) -> Result<Option<RelationshipRecordId>, DomainError> {
            Ok(None)
        }
    }

    pub fn org() -> OrganisationId {
        OrganisationId::new("org1").unwrap()
    }

    pub fn scope() -> DecisionScope {
        DecisionScope::organisation(org())
    }

    pub fn actor() -> StakeholderId {
        StakeholderId::new("alice").unwrap()
    }

    pub fn metadata() -> CommandMetadata {
        CommandMetadata::new(actor()).with_correlation_id("test-correlation")
    }

    /// In-memory ports shared by the handler tests.
    pub struct Harness {
        pub decisions: Arc<InMemoryDecisionStore>,
        pub relationships: Arc<InMemoryRelationshipStore>,
        pub events: Arc<InMemoryEventBus>,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                decisions: Arc::new(InMemoryDecisionStore::new()),
                relationships: Arc::new(InMemoryRelationshipStore::new()),
                events: Arc::new(InMemoryEventBus::new()),
            }
        }

        /// Stores a titled decision driven by `actor()`.
        pub async fn seed(&self, title: &str) -> Decision {
            let draft = Decision::create_empty(org())
                .update_title(title)
                .unwrap()
                .set_driver(actor())
                .unwrap();
            self.decisions.create(&draft, &scope()).await.unwrap()
        }

        /// Stores a titled decision that belongs to `team`.
        pub async fn seed_in_team(&self, title: &str, team: &str) -> Decision {
            let team = TeamId::new(team).unwrap();
            let draft = Decision::create_empty(org())
                .update_title(title)
                .unwrap()
                .set_driver(actor())
                .unwrap()
                .set_teams([team.clone()].into_iter().collect())
                .unwrap();
            self.decisions
                .create(&draft, &scope().with_team(team))
                .await
                .unwrap()
        }

        /// Stores a decision that meets every publish precondition.
        pub async fn seed_ready(&self, title: &str) -> Decision {
            let d = self.seed(title).await;
            let ready = d
                .choose_option("Option A")
                .unwrap()
                .set_method(crate::domain::decision::DecisionMethod::Consent)
                .unwrap();
            self.decisions.update(&ready, &scope()).await.unwrap();
            ready
        }

        pub async fn reload(&self, decision: &Decision) -> Decision {
            self.decisions
                .get(decision.id().unwrap(), &scope())
                .await
                .unwrap()
                .unwrap()
        }
    }
}
