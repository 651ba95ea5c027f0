//! UnlinkDecisionsHandler - Command handler for removing a relationship.
//!
//! An edge may have been recorded from either end (`a blocks b` or
//! `b blocked_by a`); both directions are looked up when deleting the record.

use std::sync::Arc;

use super::{load, organisation_scope, restore, write_pair};
use crate::application::handlers::envelope_for;
use crate::domain::decision::{
    relationships, Decision, DecisionError, DecisionsUnlinked, RelationshipType,
};
use crate::domain::foundation::{
    CommandMetadata, DecisionId, EventId, RelationshipRecordId, Timestamp,
};
use crate::ports::{DecisionScope, DecisionStore, EventPublisher, RelationshipStore};

#[derive(Debug, Clone)]
pub struct UnlinkDecisionsCommand {
    pub scope: DecisionScope,
    pub source_id: DecisionId,
    pub target_id: DecisionId,
    pub relationship_type: RelationshipType,
}

#[derive(Debug, Clone)]
pub struct UnlinkDecisionsResult {
    pub source: Decision,
    pub target: Decision,
    /// False when there was no such edge.
    pub removed: bool,
}

pub struct UnlinkDecisionsHandler {
    decisions: Arc<dyn DecisionStore>,
    relationships: Arc<dyn RelationshipStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UnlinkDecisionsHandler {
    pub fn new(
        decisions: Arc<dyn DecisionStore>,
        relationships: Arc<dyn RelationshipStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            decisions,
            relationships,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: UnlinkDecisionsCommand,
        metadata: CommandMetadata,
    ) -> Result<UnlinkDecisionsResult, DecisionError> {
        let source = load(self.decisions.as_ref(), &cmd.source_id, &cmd.scope).await?;
        let target = load(
            self.decisions.as_ref(),
            &cmd.target_id,
            &organisation_scope(&cmd.scope),
        )
        .await?;

        let (next_source, next_target) =
            relationships::unlink(&source, &target, cmd.relationship_type).map_err(|err| {
                tracing::warn!(
                    source_id = %cmd.source_id,
                    target_id = %cmd.target_id,
                    error = %err,
                    "Unlink rejected"
                );
                err
            })?;
        if next_source == source && next_target == target {
            return Ok(UnlinkDecisionsResult {
                source,
                target,
                removed: false,
            });
        }

        write_pair(
            self.decisions.as_ref(),
            &cmd.scope,
            &source,
            &next_source,
            &next_target,
        )
        .await?;
        if let Err(err) = self.remove_record(&cmd).await {
            restore(self.decisions.as_ref(), &cmd.scope, &[&source, &target]).await;
            return Err(err);
        }

        let event = DecisionsUnlinked {
            event_id: EventId::new(),
            source_decision_id: cmd.source_id.clone(),
            target_decision_id: cmd.target_id.clone(),
            relationship_type: cmd.relationship_type,
            unlinked_at: Timestamp::now(),
        };
        self.event_publisher
            .publish(envelope_for(&event, &metadata)?)
            .await?;

        tracing::info!(
            source_id = %cmd.source_id,
            target_id = %cmd.target_id,
            relationship_type = %cmd.relationship_type,
            "Decisions unlinked"
        );
        Ok(UnlinkDecisionsResult {
            source: next_source,
            target: next_target,
            removed: true,
        })
    }

    /// Deletes the edge record, whichever end it was recorded from.
    async fn remove_record(&self, cmd: &UnlinkDecisionsCommand) -> Result<(), DecisionError> {
        let organisation_id = &cmd.scope.organisation_id;
        if let Some(record_id) = self.find_record(cmd).await? {
            self.relationships.remove(&record_id, organisation_id).await?;
        }
        Ok(())
    }

    async fn find_record(
        &self,
        cmd: &UnlinkDecisionsCommand,
    ) -> Result<Option<RelationshipRecordId>, DecisionError> {
        let organisation_id = &cmd.scope.organisation_id;
        let forward = self
            .relationships
            .find(
                &cmd.source_id,
                &cmd.target_id,
                cmd.relationship_type,
                organisation_id,
            )
            .await?;
        if forward.is_some() {
            return Ok(forward);
        }
        Ok(self
            .relationships
            .find(
                &cmd.target_id,
                &cmd.source_id,
                cmd.relationship_type.inverse(),
                organisation_id,
            )
            .await?)
    }
}
