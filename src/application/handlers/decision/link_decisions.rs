//! LinkDecisionsHandler - Command handler for relating two decisions.
//!
//! Both decisions and the edge record are written. Re-linking an existing
//! edge changes nothing and publishes nothing. The target may live in any
//! team or project of the source's organisation.

use std::sync::Arc;

use super::{load, organisation_scope, restore, write_pair};
use crate::application::handlers::envelope_for;
use crate::config::RelationshipConfig;
use crate::domain::decision::{
    relationships, Decision, DecisionError, DecisionsLinked, RelationshipRecord,
    RelationshipType,
};
use crate::domain::foundation::{CommandMetadata, DecisionId, EventId, RelationshipRecordId};
use crate::ports::{DecisionScope, DecisionStore, EventPublisher, RelationshipStore};

#[derive(Debug, Clone)]
pub struct LinkDecisionsCommand {
    pub scope: DecisionScope,
    pub source_id: DecisionId,
    pub target_id: DecisionId,
    pub relationship_type: RelationshipType,
}

#[derive(Debug, Clone)]
pub struct LinkDecisionsResult {
    pub source: Decision,
    pub target: Decision,
    /// `None` when the edge already existed.
    pub record_id: Option<RelationshipRecordId>,
}

pub struct LinkDecisionsHandler {
    decisions: Arc<dyn DecisionStore>,
    relationships: Arc<dyn RelationshipStore>,
    event_publisher: Arc<dyn EventPublisher>,
    max_per_type: usize,
}

impl LinkDecisionsHandler {
    pub fn new(
        decisions: Arc<dyn DecisionStore>,
        relationships: Arc<dyn RelationshipStore>,
        event_publisher: Arc<dyn EventPublisher>,
        config: &RelationshipConfig,
    ) -> Self {
        Self {
            decisions,
            relationships,
            event_publisher,
            max_per_type: config.max_relationships_per_type,
        }
    }

    pub async fn handle(
        &self,
        cmd: LinkDecisionsCommand,
        metadata: CommandMetadata,
    ) -> Result<LinkDecisionsResult, DecisionError> {
        // 1. Load both sides
        let source = load(self.decisions.as_ref(), &cmd.source_id, &cmd.scope).await?;
        let target = load(
            self.decisions.as_ref(),
            &cmd.target_id,
            &organisation_scope(&cmd.scope),
        )
        .await?;

        if source
            .relationships()
            .contains(cmd.relationship_type, &cmd.target_id)
        {
            tracing::debug!(
                source_id = %cmd.source_id,
                target_id = %cmd.target_id,
                "Relationship already present"
            );
            return Ok(LinkDecisionsResult {
                source,
                target,
                record_id: None,
            });
        }

        // 2. Enforce the per-type limit on both sides
        self.check_limit(&source, cmd.relationship_type)?;
        self.check_limit(&target, cmd.relationship_type.inverse())?;

        // 3. Link (pure)
        let (linked_source, linked_target) =
            relationships::link(&source, &target, cmd.relationship_type).map_err(|err| {
                tracing::warn!(
                    source_id = %cmd.source_id,
                    target_id = %cmd.target_id,
                    relationship_type = %cmd.relationship_type,
                    error = %err,
                    "Link rejected"
                );
                err
            })?;
        let record = RelationshipRecord::new(&linked_source, &linked_target, cmd.relationship_type)?;

        // 4. Persist both decisions, then the edge record
        write_pair(
            self.decisions.as_ref(),
            &cmd.scope,
            &source,
            &linked_source,
            &linked_target,
        )
        .await?;
        let record_id = match self.relationships.add(&record).await {
            Ok(record_id) => record_id,
            Err(err) => {
                restore(self.decisions.as_ref(), &cmd.scope, &[&source, &target]).await;
                return Err(err.into());
            }
        };

        // 5. Publish event
        let event = DecisionsLinked {
            event_id: EventId::new(),
            source_decision_id: cmd.source_id.clone(),
            target_decision_id: cmd.target_id.clone(),
            relationship_type: cmd.relationship_type,
            linked_at: record.created_at,
        };
        self.event_publisher
            .publish(envelope_for(&event, &metadata)?)
            .await?;

        tracing::info!(
            source_id = %cmd.source_id,
            target_id = %cmd.target_id,
            relationship_type = %cmd.relationship_type,
            "Decisions linked"
        );
        Ok(LinkDecisionsResult {
            source: linked_source,
            target: linked_target,
            record_id: Some(record_id),
        })
    }

    fn check_limit(
        &self,
        decision: &Decision,
        relationship_type: RelationshipType,
    ) -> Result<(), DecisionError> {
        if decision.relationships().count(relationship_type) >= self.max_per_type {
            return Err(DecisionError::TooManyRelationships {
                relationship_type,
                limit: self.max_per_type,
            });
        }
        Ok(())
    }
}
