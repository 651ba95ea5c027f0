//! PublishDecisionHandler - Command handler for publishing a decision.

use std::sync::Arc;

use super::load;
use crate::application::handlers::envelope_for;
use crate::domain::decision::{Decision, DecisionError, DecisionPublished};
use crate::domain::foundation::{CommandMetadata, DecisionId, EventId};
use crate::ports::{DecisionScope, DecisionStore, EventPublisher};

#[derive(Debug, Clone)]
pub struct PublishDecisionCommand {
    pub scope: DecisionScope,
    pub decision_id: DecisionId,
}

#[derive(Debug, Clone)]
pub struct PublishDecisionResult {
    pub decision: Decision,
    pub event: DecisionPublished,
}

pub struct PublishDecisionHandler {
    decisions: Arc<dyn DecisionStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl PublishDecisionHandler {
    pub fn new(
        decisions: Arc<dyn DecisionStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            decisions,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: PublishDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<PublishDecisionResult, DecisionError> {
        // 1. Load
        let current = load(self.decisions.as_ref(), &cmd.decision_id, &cmd.scope).await?;

        // 2. Publish (pure)
        let published = current.publish().map_err(|err| {
            tracing::warn!(decision_id = %cmd.decision_id, error = %err, "Publish rejected");
            err
        })?;

        // 3. Persist
        self.decisions.update(&published, &cmd.scope).await?;

        // 4. Publish event
        let (Some(chosen), Some(method), Some(published_at)) = (
            published.decision(),
            published.decision_method(),
            published.publish_date(),
        ) else {
            return Err(DecisionError::Infrastructure(
                "published decision is missing its publish fields".to_string(),
            ));
        };
        let event = DecisionPublished {
            event_id: EventId::new(),
            decision_id: cmd.decision_id.clone(),
            organisation_id: published.organisation_id().clone(),
            decision: chosen.to_string(),
            decision_method: method,
            published_at: *published_at,
        };
        self.event_publisher
            .publish(envelope_for(&event, &metadata)?)
            .await?;

        tracing::info!(
            decision_id = %cmd.decision_id,
            decision_method = %method,
            "Decision published"
        );
        Ok(PublishDecisionResult {
            decision: published,
            event,
        })
    }
}
