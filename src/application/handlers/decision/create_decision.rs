//! CreateDecisionHandler - Command handler for starting a decision.

use std::sync::Arc;

use crate::application::handlers::envelope_for;
use crate::domain::decision::{Decision, DecisionCreated, DecisionError};
use crate::domain::foundation::{CommandMetadata, EventId};
use crate::ports::{DecisionScope, DecisionStore, EventPublisher};

/// Command to create a decision. The actor becomes its driver.
#[derive(Debug, Clone)]
pub struct CreateDecisionCommand {
    pub scope: DecisionScope,
    pub title: String,
    pub description: Option<String>,
}

/// Result of successful decision creation.
#[derive(Debug, Clone)]
pub struct CreateDecisionResult {
    pub decision: Decision,
    pub event: DecisionCreated,
}

pub struct CreateDecisionHandler {
    decisions: Arc<dyn DecisionStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateDecisionHandler {
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
        cmd: CreateDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateDecisionResult, DecisionError> {
        // 1. Build the draft
        let mut draft = Decision::create_empty(cmd.scope.organisation_id.clone())
            .update_title(cmd.title)?
            .set_driver(metadata.actor_id.clone())?;
        if let Some(description) = cmd.description {
            draft = draft.update_content(description)?;
        }
        if let Some(team_id) = &cmd.scope.team_id {
            draft = draft.set_teams([team_id.clone()].into_iter().collect())?;
        }
        if let Some(project_id) = &cmd.scope.project_id {
            draft = draft.set_projects([project_id.clone()].into_iter().collect())?;
        }

        // 2. Persist (assigns the id)
        let decision = self.decisions.create(&draft, &cmd.scope).await?;
        let decision_id = decision.id().cloned().ok_or(DecisionError::NotPersisted)?;

        // 3. Publish event
        let event = DecisionCreated {
            event_id: EventId::new(),
            decision_id: decision_id.clone(),
            organisation_id: decision.organisation_id().clone(),
            title: decision.title().to_string(),
            driver_stakeholder_id: decision.driver_stakeholder_id().cloned(),
            created_at: *decision.created_at(),
        };
        self.event_publisher
            .publish(envelope_for(&event, &metadata)?)
            .await?;

        tracing::info!(
            decision_id = %decision_id,
            organisation_id = %decision.organisation_id(),
            "Decision created"
        );
        Ok(CreateDecisionResult { decision, event })
    }
}
