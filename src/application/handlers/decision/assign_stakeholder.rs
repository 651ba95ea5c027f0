//! AssignStakeholderHandler - Command handler for setting a stakeholder's role.

use std::sync::Arc;

use super::load;
use crate::application::handlers::envelope_for;
use crate::domain::decision::{Decision, DecisionError, StakeholderAssigned, StakeholderRole};
use crate::domain::foundation::{CommandMetadata, DecisionId, EventId, StakeholderId, Timestamp};
use crate::ports::{DecisionScope, DecisionStore, EventPublisher};

#[derive(Debug, Clone)]
pub struct AssignStakeholderCommand {
    pub scope: DecisionScope,
    pub decision_id: DecisionId,
    pub stakeholder_id: StakeholderId,
    pub role: StakeholderRole,
}

#[derive(Debug, Clone)]
pub struct AssignStakeholderResult {
    pub decision: Decision,
    pub event: StakeholderAssigned,
}

pub struct AssignStakeholderHandler {
    decisions: Arc<dyn DecisionStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AssignStakeholderHandler {
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
        cmd: AssignStakeholderCommand,
        metadata: CommandMetadata,
    ) -> Result<AssignStakeholderResult, DecisionError> {
        let current = load(self.decisions.as_ref(), &cmd.decision_id, &cmd.scope).await?;
        let previous_role = current.role_of(&cmd.stakeholder_id);

        let updated = current
            .assign(cmd.stakeholder_id.clone(), cmd.role)
            .map_err(|err| {
                tracing::warn!(
                    decision_id = %cmd.decision_id,
                    stakeholder_id = %cmd.stakeholder_id,
                    error = %err,
                    "Role assignment rejected"
                );
                err
            })?;
        self.decisions.update(&updated, &cmd.scope).await?;

        let event = StakeholderAssigned {
            event_id: EventId::new(),
            decision_id: cmd.decision_id.clone(),
            stakeholder_id: cmd.stakeholder_id.clone(),
            role: cmd.role,
            previous_role,
            assigned_at: Timestamp::now(),
        };
        self.event_publisher
            .publish(envelope_for(&event, &metadata)?)
            .await?;

        tracing::info!(
            decision_id = %cmd.decision_id,
            stakeholder_id = %cmd.stakeholder_id,
            role = %cmd.role,
            "Stakeholder assigned"
        );
        Ok(AssignStakeholderResult {
            decision: updated,
            event,
        })
    }
}
