//! UnassignStakeholderHandler - Command handler for removing a stakeholder.

use std::sync::Arc;

use super::load;
use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{CommandMetadata, DecisionId, StakeholderId};
use crate::ports::{DecisionScope, DecisionStore};

#[derive(Debug, Clone)]
pub struct UnassignStakeholderCommand {
    pub scope: DecisionScope,
    pub decision_id: DecisionId,
    pub stakeholder_id: StakeholderId,
}

pub struct UnassignStakeholderHandler {
    decisions: Arc<dyn DecisionStore>,
}

impl UnassignStakeholderHandler {
    pub fn new(decisions: Arc<dyn DecisionStore>) -> Self {
        Self { decisions }
    }

    pub async fn handle(
        &self,
        cmd: UnassignStakeholderCommand,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        let current = load(self.decisions.as_ref(), &cmd.decision_id, &cmd.scope).await?;
        if current.role_of(&cmd.stakeholder_id).is_none() {
            return Ok(current);
        }

        let updated = current.unassign(&cmd.stakeholder_id)?;
        self.decisions.update(&updated, &cmd.scope).await?;
        tracing::info!(
            decision_id = %cmd.decision_id,
            stakeholder_id = %cmd.stakeholder_id,
            actor_id = %metadata.actor_id,
            "Stakeholder removed"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::decision::StakeholderRole;

    #[tokio::test]
    async fn removes_stakeholder_but_not_driver() {
        let h = Harness::new();
        let d = h.seed("Pick CI").await;
        let bob = StakeholderId::new("bob").unwrap();
        let with_bob = d.assign(bob.clone(), StakeholderRole::Advisor).unwrap();
        h.decisions.update(&with_bob, &scope()).await.unwrap();
        let handler = UnassignStakeholderHandler::new(h.decisions.clone());

        let updated = handler
            .handle(
                UnassignStakeholderCommand {
                    scope: scope(),
                    decision_id: d.id().unwrap().clone(),
                    stakeholder_id: bob.clone(),
                },
                metadata(),
            )
            .await
            .unwrap();
        assert!(updated.role_of(&bob).is_none());

        let result = handler
            .handle(
                UnassignStakeholderCommand {
                    scope: scope(),
                    decision_id: d.id().unwrap().clone(),
                    stakeholder_id: actor(),
                },
                metadata(),
            )
            .await;
        assert_eq!(result.unwrap_err(), DecisionError::DriverMustBeDecider);
    }
}
