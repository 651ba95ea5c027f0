//! UpdateDecisionHandler - Command handler for editing decision content.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::load;
use crate::domain::decision::{Cost, Decision, DecisionError, DecisionMethod, Reversibility};
use crate::domain::foundation::{CommandMetadata, DecisionId, ProjectId, TeamId};
use crate::ports::{DecisionScope, DecisionStore};

/// Field edits to apply. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct DecisionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cost: Option<Cost>,
    pub reversibility: Option<Reversibility>,
    pub options: Option<Vec<String>>,
    pub criteria: Option<Vec<String>>,
    pub chosen_option: Option<String>,
    pub decision_method: Option<DecisionMethod>,
    pub team_ids: Option<BTreeSet<TeamId>>,
    pub project_ids: Option<BTreeSet<ProjectId>>,
}

impl DecisionChanges {
    /// Applies every present change, stopping at the first rejected one.
    pub fn apply(self, decision: &Decision) -> Result<Decision, DecisionError> {
        let mut next = decision.clone();
        if let Some(title) = self.title {
            next = next.update_title(title)?;
        }
        if let Some(description) = self.description {
            next = next.update_content(description)?;
        }
        if let Some(cost) = self.cost {
            next = next.update_cost(cost)?;
        }
        if let Some(reversibility) = self.reversibility {
            next = next.update_reversibility(reversibility)?;
        }
        if let Some(options) = self.options {
            next = next.update_options(options)?;
        }
        if let Some(criteria) = self.criteria {
            next = next.update_criteria(criteria)?;
        }
        if let Some(choice) = self.chosen_option {
            next = next.choose_option(choice)?;
        }
        if let Some(method) = self.decision_method {
            next = next.set_method(method)?;
        }
        if let Some(team_ids) = self.team_ids {
            next = next.set_teams(team_ids)?;
        }
        if let Some(project_ids) = self.project_ids {
            next = next.set_projects(project_ids)?;
        }
        Ok(next)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateDecisionCommand {
    pub scope: DecisionScope,
    pub decision_id: DecisionId,
    pub changes: DecisionChanges,
}

/// Handler for content edits. Edits are not published as events.
pub struct UpdateDecisionHandler {
    decisions: Arc<dyn DecisionStore>,
}

impl UpdateDecisionHandler {
    pub fn new(decisions: Arc<dyn DecisionStore>) -> Self {
        Self { decisions }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDecisionCommand,
        metadata: CommandMetadata,
    ) -> Result<Decision, DecisionError> {
        let current = load(self.decisions.as_ref(), &cmd.decision_id, &cmd.scope).await?;

        let updated = cmd.changes.apply(&current).map_err(|err| {
            tracing::warn!(
                decision_id = %cmd.decision_id,
                actor_id = %metadata.actor_id,
                error = %err,
                "Decision update rejected"
            );
            err
        })?;

        self.decisions.update(&updated, &cmd.scope).await?;
        tracing::info!(decision_id = %cmd.decision_id, "Decision updated");
        Ok(updated)
    }
}
