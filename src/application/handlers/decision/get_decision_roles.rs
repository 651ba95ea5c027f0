//! GetDecisionRolesHandler - Query handler listing a decision's stakeholders.
//!
//! Role assignments come from the decision; display data is looked up in
//! the stakeholder directory. Unknown stakeholders are still listed.

use std::sync::Arc;

use serde::Serialize;

use super::load;
use crate::domain::decision::{roles_of, DecisionError, RoleAssignment};
use crate::domain::foundation::DecisionId;
use crate::ports::{DecisionScope, DecisionStore, Stakeholder, StakeholderDirectory};

#[derive(Debug, Clone)]
pub struct GetDecisionRolesQuery {
    pub scope: DecisionScope,
    pub decision_id: DecisionId,
}

/// One stakeholder row of a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRoleView {
    #[serde(flatten)]
    pub assignment: RoleAssignment,
    pub is_driver: bool,
    /// `None` when the directory does not know the stakeholder.
    pub profile: Option<Stakeholder>,
}

pub struct GetDecisionRolesHandler {
    decisions: Arc<dyn DecisionStore>,
    directory: Arc<dyn StakeholderDirectory>,
}

impl GetDecisionRolesHandler {
    pub fn new(
        decisions: Arc<dyn DecisionStore>,
        directory: Arc<dyn StakeholderDirectory>,
    ) -> Self {
        Self {
            decisions,
            directory,
        }
    }

    /// Returns one row per stakeholder, ordered by stakeholder id.
    pub async fn handle(
        &self,
        query: GetDecisionRolesQuery,
    ) -> Result<Vec<DecisionRoleView>, DecisionError> {
        let decision = load(self.decisions.as_ref(), &query.decision_id, &query.scope).await?;
        let driver = decision.driver_stakeholder_id();

        let mut rows = Vec::new();
        for assignment in roles_of(&decision) {
            let profile = self.directory.get_by_id(&assignment.stakeholder_id).await?;
            if profile.is_none() {
                tracing::debug!(
                    stakeholder_id = %assignment.stakeholder_id,
                    "Stakeholder not in directory"
                );
            }
            rows.push(DecisionRoleView {
                is_driver: driver == Some(&assignment.stakeholder_id),
                assignment,
                profile,
            });
        }
        Ok(rows)
    }
}
