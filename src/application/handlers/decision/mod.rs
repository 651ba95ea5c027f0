//! Decision command and query handlers.
//!
//! Link and unlink write three things: the source, the target and the edge
//! record. A failure part-way rolls the earlier writes back to the loaded
//! snapshots. Between the first write and a rollback, readers may briefly
//! see one side of the pair without the other.

mod assign_stakeholder;
mod create_decision;
mod get_decision_roles;
mod link_decisions;
mod publish_decision;
mod unassign_stakeholder;
mod unlink_decisions;
mod update_decision;

pub use assign_stakeholder::{
    AssignStakeholderCommand, AssignStakeholderHandler, AssignStakeholderResult,
};
pub use create_decision::{CreateDecisionCommand, CreateDecisionHandler, CreateDecisionResult};
pub use get_decision_roles::{DecisionRoleView, GetDecisionRolesHandler, GetDecisionRolesQuery};
pub use link_decisions::{LinkDecisionsCommand, LinkDecisionsHandler, LinkDecisionsResult};
pub use publish_decision::{
    PublishDecisionCommand, PublishDecisionHandler, PublishDecisionResult,
};
pub use unassign_stakeholder::{UnassignStakeholderCommand, UnassignStakeholderHandler};
pub use unlink_decisions::{UnlinkDecisionsCommand, UnlinkDecisionsHandler, UnlinkDecisionsResult};
pub use update_decision::{DecisionChanges, UpdateDecisionCommand, UpdateDecisionHandler};

use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::DecisionId;
use crate::ports::{DecisionScope, DecisionStore};

/// Loads a decision or fails with `NotFound`.
async fn load(
    store: &dyn DecisionStore,
    id: &DecisionId,
    scope: &DecisionScope,
) -> Result<Decision, DecisionError> {
    store
        .get(id, scope)
        .await?
        .ok_or_else(|| DecisionError::NotFound(id.clone()))
}

/// Scope for the far side of a relationship, which may belong to any team
/// or project of the organisation.
fn organisation_scope(scope: &DecisionScope) -> DecisionScope {
    DecisionScope::organisation(scope.organisation_id.clone())
}

/// Writes both sides of an edge change, source first.
///
/// If the target write fails the source is put back to `previous_source`,
/// so a failed call never leaves half of an inverse pair stored.
async fn write_pair(
    store: &dyn DecisionStore,
    scope: &DecisionScope,
    previous_source: &Decision,
    source: &Decision,
    target: &Decision,
) -> Result<(), DecisionError> {
    store.update(source, scope).await?;
    if let Err(err) = store.update(target, &organisation_scope(scope)).await {
        restore(store, scope, &[previous_source]).await;
        return Err(err.into());
    }
    Ok(())
}

/// Rewrites earlier snapshots after a failed multi-write. Failures are
/// logged; the caller already has an error to return.
async fn restore(store: &dyn DecisionStore, scope: &DecisionScope, snapshots: &[&Decision]) {
    let scope = organisation_scope(scope);
    for snapshot in snapshots {
        if let Err(err) = store.update(snapshot, &scope).await {
            tracing::error!(
                decision_id = ?snapshot.id(),
                error = %err,
                "Failed to roll back decision"
            );
        }
    }
}
