//! Team hierarchy domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, OrganisationId, TeamId, Timestamp};

/// What happened to the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamChange {
    Added,
    Updated,
    Moved,
    Removed,
}

/// Published after any successful hierarchy mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamHierarchyChanged {
    pub event_id: EventId,
    pub organisation_id: OrganisationId,
    pub change: TeamChange,
    pub team_id: TeamId,
    /// For `Removed`: the team and every descendant that went with it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_team_ids: Vec<TeamId>,
    pub changed_at: Timestamp,
}

domain_event!(
    TeamHierarchyChanged,
    event_type = "team_hierarchy.changed",
    aggregate_id = organisation_id,
    aggregate_type = "TeamHierarchy",
    occurred_at = changed_at,
    event_id = event_id
);
