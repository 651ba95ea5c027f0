//! Persisted shape of a team hierarchy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Team, TeamHierarchy, TeamHierarchyError};
use crate::domain::foundation::{FieldViolation, OrganisationId, TeamId};

/// One document per organisation.
///
/// `teams` maps each team id to its node. `order` lists the ids in the
/// order they were added, so roots come back in creation order; teams
/// missing from it follow in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamHierarchyDocument {
    pub organisation_id: OrganisationId,
    #[serde(default)]
    pub teams: BTreeMap<TeamId, Team>,
    #[serde(default)]
    pub order: Vec<TeamId>,
}

impl From<&TeamHierarchy> for TeamHierarchyDocument {
    fn from(hierarchy: &TeamHierarchy) -> Self {
        Self {
            organisation_id: hierarchy.organisation_id().clone(),
            teams: hierarchy
                .teams()
                .map(|team| (team.id.clone(), team.clone()))
                .collect(),
            order: hierarchy.teams().map(|team| team.id.clone()).collect(),
        }
    }
}

impl TryFrom<TeamHierarchyDocument> for TeamHierarchy {
    type Error = TeamHierarchyError;

    fn try_from(doc: TeamHierarchyDocument) -> Result<Self, Self::Error> {
        let mut violations = Vec::new();
        for (key, team) in &doc.teams {
            if key != &team.id {
                violations.push(FieldViolation::new(
                    format!("teams.{}.id", key),
                    format!("node id {} does not match its key", team.id),
                ));
            }
        }

        let mut remaining = doc.teams;
        let mut ordered = Vec::with_capacity(remaining.len());
        for (i, id) in doc.order.iter().enumerate() {
            match remaining.remove(id) {
                Some(team) => ordered.push(team),
                None => violations.push(FieldViolation::new(
                    format!("order[{}]", i),
                    format!("unknown or repeated team id {}", id),
                )),
            }
        }
        ordered.extend(remaining.into_values());

        if !violations.is_empty() {
            return Err(TeamHierarchyError::Invalid(violations));
        }
        TeamHierarchy::from_teams(doc.organisation_id, ordered)
    }
}
