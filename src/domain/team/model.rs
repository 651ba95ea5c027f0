//! Team value types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::TeamId;

/// Maximum length for a team name.
pub const MAX_TEAM_NAME_LENGTH: usize = 100;

/// A node in a team hierarchy.
///
/// `children` lists the teams whose `parent_id` is this team, in the order
/// they were attached. It is maintained by `TeamHierarchy` and never set
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<TeamId>,
    #[serde(default)]
    pub children: Vec<TeamId>,
}

impl Team {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Input for `TeamHierarchy::add_team`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeam {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<TeamId>,
}

impl NewTeam {
    pub fn root(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn child_of(parent_id: TeamId, id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: Some(parent_id),
        }
    }
}

/// Partial update for `TeamHierarchy::update_team`.
///
/// `parent_id: Some(None)` makes the team a root; `None` leaves the parent
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub parent_id: Option<Option<TeamId>>,
}

impl TeamPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent_id: None,
        }
    }

    pub fn reparent(parent_id: Option<TeamId>) -> Self {
        Self {
            name: None,
            parent_id: Some(parent_id),
        }
    }
}
