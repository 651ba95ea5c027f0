//! Team hierarchy command and query handlers.

mod change_team_hierarchy;
mod get_team_hierarchy;

pub use change_team_hierarchy::{
    ChangeTeamHierarchyHandler, ChangeTeamHierarchyResult, TeamHierarchyCommand,
};
pub use get_team_hierarchy::{GetTeamHierarchyHandler, GetTeamHierarchyQuery};
