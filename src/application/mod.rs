//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AssignStakeholderCommand, AssignStakeholderHandler, ChangeTeamHierarchyHandler,
    CreateDecisionCommand, CreateDecisionHandler, GetDecisionRolesHandler,
    GetTeamHierarchyHandler, LinkDecisionsCommand, LinkDecisionsHandler, PublishDecisionCommand,
    PublishDecisionHandler, TeamHierarchyCommand, UnassignStakeholderHandler,
    UnlinkDecisionsCommand, UnlinkDecisionsHandler, UpdateDecisionCommand, UpdateDecisionHandler,
};
