//! Team hierarchy domain module.
//!
//! Each organisation owns one `TeamHierarchy`, a forest of named teams.
//! Decisions refer to teams by id only.

mod document;
mod errors;
mod events;
mod hierarchy;
mod model;

pub use document::TeamHierarchyDocument;
pub use errors::TeamHierarchyError;
pub use events::{TeamChange, TeamHierarchyChanged};
pub use hierarchy::TeamHierarchy;
pub use model::{NewTeam, Team, TeamPatch, MAX_TEAM_NAME_LENGTH};
