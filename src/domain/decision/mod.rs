//! Decision domain module.
//!
//! The `Decision` aggregate with its stakeholder roles and its typed
//! relationships to other decisions of the same organisation.
//!
//! # Events
//!
//! - `DecisionCreated` - Published when a decision is first saved
//! - `DecisionPublished` - Published when a decision is published
//! - `DecisionsLinked` / `DecisionsUnlinked` - Relationship changes
//! - `StakeholderAssigned` - Published when a stakeholder's role is set

mod aggregate;
mod document;
mod errors;
mod events;
pub mod relationships;
pub mod roles;
mod values;

pub use aggregate::{Decision, MAX_TITLE_LENGTH};
pub use document::DecisionDocument;
pub use errors::{DecisionError, DecisionStateError};
pub use events::{
    DecisionCreated, DecisionPublished, DecisionsLinked, DecisionsUnlinked, StakeholderAssigned,
};
pub use relationships::{
    RelationshipRecord, RelationshipTarget, RelationshipType, Relationships,
};
pub use roles::{roles_of, RoleAssignment, StakeholderRole};
pub use values::{Cost, DecisionMethod, DecisionStatus, Reversibility};
