//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and event plumbing
//! that form the vocabulary of the decision-tracking domain.

mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;
pub mod validation;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{
    DecisionId, OrganisationId, ProjectId, RelationshipRecordId, StakeholderId, TeamId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use validation::FieldViolation;
