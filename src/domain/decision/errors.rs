//! Decision-specific error types.

use thiserror::Error;

use super::RelationshipType;
use crate::domain::foundation::{
    DecisionId, DomainError, ErrorCode, FieldViolation, OrganisationId, ValidationError,
};

/// Why a decision cannot be published (or mutated after publishing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecisionStateError {
    #[error("Decision is already published")]
    AlreadyPublished,

    #[error("No option has been chosen")]
    NoChosenOption,

    #[error("No decision method has been set")]
    NoDecisionMethod,

    #[error("Decision is blocked by {0} other decision(s)")]
    Blocked(usize),

    #[error("Decision has been superseded")]
    Superseded,
}

/// Errors raised by decision operations and decision handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Decision is invalid: {}", join_violations(.0))]
    Invalid(Vec<FieldViolation>),

    #[error("Illegal decision state: {0}")]
    State(#[from] DecisionStateError),

    #[error("A decision cannot relate to itself ({0})")]
    SelfRelationship(DecisionId),

    #[error("Decisions belong to different organisations ({source_org} vs {target_org})")]
    CrossOrganisation {
        source_org: OrganisationId,
        target_org: OrganisationId,
    },

    #[error("Decision has not been saved yet and has no id")]
    NotPersisted,

    #[error("Decision already has id {0}")]
    IdAlreadyAssigned(DecisionId),

    #[error("The driver must keep the decider role")]
    DriverMustBeDecider,

    #[error("At most {limit} '{relationship_type}' relationships are allowed")]
    TooManyRelationships {
        relationship_type: RelationshipType,
        limit: usize,
    },

    #[error("Decision not found: {0}")]
    NotFound(DecisionId),

    #[error("Storage error: {0}")]
    Infrastructure(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl DecisionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DecisionError::Validation(_) | DecisionError::Invalid(_) => ErrorCode::ValidationFailed,
            DecisionError::State(DecisionStateError::AlreadyPublished) => {
                ErrorCode::DecisionPublished
            }
            DecisionError::State(_) => ErrorCode::InvalidStateTransition,
            DecisionError::SelfRelationship(_) => ErrorCode::SelfRelationship,
            DecisionError::CrossOrganisation { .. } => ErrorCode::CrossOrganisation,
            DecisionError::NotPersisted => ErrorCode::DecisionNotFound,
            DecisionError::IdAlreadyAssigned(_) => ErrorCode::IdAlreadyAssigned,
            DecisionError::DriverMustBeDecider => ErrorCode::ValidationFailed,
            DecisionError::TooManyRelationships { .. } => ErrorCode::RelationshipLimitExceeded,
            DecisionError::NotFound(_) => ErrorCode::DecisionNotFound,
            DecisionError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    /// True for failures that come from the decision's lifecycle state.
    pub fn is_state_error(&self) -> bool {
        matches!(self, DecisionError::State(_))
    }
}

impl From<DecisionError> for DomainError {
    fn from(err: DecisionError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

impl From<DomainError> for DecisionError {
    fn from(err: DomainError) -> Self {
        DecisionError::Infrastructure(err.to_string())
    }
}
