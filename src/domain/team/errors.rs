//! Team hierarchy error types.

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, FieldViolation, OrganisationId, TeamId, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamHierarchyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Team hierarchy is inconsistent: {}", join(.0))]
    Invalid(Vec<FieldViolation>),

    #[error("Team already exists: {0}")]
    DuplicateId(TeamId),

    #[error("Parent team not found: {0}")]
    ParentNotFound(TeamId),

    #[error("Team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("Moving team {team_id} under {parent_id} would create a cycle")]
    CycleDetected { team_id: TeamId, parent_id: TeamId },

    #[error("No team hierarchy for organisation {0}")]
    HierarchyNotFound(OrganisationId),

    #[error("Storage error: {0}")]
    Infrastructure(String),
}

fn join(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl TeamHierarchyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TeamHierarchyError::Validation(_) | TeamHierarchyError::Invalid(_) => {
                ErrorCode::ValidationFailed
            }
            TeamHierarchyError::DuplicateId(_) => ErrorCode::DuplicateId,
            TeamHierarchyError::ParentNotFound(_) => ErrorCode::ParentNotFound,
            TeamHierarchyError::TeamNotFound(_) => ErrorCode::TeamNotFound,
            TeamHierarchyError::CycleDetected { .. } => ErrorCode::CycleDetected,
            TeamHierarchyError::HierarchyNotFound(_) => ErrorCode::HierarchyNotFound,
            TeamHierarchyError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<TeamHierarchyError> for DomainError {
    fn from(err: TeamHierarchyError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

impl From<DomainError> for TeamHierarchyError {
    fn from(err: DomainError) -> Self {
        TeamHierarchyError::Infrastructure(err.to_string())
    }
}
