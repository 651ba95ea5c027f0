//! Workflow-specific error types.

use thiserror::Error;

use super::WorkflowStep;
use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The step is not part of the configured sequence.
    #[error("Step '{0}' is not part of the configured workflow")]
    InvalidStep(WorkflowStep),

    /// The sequence itself is malformed (empty or repeating a step).
    #[error("Invalid workflow sequence: {0}")]
    InvalidSequence(String),
}

impl WorkflowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::InvalidStep(_) => ErrorCode::InvalidWorkflowStep,
            WorkflowError::InvalidSequence(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<WorkflowError> for DomainError {
    fn from(err: WorkflowError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
