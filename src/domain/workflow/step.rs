//! WorkflowStep enum and the role responsible for each step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is expected to act on a workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsibleRole {
    Driver,
    Decider,
}

/// A step in the decision workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Identify,
    Stakeholders,
    Method,
    Choose,
    Publish,
}

impl WorkflowStep {
    /// Returns the role expected to complete this step.
    pub fn responsible_role(&self) -> ResponsibleRole {
        match self {
            WorkflowStep::Identify | WorkflowStep::Stakeholders | WorkflowStep::Method => {
                ResponsibleRole::Driver
            }
            WorkflowStep::Choose | WorkflowStep::Publish => ResponsibleRole::Decider,
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkflowStep::Identify => "Identify",
            WorkflowStep::Stakeholders => "Stakeholders",
            WorkflowStep::Method => "Method",
            WorkflowStep::Choose => "Choose",
            WorkflowStep::Publish => "Publish",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
