//! Decision workflow configuration

use serde::Deserialize;

use crate::domain::workflow::WorkflowSequence;

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Whether the "Stakeholders" step follows "Identify".
    #[serde(default = "default_include_stakeholders_step")]
    pub include_stakeholders_step: bool,
}

impl WorkflowConfig {
    /// Builds the step sequence this configuration selects.
    pub fn sequence(&self) -> WorkflowSequence {
        WorkflowSequence::with_stakeholders_step(self.include_stakeholders_step)
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            include_stakeholders_step: default_include_stakeholders_step(),
        }
    }
}

fn default_include_stakeholders_step() -> bool {
    true
}
