//! Decision workflow: the ordered steps a decision moves through and the
//! adjacency rule for moving between them.

mod errors;
mod sequence;
mod step;

pub use errors::WorkflowError;
pub use sequence::WorkflowSequence;
pub use step::{ResponsibleRole, WorkflowStep};
