//! WorkflowSequence - the injected ordering of decision workflow steps.
//!
//! Two orderings are in use:
//!
//! 1. Identify → 2. Stakeholders → 3. Method → 4. Choose → 5. Publish
//!
//! and the same sequence without the Stakeholders step for organisations
//! that do not track stakeholders explicitly.
//!
//! Moving between steps is only valid between neighbours. The sequence is a
//! pure lookup: it does not gate mutations on a decision, callers consult it
//! to drive navigation.

use serde::{Deserialize, Serialize};

use super::{WorkflowError, WorkflowStep};

/// An ordered, duplicate-free list of workflow steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WorkflowStep>", into = "Vec<WorkflowStep>")]
pub struct WorkflowSequence {
    steps: Vec<WorkflowStep>,
}

impl WorkflowSequence {
    /// The five-step ordering.
    pub const STANDARD: [WorkflowStep; 5] = [
        WorkflowStep::Identify,
        WorkflowStep::Stakeholders,
        WorkflowStep::Method,
        WorkflowStep::Choose,
        WorkflowStep::Publish,
    ];

    /// The four-step ordering without the Stakeholders step.
    pub const WITHOUT_STAKEHOLDERS: [WorkflowStep; 4] = [
        WorkflowStep::Identify,
        WorkflowStep::Method,
        WorkflowStep::Choose,
        WorkflowStep::Publish,
    ];

    /// Builds a sequence from an explicit ordering.
    ///
    /// # Errors
    ///
    /// - `InvalidSequence` if `steps` is empty or repeats a step
    pub fn new(steps: Vec<WorkflowStep>) -> Result<Self, WorkflowError> {
        if steps.is_empty() {
            return Err(WorkflowError::InvalidSequence(
                "sequence must contain at least one step".to_string(),
            ));
        }
        for (i, step) in steps.iter().enumerate() {
            if steps[..i].contains(step) {
                return Err(WorkflowError::InvalidSequence(format!(
                    "step '{}' appears more than once",
                    step
                )));
            }
        }
        Ok(Self { steps })
    }

    /// Returns the five-step sequence.
    pub fn standard() -> Self {
        Self {
            steps: Self::STANDARD.to_vec(),
        }
    }

    /// Returns the four-step sequence.
    pub fn without_stakeholders() -> Self {
        Self {
            steps: Self::WITHOUT_STAKEHOLDERS.to_vec(),
        }
    }

    /// Picks one of the two built-in orderings.
    pub fn with_stakeholders_step(include: bool) -> Self {
        if include {
            Self::standard()
        } else {
            Self::without_stakeholders()
        }
    }

    /// Returns the steps in order.
    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, step: WorkflowStep) -> bool {
        self.steps.contains(&step)
    }

    /// Returns the first step.
    pub fn first(&self) -> WorkflowStep {
        // Non-empty: `new` (and `TryFrom`, which calls it) rejects an empty
        // list, and the built-in orderings are non-empty constants.
        self.steps[0]
    }

    /// Returns the last step.
    pub fn last(&self) -> WorkflowStep {
        // Non-empty, see `first`.
        self.steps[self.steps.len() - 1]
    }

    /// Returns the 0-based position of a step.
    ///
    /// # Errors
    ///
    /// - `InvalidStep` if the step is not part of this sequence
    pub fn step_index(&self, step: WorkflowStep) -> Result<usize, WorkflowError> {
        self.steps
            .iter()
            .position(|&s| s == step)
            .ok_or(WorkflowError::InvalidStep(step))
    }

    /// Returns the step after `step`, or `None` at the end (or if absent).
    pub fn next(&self, step: WorkflowStep) -> Option<WorkflowStep> {
        let idx = self.step_index(step).ok()?;
        self.steps.get(idx + 1).copied()
    }

    /// Returns the step before `step`, or `None` at the start (or if absent).
    pub fn previous(&self, step: WorkflowStep) -> Option<WorkflowStep> {
        let idx = self.step_index(step).ok()?;
        idx.checked_sub(1).and_then(|i| self.steps.get(i)).copied()
    }

    /// True iff both steps are in the sequence and are direct neighbours.
    pub fn is_valid_transition(&self, from: WorkflowStep, to: WorkflowStep) -> bool {
        match (self.step_index(from), self.step_index(to)) {
            (Ok(a), Ok(b)) => a.abs_diff(b) == 1,
            _ => false,
        }
    }
}

impl Default for WorkflowSequence {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<WorkflowStep>> for WorkflowSequence {
    type Error = WorkflowError;

    fn try_from(steps: Vec<WorkflowStep>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<WorkflowSequence> for Vec<WorkflowStep> {
    fn from(sequence: WorkflowSequence) -> Self {
        sequence.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn standard_has_five_steps_in_order() {
        let seq = WorkflowSequence::standard();
        assert_eq!(seq.steps(), &WorkflowSequence::STANDARD);
        assert_eq!(seq.first(), WorkflowStep::Identify);
        assert_eq!(seq.last(), WorkflowStep::Publish);
    }

    #[test]
    fn step_index_returns_positions() {
        let seq = WorkflowSequence::standard();
        assert_eq!(seq.step_index(WorkflowStep::Identify), Ok(0));
        assert_eq!(seq.step_index(WorkflowStep::Choose), Ok(3));
    }

    #[test]
    fn step_index_fails_for_step_outside_sequence() {
        let seq = WorkflowSequence::without_stakeholders();
        assert_eq!(
            seq.step_index(WorkflowStep::Stakeholders),
            Err(WorkflowError::InvalidStep(WorkflowStep::Stakeholders))
        );
    }

    #[test]
    fn four_step_variant_skips_stakeholders() {
        let seq = WorkflowSequence::without_stakeholders();
        assert_eq!(seq.next(WorkflowStep::Identify), Some(WorkflowStep::Method));
        assert_eq!(seq.previous(WorkflowStep::Method), Some(WorkflowStep::Identify));
        assert!(seq.is_valid_transition(WorkflowStep::Identify, WorkflowStep::Method));
    }

    #[test]
    fn boundaries_have_no_neighbour() {
        let seq = WorkflowSequence::standard();
        assert_eq!(seq.previous(WorkflowStep::Identify), None);
        assert_eq!(seq.next(WorkflowStep::Publish), None);
    }

    #[test]
    fn skipping_a_step_is_rejected_both_ways() {
        let seq = WorkflowSequence::standard();
        assert!(!seq.is_valid_transition(WorkflowStep::Identify, WorkflowStep::Method));
        assert!(!seq.is_valid_transition(WorkflowStep::Publish, WorkflowStep::Method));
        assert!(seq.is_valid_transition(WorkflowStep::Choose, WorkflowStep::Method));
    }

    #[test]
    fn transition_involving_unknown_step_is_invalid() {
        let seq = WorkflowSequence::without_stakeholders();
        assert!(!seq.is_valid_transition(WorkflowStep::Identify, WorkflowStep::Stakeholders));
    }

    #[test]
    fn new_rejects_empty_and_duplicate_sequences() {
        assert!(WorkflowSequence::new(vec![]).is_err());
        assert!(WorkflowSequence::new(vec![WorkflowStep::Identify, WorkflowStep::Identify]).is_err());
    }

    #[test]
    fn single_step_sequence_is_its_own_first_and_last() {
        let seq = WorkflowSequence::new(vec![WorkflowStep::Choose]).unwrap();
        assert_eq!(seq.first(), WorkflowStep::Choose);
        assert_eq!(seq.last(), WorkflowStep::Choose);
        assert!(!seq.is_empty());

        let empty: Result<WorkflowSequence, _> = serde_json::from_str("[]");
        assert!(empty.is_err());
    }

    #[test]
    fn deserialization_validates_sequence() {
        let seq: WorkflowSequence =
            serde_json::from_str(r#"["identify","choose","publish"]"#).unwrap();
        assert_eq!(seq.len(), 3);
        assert!(serde_json::from_str::<WorkflowSequence>(r#"["choose","choose"]"#).is_err());
    }

    fn any_sequence() -> impl Strategy<Value = WorkflowSequence> {
        prop::bool::ANY.prop_map(WorkflowSequence::with_stakeholders_step)
    }

    proptest! {
        #[test]
        fn no_step_transitions_to_itself(seq in any_sequence(), i in 0usize..5) {
            let step = WorkflowSequence::STANDARD[i];
            prop_assert!(!seq.is_valid_transition(step, step));
        }

        #[test]
        fn every_non_terminal_step_may_advance(seq in any_sequence()) {
            for &step in seq.steps() {
                if let Some(next) = seq.next(step) {
                    prop_assert!(seq.is_valid_transition(step, next));
                    prop_assert!(seq.is_valid_transition(next, step));
                    prop_assert_eq!(seq.previous(next), Some(step));
                }
            }
        }
    }
}
