//! Value enums carried by a decision.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Rough cost of the decision's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cost {
    Low,
    Medium,
    High,
}

/// How hard the decision is to undo, in increasing order of permanence.
///
/// A hat is taken off in a second, a haircut grows back, a tattoo stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reversibility {
    Hat,
    Haircut,
    Tattoo,
}

/// How the final option gets chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionMethod {
    AccountableIndividual,
    Consent,
}

impl fmt::Display for DecisionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionMethod::AccountableIndividual => "accountable_individual",
            DecisionMethod::Consent => "consent",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle status of a decision, derived from its fields.
///
/// `Superseded` is a label rather than a stored state: it appears while a
/// `superseded_by` edge exists and disappears if that edge is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    InProgress,
    Superseded,
    Published,
}

impl StateMachine for DecisionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DecisionStatus::*;
        matches!(
            (self, target),
            (InProgress, Published) | (InProgress, Superseded) | (Superseded, InProgress)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DecisionStatus::*;
        match self {
            InProgress => vec![Published, Superseded],
            Superseded => vec![InProgress],
            Published => vec![],
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionStatus::InProgress => "in_progress",
            DecisionStatus::Superseded => "superseded",
            DecisionStatus::Published => "published",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversibility_orders_by_permanence() {
        assert!(Reversibility::Hat < Reversibility::Haircut);
        assert!(Reversibility::Haircut < Reversibility::Tattoo);
    }

    #[test]
    fn decision_method_uses_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&DecisionMethod::AccountableIndividual).unwrap(),
            "\"accountable_individual\""
        );
        let method: DecisionMethod = serde_json::from_str("\"consent\"").unwrap();
        assert_eq!(method, DecisionMethod::Consent);
    }

    #[test]
    fn published_is_terminal() {
        assert!(DecisionStatus::Published.is_terminal());
        assert!(!DecisionStatus::InProgress.is_terminal());
    }

    #[test]
    fn there_is_no_unpublish() {
        assert!(!DecisionStatus::Published.can_transition_to(&DecisionStatus::InProgress));
        assert!(DecisionStatus::Published
            .transition_to(DecisionStatus::InProgress)
            .is_err());
    }

    #[test]
    fn superseded_cannot_publish_directly() {
        assert!(!DecisionStatus::Superseded.can_transition_to(&DecisionStatus::Published));
    }

    #[test]
    fn status_display_matches_wire_names() {
        assert_eq!(DecisionStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            serde_json::to_string(&DecisionStatus::Published).unwrap(),
            "\"published\""
        );
    }
}
