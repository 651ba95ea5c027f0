//! Stakeholder role assignment on a decision.
//!
//! Each stakeholder holds at most one role; assigning again replaces it.
//! Stakeholder ids are not resolved here; profile lookups belong to the
//! `StakeholderDirectory` port.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Decision, DecisionError};
use crate::domain::foundation::StakeholderId;

/// The part a stakeholder plays in a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderRole {
    /// Has authority to select the final option.
    Decider,
    /// Consulted before the decision is made.
    #[serde(alias = "consulted")]
    Advisor,
    /// Informed once the decision is made.
    #[serde(alias = "informed")]
    Observer,
}

impl StakeholderRole {
    pub fn all() -> &'static [StakeholderRole] {
        &[
            StakeholderRole::Decider,
            StakeholderRole::Advisor,
            StakeholderRole::Observer,
        ]
    }
}

impl fmt::Display for StakeholderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StakeholderRole::Decider => "decider",
            StakeholderRole::Advisor => "advisor",
            StakeholderRole::Observer => "observer",
        };
        write!(f, "{}", s)
    }
}

/// One stakeholder and their role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub stakeholder_id: StakeholderId,
    pub role: StakeholderRole,
}

/// Lists every assignment on a decision, ordered by stakeholder id.
pub fn roles_of(decision: &Decision) -> Vec<RoleAssignment> {
    decision
        .stakeholders
        .iter()
        .map(|(stakeholder_id, role)| RoleAssignment {
            stakeholder_id: stakeholder_id.clone(),
            role: *role,
        })
        .collect()
}

impl Decision {
    /// Gives a stakeholder a role, replacing any role they already hold.
    ///
    /// # Errors
    ///
    /// - `State(AlreadyPublished)` if the decision is published
    /// - `DriverMustBeDecider` if the driver would lose the decider role
    pub fn assign(
        &self,
        stakeholder_id: StakeholderId,
        role: StakeholderRole,
    ) -> Result<Self, DecisionError> {
        self.mutate(|d| {
            if d.driver_stakeholder_id.as_ref() == Some(&stakeholder_id)
                && role != StakeholderRole::Decider
            {
                return Err(DecisionError::DriverMustBeDecider);
            }
            d.stakeholders.insert(stakeholder_id, role);
            Ok(())
        })
    }

    /// Removes a stakeholder. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// - `State(AlreadyPublished)` if the decision is published
    /// - `DriverMustBeDecider` when removing the driver
    pub fn unassign(&self, stakeholder_id: &StakeholderId) -> Result<Self, DecisionError> {
        self.mutate(|d| {
            if d.driver_stakeholder_id.as_ref() == Some(stakeholder_id) {
                return Err(DecisionError::DriverMustBeDecider);
            }
            d.stakeholders.remove(stakeholder_id);
            Ok(())
        })
    }

    /// Returns the stakeholders holding `role`, ordered by id.
    pub fn stakeholders_with_role(&self, role: StakeholderRole) -> Vec<&StakeholderId> {
        self.stakeholders
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the role a stakeholder holds, if any.
    pub fn role_of(&self, stakeholder_id: &StakeholderId) -> Option<StakeholderRole> {
        self.stakeholders.get(stakeholder_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::super::aggregate::fixtures::*;
    use super::*;

    #[test]
    fn assign_inserts_new_stakeholder() {
        let d = saved("d1", "org1")
            .assign(stakeholder("bob"), StakeholderRole::Advisor)
            .unwrap();
        assert_eq!(d.role_of(&stakeholder("bob")), Some(StakeholderRole::Advisor));
    }

    #[test]
    fn assign_replaces_existing_role() {
        let d = saved("d1", "org1")
            .assign(stakeholder("bob"), StakeholderRole::Advisor)
            .unwrap()
            .assign(stakeholder("bob"), StakeholderRole::Observer)
            .unwrap();

        assert_eq!(d.stakeholders().len(), 1);
        assert_eq!(d.role_of(&stakeholder("bob")), Some(StakeholderRole::Observer));
    }

    #[test]
    fn driver_cannot_be_demoted_or_removed() {
        let d = saved("d1", "org1").set_driver(stakeholder("alice")).unwrap();
        assert_eq!(
            d.assign(stakeholder("alice"), StakeholderRole::Observer),
            Err(DecisionError::DriverMustBeDecider)
        );
        assert_eq!(
            d.unassign(&stakeholder("alice")),
            Err(DecisionError::DriverMustBeDecider)
        );
    }

    #[test]
    fn unassign_unknown_stakeholder_is_noop() {
        let d = saved("d1", "org1")
            .assign(stakeholder("bob"), StakeholderRole::Advisor)
            .unwrap();
        let after = d.unassign(&stakeholder("nobody")).unwrap();
        assert_eq!(after.stakeholders(), d.stakeholders());
    }

    #[test]
    fn roles_of_is_ordered_by_stakeholder_id() {
        let d = saved("d1", "org1")
            .assign(stakeholder("carol"), StakeholderRole::Observer)
            .unwrap()
            .assign(stakeholder("alice"), StakeholderRole::Decider)
            .unwrap()
            .assign(stakeholder("bob"), StakeholderRole::Advisor)
            .unwrap();

        let assignments = roles_of(&d);
        let ids: Vec<&str> = assignments
            .iter()
            .map(|a| a.stakeholder_id.as_str())
            .collect();
        assert_eq!(ids, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn stakeholders_with_role_filters() {
        let d = saved("d1", "org1")
            .assign(stakeholder("a"), StakeholderRole::Advisor)
            .unwrap()
            .assign(stakeholder("b"), StakeholderRole::Decider)
            .unwrap()
            .assign(stakeholder("c"), StakeholderRole::Advisor)
            .unwrap();

        let advisors = d.stakeholders_with_role(StakeholderRole::Advisor);
        assert_eq!(advisors, vec![&stakeholder("a"), &stakeholder("c")]);
    }

    #[test]
    fn legacy_role_names_deserialize() {
        let role: StakeholderRole = serde_json::from_str("\"consulted\"").unwrap();
        assert_eq!(role, StakeholderRole::Advisor);
        let role: StakeholderRole = serde_json::from_str("\"informed\"").unwrap();
        assert_eq!(role, StakeholderRole::Observer);
    }
}
