//! Decision aggregate.
//!
//! A decision is an immutable value: every operation borrows the current
//! snapshot and returns the next one (or an error, leaving the input as it
//! was). Persisting the result is the caller's job.
//!
//! # Lifecycle
//!
//! `create_empty` → content edits → `publish`. Once published the content is
//! frozen; only relationships pointing *at* the decision may still change
//! (see `relationships::link`).

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::{
    validation, DecisionId, FieldViolation, OrganisationId, ProjectId, StakeholderId,
    StateMachine, TeamId, Timestamp, ValidationError,
};

use super::{
    relationships, Cost, DecisionError, DecisionMethod, DecisionStateError, DecisionStatus,
    RelationshipTarget, RelationshipType, Relationships, Reversibility, StakeholderRole,
};

/// Maximum length for a decision title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// The Decision aggregate root.
///
/// # Invariants
///
/// - `id` never changes once assigned
/// - `driver_stakeholder_id`, when set, is in `stakeholders` as a decider
/// - `publish_date` set ⇒ `decision` non-empty and `decision_method` set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub(super) id: Option<DecisionId>,
    pub(super) organisation_id: OrganisationId,
    pub(super) team_ids: BTreeSet<TeamId>,
    pub(super) project_ids: BTreeSet<ProjectId>,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) cost: Option<Cost>,
    pub(super) reversibility: Option<Reversibility>,
    pub(super) options: Vec<String>,
    pub(super) criteria: Vec<String>,
    pub(super) decision: Option<String>,
    pub(super) decision_method: Option<DecisionMethod>,
    pub(super) stakeholders: BTreeMap<StakeholderId, StakeholderRole>,
    pub(super) driver_stakeholder_id: Option<StakeholderId>,
    pub(super) relationships: Relationships,
    pub(super) created_at: Timestamp,
    pub(super) updated_at: Option<Timestamp>,
    pub(super) publish_date: Option<Timestamp>,
}

impl Decision {
    /// Creates an empty, unsaved decision for an organisation.
    pub fn create_empty(organisation_id: OrganisationId) -> Self {
        Self {
            id: None,
            organisation_id,
            team_ids: BTreeSet::new(),
            project_ids: BTreeSet::new(),
            title: String::new(),
            description: String::new(),
            cost: None,
            reversibility: None,
            options: Vec::new(),
            criteria: Vec::new(),
            decision: None,
            decision_method: None,
            stakeholders: BTreeMap::new(),
            driver_stakeholder_id: None,
            relationships: Relationships::default(),
            created_at: Timestamp::now(),
            updated_at: None,
            publish_date: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> Option<&DecisionId> {
        self.id.as_ref()
    }

    pub fn organisation_id(&self) -> &OrganisationId {
        &self.organisation_id
    }

    pub fn team_ids(&self) -> &BTreeSet<TeamId> {
        &self.team_ids
    }

    pub fn project_ids(&self) -> &BTreeSet<ProjectId> {
        &self.project_ids
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cost(&self) -> Option<Cost> {
        self.cost
    }

    pub fn reversibility(&self) -> Option<Reversibility> {
        self.reversibility
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Returns the chosen option, if any.
    pub fn decision(&self) -> Option<&str> {
        self.decision.as_deref()
    }

    pub fn decision_method(&self) -> Option<DecisionMethod> {
        self.decision_method
    }

    pub fn stakeholders(&self) -> &BTreeMap<StakeholderId, StakeholderRole> {
        &self.stakeholders
    }

    pub fn driver_stakeholder_id(&self) -> Option<&StakeholderId> {
        self.driver_stakeholder_id.as_ref()
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> Option<&Timestamp> {
        self.updated_at.as_ref()
    }

    pub fn publish_date(&self) -> Option<&Timestamp> {
        self.publish_date.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Derives the status: published, else superseded, else in progress.
    pub fn status(&self) -> DecisionStatus {
        if self.publish_date.is_some() {
            DecisionStatus::Published
        } else if self.is_superseded() {
            DecisionStatus::Superseded
        } else {
            DecisionStatus::InProgress
        }
    }

    pub fn is_published(&self) -> bool {
        self.publish_date.is_some()
    }

    pub fn is_superseded(&self) -> bool {
        !self.relationships.get(RelationshipType::SupersededBy).is_empty()
    }

    pub fn is_blocked(&self) -> bool {
        !self.relationships.get(RelationshipType::BlockedBy).is_empty()
    }

    /// Returns the targets of one relationship type, in insertion order.
    pub fn relationships_by_type(&self, relationship_type: RelationshipType) -> &[RelationshipTarget] {
        relationships::by_type(self, relationship_type)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Assigns the id issued by persistence.
    ///
    /// # Errors
    ///
    /// - `IdAlreadyAssigned` if the decision already has an id
    pub fn with_id(&self, id: DecisionId) -> Result<Self, DecisionError> {
        if let Some(existing) = &self.id {
            return Err(DecisionError::IdAlreadyAssigned(existing.clone()));
        }
        let mut next = self.clone();
        next.id = Some(id);
        Ok(next)
    }

    /// Sets the driver and upserts them as a decider.
    pub fn set_driver(&self, stakeholder_id: StakeholderId) -> Result<Self, DecisionError> {
        self.mutate(|d| {
            d.stakeholders
                .insert(stakeholder_id.clone(), StakeholderRole::Decider);
            d.driver_stakeholder_id = Some(stakeholder_id);
            Ok(())
        })
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// - `Validation` if the title is blank or longer than `MAX_TITLE_LENGTH`
    pub fn update_title(&self, title: impl Into<String>) -> Result<Self, DecisionError> {
        let title = title.into();
        validation::require_text("title", &title, MAX_TITLE_LENGTH)?;
        self.mutate(|d| {
            d.title = title.trim().to_string();
            Ok(())
        })
    }

    /// Replaces the free-text description.
    pub fn update_content(&self, description: impl Into<String>) -> Result<Self, DecisionError> {
        let description = description.into();
        self.mutate(|d| {
            d.description = description;
            Ok(())
        })
    }

    pub fn update_cost(&self, cost: Cost) -> Result<Self, DecisionError> {
        self.mutate(|d| {
            d.cost = Some(cost);
            Ok(())
        })
    }

    pub fn update_reversibility(&self, reversibility: Reversibility) -> Result<Self, DecisionError> {
        self.mutate(|d| {
            d.reversibility = Some(reversibility);
            Ok(())
        })
    }

    /// # Errors
    ///
    /// - `Invalid` listing each blank entry as `options[i]`
    pub fn update_options(&self, options: Vec<String>) -> Result<Self, DecisionError> {
        reject_blank_entries("options", &options)?;
        self.mutate(|d| {
            d.options = options;
            Ok(())
        })
    }

    /// # Errors
    ///
    /// - `Invalid` listing each blank entry as `criteria[i]`
    pub fn update_criteria(&self, criteria: Vec<String>) -> Result<Self, DecisionError> {
        reject_blank_entries("criteria", &criteria)?;
        self.mutate(|d| {
            d.criteria = criteria;
            Ok(())
        })
    }

    /// Records the chosen option.
    ///
    /// The value is not checked against `options`.
    ///
    /// # Errors
    ///
    /// - `Validation` if the value is blank
    pub fn choose_option(&self, value: impl Into<String>) -> Result<Self, DecisionError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("decision").into());
        }
        self.mutate(|d| {
            d.decision = Some(value);
            Ok(())
        })
    }

    pub fn set_method(&self, method: DecisionMethod) -> Result<Self, DecisionError> {
        self.mutate(|d| {
            d.decision_method = Some(method);
            Ok(())
        })
    }

    pub fn set_teams(&self, team_ids: BTreeSet<TeamId>) -> Result<Self, DecisionError> {
        self.mutate(|d| {
            d.team_ids = team_ids;
            Ok(())
        })
    }

    pub fn set_projects(&self, project_ids: BTreeSet<ProjectId>) -> Result<Self, DecisionError> {
        self.mutate(|d| {
            d.project_ids = project_ids;
            Ok(())
        })
    }

    /// Links this decision to `target`, returning both updated snapshots.
    pub fn set_relationship(
        &self,
        relationship_type: RelationshipType,
        target: &Decision,
    ) -> Result<(Self, Self), DecisionError> {
        relationships::link(self, target, relationship_type)
    }

    /// Unlinks this decision from `target`, returning both updated snapshots.
    pub fn remove_relationship(
        &self,
        relationship_type: RelationshipType,
        target: &Decision,
    ) -> Result<(Self, Self), DecisionError> {
        relationships::unlink(self, target, relationship_type)
    }

    /// Publishes the decision now.
    pub fn publish(&self) -> Result<Self, DecisionError> {
        self.publish_at(Timestamp::now())
    }

    /// Publishes the decision with an explicit publish date.
    ///
    /// # Errors
    ///
    /// `State` with the first unmet precondition, checked in this order:
    /// already published, no chosen option, no method, blocked, superseded.
    pub fn publish_at(&self, at: Timestamp) -> Result<Self, DecisionError> {
        self.check_publishable()?;
        let mut next = self.clone();
        next.publish_date = Some(at);
        next.updated_at = Some(at);
        Ok(next)
    }

    /// Returns the first reason this decision cannot be published, if any.
    pub fn check_publishable(&self) -> Result<(), DecisionStateError> {
        if self.is_published() {
            return Err(DecisionStateError::AlreadyPublished);
        }
        if self.decision.as_deref().map_or(true, |d| d.trim().is_empty()) {
            return Err(DecisionStateError::NoChosenOption);
        }
        if self.decision_method.is_none() {
            return Err(DecisionStateError::NoDecisionMethod);
        }
        let blockers = self.relationships.get(RelationshipType::BlockedBy).len();
        if blockers > 0 {
            return Err(DecisionStateError::Blocked(blockers));
        }
        if self.is_superseded() {
            return Err(DecisionStateError::Superseded);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Collects every field-level violation of the aggregate's invariants.
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        let title_len = self.title.chars().count();
        if title_len > MAX_TITLE_LENGTH {
            violations.push(ValidationError::too_long("title", MAX_TITLE_LENGTH, title_len).into());
        }
        violations.extend(validation::blank_entries("options", &self.options));
        violations.extend(validation::blank_entries("criteria", &self.criteria));

        if matches!(self.decision.as_deref(), Some(d) if d.trim().is_empty()) {
            violations.push(FieldViolation::new("decision", "chosen option cannot be blank"));
        }
        if let Some(driver) = &self.driver_stakeholder_id {
            if self.stakeholders.get(driver) != Some(&StakeholderRole::Decider) {
                violations.push(FieldViolation::new(
                    "driverStakeholderId",
                    "driver must be a stakeholder with the decider role",
                ));
            }
        }
        if self.is_published() {
            if self.decision.is_none() {
                violations.push(FieldViolation::new("decision", "published without a chosen option"));
            }
            if self.decision_method.is_none() {
                violations.push(FieldViolation::new(
                    "decisionMethod",
                    "published without a decision method",
                ));
            }
        }
        for (relationship_type, targets) in self.relationships.iter() {
            if let Some(own_id) = &self.id {
                if targets.iter().any(|t| &t.target_decision_id == own_id) {
                    violations.push(FieldViolation::new(
                        format!("relationships.{}", relationship_type),
                        "decision cannot relate to itself",
                    ));
                }
            }
        }
        violations
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Clones, applies `f`, and stamps `updated_at`. Published decisions are frozen.
    pub(super) fn mutate(
        &self,
        f: impl FnOnce(&mut Decision) -> Result<(), DecisionError>,
    ) -> Result<Self, DecisionError> {
        self.ensure_mutable()?;
        let mut next = self.clone();
        f(&mut next)?;
        next.updated_at = Some(Timestamp::now());
        Ok(next)
    }

    pub(super) fn ensure_mutable(&self) -> Result<(), DecisionError> {
        if self.status().is_terminal() {
            Err(DecisionStateError::AlreadyPublished.into())
        } else {
            Ok(())
        }
    }
}

fn reject_blank_entries(field: &str, values: &[String]) -> Result<(), DecisionError> {
    let violations = validation::blank_entries(field, values);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(DecisionError::Invalid(violations))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn org(id: &str) -> OrganisationId {
        OrganisationId::new(id).unwrap()
    }

    pub fn stakeholder(id: &str) -> StakeholderId {
        StakeholderId::new(id).unwrap()
    }

    /// A saved, titled decision in `org`.
    pub fn saved(id: &str, org_id: &str) -> Decision {
        Decision::create_empty(org(org_id))
            .with_id(DecisionId::new(id).unwrap())
            .unwrap()
            .update_title(format!("Decision {}", id))
            .unwrap()
    }

    /// A saved decision that meets every publish precondition.
    pub fn ready_to_publish(id: &str, org_id: &str) -> Decision {
        saved(id, org_id)
            .choose_option("Option A")
            .unwrap()
            .set_method(DecisionMethod::Consent)
            .unwrap()
    }
}
