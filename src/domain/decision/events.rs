//! Decision domain events.
//!
//! - `DecisionCreated` - New decision saved for the first time
//! - `DecisionPublished` - Decision frozen with a publish date
//! - `DecisionsLinked` - Relationship added between two decisions
//! - `DecisionsUnlinked` - Relationship removed
//! - `StakeholderAssigned` - Stakeholder role set on a decision

use serde::{Deserialize, Serialize};

use super::{DecisionMethod, RelationshipType, StakeholderRole};
use crate::domain::foundation::{
    domain_event, DecisionId, EventId, OrganisationId, StakeholderId, Timestamp,
};

// ════════════════════════════════════════════════════════════════════════════
// DecisionCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a decision is first persisted and receives its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionCreated {
    pub event_id: EventId,
    pub decision_id: DecisionId,
    pub organisation_id: OrganisationId,
    pub title: String,
    pub driver_stakeholder_id: Option<StakeholderId>,
    pub created_at: Timestamp,
}

domain_event!(
    DecisionCreated,
    event_type = "decision.created",
    aggregate_id = decision_id,
    aggregate_type = "Decision",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// DecisionPublished
// ════════════════════════════════════════════════════════════════════════════

/// Published when a decision is published.
///
/// Carries the chosen option and method so consumers need not reload it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPublished {
    pub event_id: EventId,
    pub decision_id: DecisionId,
    pub organisation_id: OrganisationId,
    pub decision: String,
    pub decision_method: DecisionMethod,
    pub published_at: Timestamp,
}

domain_event!(
    DecisionPublished,
    event_type = "decision.published",
    aggregate_id = decision_id,
    aggregate_type = "Decision",
    occurred_at = published_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// DecisionsLinked / DecisionsUnlinked
// ════════════════════════════════════════════════════════════════════════════

/// Published when `source` gains an edge of `relationship_type` to `target`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionsLinked {
    pub event_id: EventId,
    pub source_decision_id: DecisionId,
    pub target_decision_id: DecisionId,
    pub relationship_type: RelationshipType,
    pub linked_at: Timestamp,
}

domain_event!(
    DecisionsLinked,
    event_type = "decision.linked",
    aggregate_id = source_decision_id,
    aggregate_type = "Decision",
    occurred_at = linked_at,
    event_id = event_id
);

/// Published when an edge and its inverse are removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionsUnlinked {
    pub event_id: EventId,
    pub source_decision_id: DecisionId,
    pub target_decision_id: DecisionId,
    pub relationship_type: RelationshipType,
    pub unlinked_at: Timestamp,
}

domain_event!(
    DecisionsUnlinked,
    event_type = "decision.unlinked",
    aggregate_id = source_decision_id,
    aggregate_type = "Decision",
    occurred_at = unlinked_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// StakeholderAssigned
// ════════════════════════════════════════════════════════════════════════════

/// Published when a stakeholder's role on a decision is set or changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeholderAssigned {
    pub event_id: EventId,
    pub decision_id: DecisionId,
    pub stakeholder_id: StakeholderId,
    pub role: StakeholderRole,
    /// Role held before this assignment, if any.
    pub previous_role: Option<StakeholderRole>,
    pub assigned_at: Timestamp,
}

domain_event!(
    StakeholderAssigned,
    event_type = "decision.stakeholder_assigned",
    aggregate_id = decision_id,
    aggregate_type = "Decision",
    occurred_at = assigned_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, EventEnvelope};

    #[test]
    fn linked_event_wraps_into_envelope() {
        let event = DecisionsLinked {
            event_id: EventId::from_string("evt-1"),
            source_decision_id: DecisionId::new("a").unwrap(),
            target_decision_id: DecisionId::new("b").unwrap(),
            relationship_type: RelationshipType::Supersedes,
            linked_at: Timestamp::from_unix_secs(1_700_000_000).unwrap(),
        };

        assert_eq!(event.aggregate_id(), "a");
        let envelope = EventEnvelope::from_event(&event).unwrap();
        assert_eq!(envelope.event_type, "decision.linked");
        assert_eq!(envelope.aggregate_type, "Decision");
        assert_eq!(envelope.payload["relationship_type"], "supersedes");
    }

    #[test]
    fn published_event_round_trips_through_payload() {
        let event = DecisionPublished {
            event_id: EventId::new(),
            decision_id: DecisionId::new("d1").unwrap(),
            organisation_id: OrganisationId::new("org1").unwrap(),
            decision: "Option A".to_string(),
            decision_method: DecisionMethod::Consent,
            published_at: Timestamp::now(),
        };

        let envelope = EventEnvelope::from_event(&event).unwrap();
        let restored: DecisionPublished = envelope.payload_as().unwrap();
        assert_eq!(restored.decision, "Option A");
        assert_eq!(restored.decision_method, DecisionMethod::Consent);
    }
}
