//! Persisted shape of a decision.
//!
//! Stores keep decisions as camelCase JSON documents. Reading one back goes
//! through `TryFrom`, which runs `Decision::validate` so a hand-edited or
//! stale document cannot produce an aggregate that breaks its invariants.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{
    Cost, Decision, DecisionError, DecisionMethod, Relationships, Reversibility, StakeholderRole,
};
use crate::domain::foundation::{
    DecisionId, OrganisationId, ProjectId, StakeholderId, TeamId, Timestamp,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DecisionId>,
    pub organisation_id: OrganisationId,
    #[serde(default)]
    pub team_ids: BTreeSet<TeamId>,
    #[serde(default)]
    pub project_ids: BTreeSet<ProjectId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: Option<Cost>,
    #[serde(default)]
    pub reversibility: Option<Reversibility>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub criteria: Vec<String>,
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub decision_method: Option<DecisionMethod>,
    /// Stakeholder id to role, e.g. `{"alice": "decider"}`.
    #[serde(default)]
    pub stakeholders: BTreeMap<StakeholderId, StakeholderRole>,
    #[serde(default)]
    pub driver_stakeholder_id: Option<StakeholderId>,
    #[serde(default)]
    pub relationships: Relationships,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub publish_date: Option<Timestamp>,
}

impl From<&Decision> for DecisionDocument {
    fn from(d: &Decision) -> Self {
        Self {
            id: d.id.clone(),
            organisation_id: d.organisation_id.clone(),
            team_ids: d.team_ids.clone(),
            project_ids: d.project_ids.clone(),
            title: d.title.clone(),
            description: d.description.clone(),
            cost: d.cost,
            reversibility: d.reversibility,
            options: d.options.clone(),
            criteria: d.criteria.clone(),
            decision: d.decision.clone(),
            decision_method: d.decision_method,
            stakeholders: d.stakeholders.clone(),
            driver_stakeholder_id: d.driver_stakeholder_id.clone(),
            relationships: d.relationships.clone(),
            created_at: d.created_at,
            updated_at: d.updated_at,
            publish_date: d.publish_date,
        }
    }
}

impl TryFrom<DecisionDocument> for Decision {
    type Error = DecisionError;

    /// Rebuilds the aggregate, failing with `Invalid` listing every violation.
    fn try_from(doc: DecisionDocument) -> Result<Self, Self::Error> {
        let decision = Decision {
            id: doc.id,
            organisation_id: doc.organisation_id,
            team_ids: doc.team_ids,
            project_ids: doc.project_ids,
            title: doc.title,
            description: doc.description,
            cost: doc.cost,
            reversibility: doc.reversibility,
            options: doc.options,
            criteria: doc.criteria,
            decision: doc.decision,
            decision_method: doc.decision_method,
            stakeholders: doc.stakeholders,
            driver_stakeholder_id: doc.driver_stakeholder_id,
            relationships: doc.relationships,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
            publish_date: doc.publish_date,
        };

        let violations = decision.validate();
        if violations.is_empty() {
            Ok(decision)
        } else {
            Err(DecisionError::Invalid(violations))
        }
    }
}
