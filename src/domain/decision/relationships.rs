//! Relationship graph between decisions.
//!
//! Edges are typed and always exist as an inverse pair: when A `supersedes`
//! B, B is `superseded_by` A; when A `blocks` B, B is `blocked_by` A. Both
//! sides are computed together and returned as two new snapshots, so a
//! rejected link leaves both decisions untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Decision, DecisionError};
use crate::domain::foundation::{DecisionId, OrganisationId, Timestamp};

/// The four edge types, in two inverse pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Blocks,
    BlockedBy,
    Supersedes,
    SupersededBy,
}

impl RelationshipType {
    pub fn all() -> &'static [RelationshipType] {
        &[
            RelationshipType::Blocks,
            RelationshipType::BlockedBy,
            RelationshipType::Supersedes,
            RelationshipType::SupersededBy,
        ]
    }

    /// Returns the type recorded on the other side of the edge.
    pub fn inverse(&self) -> RelationshipType {
        match self {
            RelationshipType::Blocks => RelationshipType::BlockedBy,
            RelationshipType::BlockedBy => RelationshipType::Blocks,
            RelationshipType::Supersedes => RelationshipType::SupersededBy,
            RelationshipType::SupersededBy => RelationshipType::Supersedes,
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelationshipType::Blocks => "blocks",
            RelationshipType::BlockedBy => "blocked_by",
            RelationshipType::Supersedes => "supersedes",
            RelationshipType::SupersededBy => "superseded_by",
        };
        write!(f, "{}", s)
    }
}

/// The far end of an edge, with the title it had when linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTarget {
    pub target_decision_id: DecisionId,
    pub target_title: String,
}

impl RelationshipTarget {
    /// Points at a saved decision.
    ///
    /// # Errors
    ///
    /// - `NotPersisted` if the decision has no id yet
    pub fn of(decision: &Decision) -> Result<Self, DecisionError> {
        let id = decision.id().ok_or(DecisionError::NotPersisted)?;
        Ok(Self {
            target_decision_id: id.clone(),
            target_title: decision.title().to_string(),
        })
    }
}

/// Outgoing edges of one decision, grouped by type.
///
/// Types with no edges are not stored, so two values with the same edges
/// compare equal regardless of history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<RelationshipType, Vec<RelationshipTarget>>",
    into = "BTreeMap<RelationshipType, Vec<RelationshipTarget>>"
)]
pub struct Relationships {
    edges: BTreeMap<RelationshipType, Vec<RelationshipTarget>>,
}

impl Relationships {
    /// Returns the targets of `relationship_type` in insertion order.
    pub fn get(&self, relationship_type: RelationshipType) -> &[RelationshipTarget] {
        self.edges
            .get(&relationship_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, relationship_type: RelationshipType) -> usize {
        self.get(relationship_type).len()
    }

    pub fn contains(&self, relationship_type: RelationshipType, target: &DecisionId) -> bool {
        self.get(relationship_type)
            .iter()
            .any(|t| &t.target_decision_id == target)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates non-empty groups in type order.
    pub fn iter(&self) -> impl Iterator<Item = (RelationshipType, &[RelationshipTarget])> {
        self.edges.iter().map(|(t, v)| (*t, v.as_slice()))
    }

    /// Appends an edge unless one to the same target already exists.
    ///
    /// Returns whether anything changed.
    pub(super) fn push(&mut self, relationship_type: RelationshipType, target: RelationshipTarget) -> bool {
        if self.contains(relationship_type, &target.target_decision_id) {
            return false;
        }
        self.edges.entry(relationship_type).or_default().push(target);
        true
    }

    /// Removes the edge to `target`. Returns whether anything changed.
    pub(super) fn remove(&mut self, relationship_type: RelationshipType, target: &DecisionId) -> bool {
        let Some(targets) = self.edges.get_mut(&relationship_type) else {
            return false;
        };
        let before = targets.len();
        targets.retain(|t| &t.target_decision_id != target);
        let changed = targets.len() != before;
        if targets.is_empty() {
            self.edges.remove(&relationship_type);
        }
        changed
    }
}

impl From<BTreeMap<RelationshipType, Vec<RelationshipTarget>>> for Relationships {
    fn from(mut edges: BTreeMap<RelationshipType, Vec<RelationshipTarget>>) -> Self {
        edges.retain(|_, targets| !targets.is_empty());
        Self { edges }
    }
}

impl From<Relationships> for BTreeMap<RelationshipType, Vec<RelationshipTarget>> {
    fn from(relationships: Relationships) -> Self {
        relationships.edges
    }
}

/// Persisted edge record, one per link, stored per organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRecord {
    pub from_decision_id: DecisionId,
    pub to_decision_id: DecisionId,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    pub organisation_id: OrganisationId,
    pub created_at: Timestamp,
}

impl RelationshipRecord {
    /// Builds the record for a link that `link` accepted.
    pub fn new(
        source: &Decision,
        target: &Decision,
        relationship_type: RelationshipType,
    ) -> Result<Self, DecisionError> {
        let (from, to) = check_pair(source, target)?;
        Ok(Self {
            from_decision_id: from.clone(),
            to_decision_id: to.clone(),
            relationship_type,
            organisation_id: source.organisation_id().clone(),
            created_at: Timestamp::now(),
        })
    }
}

/// Returns the targets of one relationship type on a decision.
pub fn by_type(decision: &Decision, relationship_type: RelationshipType) -> &[RelationshipTarget] {
    decision.relationships.get(relationship_type)
}

/// Links `source` to `target` with `relationship_type` and records the inverse on `target`.
///
/// Linking the same pair and type again changes nothing.
///
/// # Errors
///
/// - `SelfRelationship` if both are the same decision
/// - `NotPersisted` if either decision has no id
/// - `CrossOrganisation` if the organisations differ
/// - `State(AlreadyPublished)` if `source` is published (a published target is fine)
pub fn link(
    source: &Decision,
    target: &Decision,
    relationship_type: RelationshipType,
) -> Result<(Decision, Decision), DecisionError> {
    check_pair(source, target)?;
    source.ensure_mutable()?;

    let forward = RelationshipTarget::of(target)?;
    let backward = RelationshipTarget::of(source)?;

    let mut next_source = source.clone();
    let mut next_target = target.clone();
    let now = Timestamp::now();
    if next_source.relationships.push(relationship_type, forward) {
        next_source.updated_at = Some(now);
    }
    if next_target
        .relationships
        .push(relationship_type.inverse(), backward)
    {
        next_target.updated_at = Some(now);
    }
    Ok((next_source, next_target))
}

/// Removes the edge and its inverse. Missing edges are a no-op.
///
/// # Errors
///
/// Same structural checks as [`link`].
pub fn unlink(
    source: &Decision,
    target: &Decision,
    relationship_type: RelationshipType,
) -> Result<(Decision, Decision), DecisionError> {
    let (source_id, target_id) = check_pair(source, target)?;
    source.ensure_mutable()?;

    let mut next_source = source.clone();
    let mut next_target = target.clone();
    let now = Timestamp::now();
    if next_source.relationships.remove(relationship_type, target_id) {
        next_source.updated_at = Some(now);
    }
    if next_target
        .relationships
        .remove(relationship_type.inverse(), source_id)
    {
        next_target.updated_at = Some(now);
    }
    Ok((next_source, next_target))
}

fn check_pair<'a>(
    source: &'a Decision,
    target: &'a Decision,
) -> Result<(&'a DecisionId, &'a DecisionId), DecisionError> {
    let (source_id, target_id) = match (source.id(), target.id()) {
        (Some(s), Some(t)) if s == t => return Err(DecisionError::SelfRelationship(s.clone())),
        (Some(s), Some(t)) => (s, t),
        _ => return Err(DecisionError::NotPersisted),
    };
    if source.organisation_id() != target.organisation_id() {
        return Err(DecisionError::CrossOrganisation {
            source_org: source.organisation_id().clone(),
            target_org: target.organisation_id().clone(),
        });
    }
    Ok((source_id, target_id))
}

#[cfg(test)]
mod tests {
    use super::super::aggregate::fixtures::*;
    use super::super::DecisionStateError;
    use super::*;
    use proptest::prelude::*;

    fn targets(decision: &Decision, relationship_type: RelationshipType) -> Vec<&str> {
        by_type(decision, relationship_type)
            .iter()
            .map(|t| t.target_decision_id.as_str())
            .collect()
    }

    #[test]
    fn inverse_pairs_are_symmetric() {
        for t in RelationshipType::all() {
            assert_eq!(t.inverse().inverse(), *t);
            assert_ne!(t.inverse(), *t);
        }
    }

    #[test]
    fn supersedes_records_superseded_by_on_target() {
        let a = saved("a", "org1");
        let b = saved("b", "org1");
        let (a, b) = link(&a, &b, RelationshipType::Supersedes).unwrap();

        assert_eq!(targets(&a, RelationshipType::Supersedes), vec!["b"]);
        assert_eq!(
            by_type(&b, RelationshipType::SupersededBy),
            &[RelationshipTarget {
                target_decision_id: DecisionId::new("a").unwrap(),
                target_title: "Decision a".to_string(),
            }]
        );
        assert!(b.is_superseded());
    }

    #[test]
    fn blocks_records_blocked_by_on_target() {
        let a = saved("a", "org1");
        let b = saved("b", "org1");
        let (a, b) = link(&a, &b, RelationshipType::Blocks).unwrap();

        assert_eq!(targets(&a, RelationshipType::Blocks), vec!["b"]);
        assert_eq!(targets(&b, RelationshipType::BlockedBy), vec!["a"]);
        assert!(b.is_blocked());
    }

    #[test]
    fn self_link_is_rejected() {
        let a = saved("a", "org1");
        let result = link(&a, &a.clone(), RelationshipType::Blocks);
        assert!(matches!(result, Err(DecisionError::SelfRelationship(_))));
    }

    #[test]
    fn cross_organisation_link_is_rejected() {
        let a = saved("a", "org1");
        let b = saved("b", "org2");
        assert!(matches!(
            link(&a, &b, RelationshipType::Supersedes),
            Err(DecisionError::CrossOrganisation { .. })
        ));
    }

    #[test]
    fn unsaved_decision_cannot_be_linked() {
        let a = saved("a", "org1");
        let draft = Decision::create_empty(org("org1"));
        assert_eq!(
            link(&a, &draft, RelationshipType::Blocks),
            Err(DecisionError::NotPersisted)
        );
    }

    #[test]
    fn link_is_idempotent() {
        let a = saved("a", "org1");
        let b = saved("b", "org1");
        let (a, b) = link(&a, &b, RelationshipType::Blocks).unwrap();
        let (a2, b2) = link(&a, &b, RelationshipType::Blocks).unwrap();

        assert_eq!(a2, a);
        assert_eq!(b2, b);
        assert_eq!(a2.relationships().count(RelationshipType::Blocks), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let a = saved("a", "org1");
        let c = saved("c", "org1");
        let b = saved("b", "org1");
        let (a, _) = link(&a, &c, RelationshipType::Blocks).unwrap();
        let (a, _) = link(&a, &b, RelationshipType::Blocks).unwrap();
        assert_eq!(targets(&a, RelationshipType::Blocks), vec!["c", "b"]);
    }

    #[test]
    fn published_target_can_still_be_superseded() {
        let old = ready_to_publish("old", "org1").publish().unwrap();
        let new = saved("new", "org1");
        let (_, old) = link(&new, &old, RelationshipType::Supersedes).unwrap();
        assert!(old.is_superseded());
        assert!(old.is_published());
    }

    #[test]
    fn published_source_cannot_link() {
        let published = ready_to_publish("p", "org1").publish().unwrap();
        let other = saved("o", "org1");
        assert_eq!(
            link(&published, &other, RelationshipType::Blocks),
            Err(DecisionError::State(DecisionStateError::AlreadyPublished))
        );
    }

    #[test]
    fn unlink_removes_both_sides() {
        let a = saved("a", "org1");
        let b = saved("b", "org1");
        let (a, b) = link(&a, &b, RelationshipType::Supersedes).unwrap();
        let (a, b) = unlink(&a, &b, RelationshipType::Supersedes).unwrap();

        assert!(a.relationships().is_empty());
        assert!(b.relationships().is_empty());
        assert!(!b.is_superseded());
    }

    #[test]
    fn unlink_missing_edge_is_noop() {
        let a = saved("a", "org1");
        let b = saved("b", "org1");
        let (a2, b2) = unlink(&a, &b, RelationshipType::Blocks).unwrap();
        assert_eq!(a2, a);
        assert_eq!(b2, b);
    }

    #[test]
    fn record_uses_wire_field_names() {
        let a = saved("a", "org1");
        let b = saved("b", "org1");
        let record = RelationshipRecord::new(&a, &b, RelationshipType::Blocks).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["fromDecisionId"], "a");
        assert_eq!(json["toDecisionId"], "b");
        assert_eq!(json["type"], "blocks");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn empty_groups_are_dropped_on_deserialize() {
        let rels: Relationships = serde_json::from_str(r#"{"blocks": [], "supersedes": []}"#).unwrap();
        assert!(rels.is_empty());
        assert_eq!(rels, Relationships::default());
    }

    fn arb_type() -> impl Strategy<Value = RelationshipType> {
        prop::sample::select(RelationshipType::all().to_vec())
    }

    proptest! {
        #[test]
        fn link_records_inverse_on_target(t in arb_type()) {
            let a = saved("a", "org1");
            let b = saved("b", "org1");
            let (a2, b2) = link(&a, &b, t).unwrap();

            prop_assert!(a2.relationships().contains(t, &DecisionId::new("b").unwrap()));
            prop_assert!(b2.relationships().contains(t.inverse(), &DecisionId::new("a").unwrap()));
        }

        #[test]
        fn self_link_always_fails(t in arb_type()) {
            let a = saved("a", "org1");
            let result = link(&a, &a, t);
            prop_assert!(matches!(result, Err(DecisionError::SelfRelationship(_))));
        }
    }
}
