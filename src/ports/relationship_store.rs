//! Relationship store port.
//!
//! Every link between two decisions is also kept as a standalone edge
//! record, stored per organisation, so either side can list its edges
//! without loading the other decision.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::domain::decision::{RelationshipRecord, RelationshipType};
use crate::domain::foundation::{DecisionId, DomainError, OrganisationId, RelationshipRecordId};

/// An edge record together with its store-issued id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRelationship {
    pub id: RelationshipRecordId,
    #[serde(flatten)]
    pub record: RelationshipRecord,
}

/// Edge records touching one decision, one item per change.
pub type RelationshipStream = BoxStream<'static, Vec<StoredRelationship>>;

#[async_trait]
pub trait RelationshipStore: Send + Sync {
    /// Streams the records where `decision_id` is either end, starting with
    /// the current set. Dropping the stream unsubscribes.
    async fn subscribe(
        &self,
        decision_id: &DecisionId,
        organisation_id: &OrganisationId,
    ) -> Result<RelationshipStream, DomainError>;

    /// Stores a record and returns its id.
    async fn add(&self, record: &RelationshipRecord) -> Result<RelationshipRecordId, DomainError>;

    /// Deletes a record. Unknown ids are a no-op.
    async fn remove(
        &self,
        record_id: &RelationshipRecordId,
        organisation_id: &OrganisationId,
    ) -> Result<(), DomainError>;

    /// Finds the record for one directed, typed edge.
    async fn find(
        &self,
        from: &DecisionId,
        to: &DecisionId,
        relationship_type: RelationshipType,
        organisation_id: &OrganisationId,
    ) -> Result<Option<RelationshipRecordId>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn RelationshipStore) {}
    }
}
