//! In-memory RelationshipStore.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use super::{change_channel, watch};
use crate::domain::decision::{RelationshipRecord, RelationshipType};
use crate::domain::foundation::{DecisionId, DomainError, OrganisationId, RelationshipRecordId};
use crate::ports::{RelationshipStore, RelationshipStream, StoredRelationship};

type Records = Arc<RwLock<HashMap<OrganisationId, Vec<StoredRelationship>>>>;

/// Edge records grouped by organisation, in insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryRelationshipStore {
    records: Records,
    changes: broadcast::Sender<()>,
}

impl InMemoryRelationshipStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            changes: change_channel(),
        }
    }

    /// All records of an organisation (for tests).
    pub async fn records_for(&self, organisation_id: &OrganisationId) -> Vec<StoredRelationship> {
        self.records
            .read()
            .await
            .get(organisation_id)
            .cloned()
            .unwrap_or_default()
    }

    fn notify(&self) {
        let _ = self.changes.send(());
    }
}

impl Default for InMemoryRelationshipStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelationshipStore for InMemoryRelationshipStore {
    async fn subscribe(
        &self,
        decision_id: &DecisionId,
        organisation_id: &OrganisationId,
    ) -> Result<RelationshipStream, DomainError> {
        let decision_id = decision_id.clone();
        let organisation_id = organisation_id.clone();
        Ok(watch(
            self.records.clone(),
            self.changes.subscribe(),
            move |records| {
                let decision_id = decision_id.clone();
                let organisation_id = organisation_id.clone();
                async move {
                    records
                        .read()
                        .await
                        .get(&organisation_id)
                        .map(|all| {
                            all.iter()
                                .filter(|r| {
                                    r.record.from_decision_id == decision_id
                                        || r.record.to_decision_id == decision_id
                                })
                                .cloned()
                                .collect()
                        })
                        .unwrap_or_default()
                }
            },
        ))
    }

    async fn add(&self, record: &RelationshipRecord) -> Result<RelationshipRecordId, DomainError> {
        let id = RelationshipRecordId::generate();
        self.records
            .write()
            .await
            .entry(record.organisation_id.clone())
            .or_default()
            .push(StoredRelationship {
                id: id.clone(),
                record: record.clone(),
            });
        tracing::debug!(
            record_id = %id,
            from = %record.from_decision_id,
            to = %record.to_decision_id,
            relationship_type = %record.relationship_type,
            "Stored relationship record"
        );
        self.notify();
        Ok(id)
    }

    async fn remove(
        &self,
        record_id: &RelationshipRecordId,
        organisation_id: &OrganisationId,
    ) -> Result<(), DomainError> {
        let removed = match self.records.write().await.get_mut(organisation_id) {
            Some(all) => {
                let before = all.len();
                all.retain(|r| &r.id != record_id);
                all.len() != before
            }
            None => false,
        };
        if removed {
            tracing::debug!(record_id = %record_id, "Removed relationship record");
            self.notify();
        }
        Ok(())
    }

    async fn find(
        &self,
        from: &DecisionId,
        to: &DecisionId,
        relationship_type: RelationshipType,
        organisation_id: &OrganisationId,
    ) -> Result<Option<RelationshipRecordId>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .get(organisation_id)
            .and_then(|all| {
                all.iter().find(|r| {
                    &r.record.from_decision_id == from
                        && &r.record.to_decision_id == to
                        && r.record.relationship_type == relationship_type
                })
            })
            .map(|r| r.id.clone()))
    }
}
