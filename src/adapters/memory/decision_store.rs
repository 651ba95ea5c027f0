//! In-memory DecisionStore.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use super::{change_channel, watch};
use crate::domain::decision::{Decision, DecisionDocument};
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode};
use crate::ports::{DecisionScope, DecisionStore, DecisionStream};

type Documents = Arc<RwLock<HashMap<DecisionId, DecisionDocument>>>;

/// Decision documents held in a map, keyed by id.
#[derive(Debug, Clone)]
pub struct InMemoryDecisionStore {
    documents: Documents,
    changes: broadcast::Sender<()>,
}

impl InMemoryDecisionStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            changes: change_channel(),
        }
    }

    /// Number of stored decisions (for tests).
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn notify(&self) {
        // No receivers is fine.
        let _ = self.changes.send(());
    }
}

impl Default for InMemoryDecisionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn restore(doc: &DecisionDocument) -> Result<Decision, DomainError> {
    Decision::try_from(doc.clone()).map_err(DomainError::from)
}

/// Decisions in scope, oldest first.
async fn list(documents: &Documents, scope: &DecisionScope) -> Vec<Decision> {
    let mut decisions: Vec<Decision> = documents
        .read()
        .await
        .values()
        .filter_map(|doc| match restore(doc) {
            Ok(decision) => Some(decision),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable decision document");
                None
            }
        })
        .filter(|d| scope.contains(d))
        .collect();
    decisions.sort_by(|a, b| {
        a.created_at()
            .cmp(b.created_at())
            .then_with(|| a.id().cmp(&b.id()))
    });
    decisions
}

#[async_trait]
impl DecisionStore for InMemoryDecisionStore {
    async fn get(
        &self,
        id: &DecisionId,
        scope: &DecisionScope,
    ) -> Result<Option<Decision>, DomainError> {
        let documents = self.documents.read().await;
        match documents.get(id) {
            Some(doc) => {
                let decision = restore(doc)?;
                Ok(scope.contains(&decision).then_some(decision))
            }
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        decision: &Decision,
        scope: &DecisionScope,
    ) -> Result<Decision, DomainError> {
        if decision.organisation_id() != &scope.organisation_id {
            return Err(DomainError::new(
                ErrorCode::CrossOrganisation,
                "Decision does not belong to the scope's organisation",
            ));
        }
        let id = DecisionId::generate();
        let created = decision.with_id(id.clone())?;

        self.documents
            .write()
            .await
            .insert(id.clone(), DecisionDocument::from(&created));
        tracing::debug!(decision_id = %id, "Stored new decision");
        self.notify();
        Ok(created)
    }

    async fn update(&self, decision: &Decision, scope: &DecisionScope) -> Result<(), DomainError> {
        let id = decision.id().ok_or_else(|| {
            DomainError::new(ErrorCode::DecisionNotFound, "Decision has not been created")
        })?;
        let mut documents = self.documents.write().await;
        let in_scope = documents
            .get(id)
            .map_or(false, |doc| doc.organisation_id == scope.organisation_id);
        if !in_scope {
            return Err(DomainError::new(
                ErrorCode::DecisionNotFound,
                format!("Decision not found: {}", id),
            ));
        }
        documents.insert(id.clone(), DecisionDocument::from(decision));
        drop(documents);

        tracing::debug!(decision_id = %id, "Updated decision");
        self.notify();
        Ok(())
    }

    async fn subscribe_all(&self, scope: &DecisionScope) -> Result<DecisionStream, DomainError> {
        let scope = scope.clone();
        Ok(watch(
            self.documents.clone(),
            self.changes.subscribe(),
            move |documents| {
                let scope = scope.clone();
                async move { list(&documents, &scope).await }
            },
        ))
    }
}
