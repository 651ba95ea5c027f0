//! In-memory StakeholderDirectory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, StakeholderId};
use crate::ports::{Stakeholder, StakeholderDirectory};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStakeholderDirectory {
    stakeholders: Arc<RwLock<HashMap<StakeholderId, Stakeholder>>>,
}

impl InMemoryStakeholderDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the directory with known stakeholders.
    pub fn with_stakeholders(stakeholders: impl IntoIterator<Item = Stakeholder>) -> Self {
        let map = stakeholders.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self {
            stakeholders: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn insert(&self, stakeholder: Stakeholder) {
        self.stakeholders
            .write()
            .await
            .insert(stakeholder.id.clone(), stakeholder);
    }
}

#[async_trait]
impl StakeholderDirectory for InMemoryStakeholderDirectory {
    async fn get_by_id(&self, id: &StakeholderId) -> Result<Option<Stakeholder>, DomainError> {
        Ok(self.stakeholders.read().await.get(id).cloned())
    }
}
