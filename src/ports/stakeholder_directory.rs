//! Stakeholder directory port (read side).
//!
//! Decisions only hold stakeholder ids. Display data comes from the
//! directory, which the domain never writes to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, StakeholderId};

/// Profile of a stakeholder as shown next to a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholder {
    pub id: StakeholderId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[async_trait]
pub trait StakeholderDirectory: Send + Sync {
    /// Returns `None` for unknown ids.
    async fn get_by_id(&self, id: &StakeholderId) -> Result<Option<Stakeholder>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stakeholder_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn StakeholderDirectory) {}
    }

    #[test]
    fn stakeholder_omits_missing_contact_fields() {
        let stakeholder = Stakeholder {
            id: StakeholderId::new("alice").unwrap(),
            display_name: "Alice".to_string(),
            email: None,
            photo_url: None,
        };
        let json = serde_json::to_value(&stakeholder).unwrap();
        assert_eq!(json, serde_json::json!({"id": "alice", "displayName": "Alice"}));
    }
}
