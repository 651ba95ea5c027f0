//! Command infrastructure for handlers.
//!
//! Every command handler takes a `CommandMetadata` next to its command, so
//! actor and correlation context reach the events it publishes without
//! each command struct repeating those fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StakeholderId;

/// Context that flows with a command into the events it causes.
///
/// # Example
///
/// ```ignore
/// let metadata = CommandMetadata::new(actor).with_correlation_id(request_id);
/// let result = handler.handle(cmd, metadata).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The stakeholder executing this command.
    pub actor_id: StakeholderId,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Where the command came from (e.g. "api", "import").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new(actor_id: StakeholderId) -> Self {
        Self {
            actor_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
