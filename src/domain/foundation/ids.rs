//! Strongly-typed identifier value objects.
//!
//! Identifiers are issued by the document store, so they wrap opaque
//! strings rather than UUIDs. `new()` mints a UUID v4 string for stores
//! that do not bring their own key scheme (the in-memory adapters).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a string-backed identifier with validation and the usual impls.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier, returning an error if it is blank.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Mints a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// Identifier of a decision document.
    DecisionId,
    "decision_id"
);

string_id!(
    /// Identifier of the organisation that owns decisions and teams.
    OrganisationId,
    "organisation_id"
);

string_id!(
    /// Identifier of a team within an organisation's hierarchy.
    TeamId,
    "team_id"
);

string_id!(
    /// Identifier of a project a decision can be filed under.
    ProjectId,
    "project_id"
);

string_id!(
    /// Identifier of a stakeholder (a user profile in the directory).
    StakeholderId,
    "stakeholder_id"
);

string_id!(
    /// Identifier of a persisted relationship edge record.
    RelationshipRecordId,
    "relationship_id"
);
