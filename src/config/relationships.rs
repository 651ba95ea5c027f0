//! Relationship graph limits

use serde::Deserialize;

use super::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipConfig {
    /// Upper bound on targets a decision may hold under one relationship type.
    #[serde(default = "default_max_relationships_per_type")]
    pub max_relationships_per_type: usize,
}

impl RelationshipConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_relationships_per_type == 0 {
            return Err(ValidationError::RelationshipLimitTooSmall);
        }
        Ok(())
    }
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            max_relationships_per_type: default_max_relationships_per_type(),
        }
    }
}

fn default_max_relationships_per_type() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_one_hundred() {
        let config = RelationshipConfig::default();
        assert_eq!(config.max_relationships_per_type, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = RelationshipConfig {
            max_relationships_per_type: 0,
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::RelationshipLimitTooSmall)
        );
    }
}
