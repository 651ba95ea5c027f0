//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `DecisionStore` - Decision documents, scoped by organisation/team/project
//! - `RelationshipStore` - Edge records between decisions
//! - `TeamHierarchyStore` - One team hierarchy per organisation
//!
//! ## Read Ports
//!
//! - `StakeholderDirectory` - Stakeholder profiles by id
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events

mod decision_store;
mod event_publisher;
mod relationship_store;
mod stakeholder_directory;
mod team_hierarchy_store;

pub use decision_store::{DecisionScope, DecisionStore, DecisionStream};
pub use event_publisher::EventPublisher;
pub use relationship_store::{RelationshipStore, RelationshipStream, StoredRelationship};
pub use stakeholder_directory::{Stakeholder, StakeholderDirectory};
pub use team_hierarchy_store::TeamHierarchyStore;
