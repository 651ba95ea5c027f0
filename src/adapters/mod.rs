//! Adapters - Implementations of port interfaces.
//!
//! - `events` - Event bus implementations
//! - `memory` - In-memory stores and stakeholder directory

pub mod events;
pub mod memory;

pub use events::InMemoryEventBus;
pub use memory::{
    InMemoryDecisionStore, InMemoryRelationshipStore, InMemoryStakeholderDirectory,
    InMemoryTeamHierarchyStore,
};
