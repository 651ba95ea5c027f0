//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors, events)
//! - `workflow` - Ordered workflow steps and the adjacency rule between them
//! - `decision` - Decision aggregate, stakeholder roles, relationship graph
//! - `team` - Per-organisation team hierarchy
//!
//! Everything here is synchronous and free of I/O.

pub mod decision;
pub mod foundation;
pub mod team;
pub mod workflow;
