//! Decision Tracker - team decision tracking core.
//!
//! Decisions move through a short workflow (identify, stakeholders, method,
//! choose, publish), relate to each other through typed edges (blocks,
//! supersedes), carry stakeholder roles, and are grouped by an organisation's
//! team hierarchy. The domain is pure; persistence and notification sit
//! behind the `ports` traits.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
