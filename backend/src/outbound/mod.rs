//! Outbound adapters for external systems.

pub mod documents;
pub mod persistence;
