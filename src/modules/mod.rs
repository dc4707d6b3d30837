//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services the features call into.

pub mod revalidation;
