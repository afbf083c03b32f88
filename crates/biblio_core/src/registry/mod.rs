//! Registry layer: in-memory ownership and lending orchestration.
//!
//! # Responsibility
//! - Own every registered material for the process lifetime.
//! - Orchestrate register/loan/return flows into semantic results.
//!
//! # Invariants
//! - Registration validates before inserting; failures never mutate state.
//! - Material codes are unique within one registry instance.

pub mod material_registry;
