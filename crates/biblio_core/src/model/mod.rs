//! Domain model for lendable library materials.
//!
//! # Responsibility
//! - Define the canonical material record shared by all registry operations.
//! - Keep one material shape with a tagged kind for physical/digital books.
//!
//! # Invariants
//! - Every material is identified by a stable 8-character `A-Z0-9` code.
//! - Loan state and loan/due dates are always consistent with each other.

pub mod material;
