//! Core domain logic for the biblio library tracker.
//! This crate is the single source of truth for lending invariants.

pub mod display;
pub mod logging;
pub mod model;
pub mod registry;

pub use display::card::{CardField, MaterialCard};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::material::{
    generate_code, Material, MaterialKind, MaterialStatus, MaterialValidationError, CODE_LENGTH,
};
pub use registry::material_registry::{
    MaterialRegistry, MaterialSummary, RegistryError, RegistryResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
