//! In-memory material registry.
//!
//! # Responsibility
//! - Keep the ordered collection of all registered materials.
//! - Provide register/find/loan/return/list entry points for front ends.
//!
//! # Invariants
//! - Insertion order is preserved; materials are never deleted.
//! - Codes are unique within one registry (regenerated on collision).
//! - Every failure is reported as a semantic error with no partial mutation.

use crate::model::material::{
    generate_code, Material, MaterialKind, MaterialStatus, MaterialValidationError,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Semantic error for registry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Input failed material validation.
    Validation(MaterialValidationError),
    /// No material carries the given code.
    NotFound(String),
    /// Loan requested for a material that is already out.
    AlreadyLoaned(String),
    /// Return requested for a material that is not out.
    NotLoaned(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(code) => write!(f, "material not found: {code}"),
            Self::AlreadyLoaned(code) => write!(f, "material is already loaned: {code}"),
            Self::NotLoaned(code) => write!(f, "material is not loaned: {code}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MaterialValidationError> for RegistryError {
    fn from(value: MaterialValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One row of the `summaries()` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialSummary<'a> {
    /// 1-based position in insertion order.
    pub index: usize,
    /// Kind label, `PHYSICAL` or `DIGITAL`.
    pub kind_label: &'static str,
    pub code: &'a str,
    pub title: &'a str,
    pub status: MaterialStatus,
}

/// In-memory owner of all materials for one running session.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a physical book and returns its generated code.
    ///
    /// # Errors
    /// - `Validation` when title/author are empty or `copy_number` is not a
    ///   positive integer. The registry is left unchanged on failure.
    pub fn register_physical(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        copy_number: i64,
    ) -> RegistryResult<String> {
        let kind = MaterialKind::physical(copy_number)?;
        self.register(kind, title, author)
    }

    /// Registers a digital book and returns its generated code.
    ///
    /// # Errors
    /// - `Validation` when title/author are empty or `file_size_mb` is not a
    ///   positive finite number. The registry is left unchanged on failure.
    pub fn register_digital(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        file_size_mb: f64,
    ) -> RegistryResult<String> {
        let kind = MaterialKind::digital(file_size_mb)?;
        self.register(kind, title, author)
    }

    fn register(
        &mut self,
        kind: MaterialKind,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> RegistryResult<String> {
        // Regenerate until the code is unique within this registry. The
        // collision probability is tiny (36^-8 per pair) but a duplicate
        // would make find_by_code ambiguous for loans and returns.
        let mut code = generate_code();
        while self.find_by_code(&code).is_some() {
            code = generate_code();
        }

        let material = Material::with_code(code, kind, title, author)?;
        let code = material.code.clone();
        info!(
            "event=material_registered module=registry status=ok kind={} code={}",
            material.kind.label(),
            code
        );
        self.materials.push(material);
        Ok(code)
    }

    /// Finds a material by exact, case-sensitive code match.
    ///
    /// Callers are expected to normalize user input (the CLI upper-cases
    /// codes before calling).
    pub fn find_by_code(&self, code: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.code == code)
    }

    /// Loans the material with the given code.
    ///
    /// # Errors
    /// - `NotFound` when no material carries the code.
    /// - `AlreadyLoaned` when the material is already out.
    pub fn loan_material(&mut self, code: &str) -> RegistryResult<&Material> {
        let material = self
            .materials
            .iter_mut()
            .find(|material| material.code == code)
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))?;

        if !material.loan() {
            return Err(RegistryError::AlreadyLoaned(code.to_string()));
        }
        info!(
            "event=material_loaned module=registry status=ok code={} due_date_ms={}",
            code,
            material.due_date.unwrap_or_default()
        );
        Ok(material)
    }

    /// Returns the material with the given code from loan.
    ///
    /// # Errors
    /// - `NotFound` when no material carries the code.
    /// - `NotLoaned` when the material is not out.
    pub fn return_material(&mut self, code: &str) -> RegistryResult<&Material> {
        let material = self
            .materials
            .iter_mut()
            .find(|material| material.code == code)
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))?;

        if !material.return_material() {
            return Err(RegistryError::NotLoaned(code.to_string()));
        }
        info!(
            "event=material_returned module=registry status=ok code={}",
            code
        );
        Ok(material)
    }

    /// Lazy listing of all materials in insertion order.
    ///
    /// The iterator borrows the registry and can be restarted by calling
    /// this method again. An empty registry yields an empty iterator.
    pub fn summaries(&self) -> impl Iterator<Item = MaterialSummary<'_>> + '_ {
        self.materials
            .iter()
            .enumerate()
            .map(|(position, material)| MaterialSummary {
                index: position + 1,
                kind_label: material.kind.label(),
                code: material.code.as_str(),
                title: material.title.as_str(),
                status: material.status(),
            })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
