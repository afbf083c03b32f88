//! Material domain model.
//!
//! # Responsibility
//! - Define the canonical record for physical and digital books.
//! - Provide the loan/return state machine shared by both kinds.
//!
//! # Invariants
//! - `code` is an 8-character `A-Z0-9` string, immutable after construction.
//! - `is_loaned == false` implies `loan_date` and `due_date` are `None`.
//! - `is_loaned == true` implies both dates are set.
//! - `title` and `author` are trimmed and never empty.

use chrono::Utc;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of characters in a material code.
pub const CODE_LENGTH: usize = 8;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MS_PER_DAY: i64 = 86_400_000;

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{8}$").expect("valid material code regex"));

/// Validation error for material fields and state.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Author is empty or whitespace-only.
    EmptyAuthor,
    /// Code does not match the 8-character `A-Z0-9` shape.
    InvalidCode(String),
    /// Copy number is not a positive integer in range.
    InvalidCopyNumber(i64),
    /// File size is not a positive finite number of megabytes.
    InvalidFileSize(f64),
    /// Loan flag and loan/due dates disagree.
    InconsistentLoanState { is_loaned: bool },
}

impl Display for MaterialValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::EmptyAuthor => write!(f, "author cannot be empty"),
            Self::InvalidCode(code) => {
                write!(f, "material code must be 8 characters of A-Z0-9, got `{code}`")
            }
            Self::InvalidCopyNumber(value) => {
                write!(f, "copy number must be a positive integer, got {value}")
            }
            Self::InvalidFileSize(value) => {
                write!(f, "file size must be a positive number of megabytes, got {value}")
            }
            Self::InconsistentLoanState { is_loaned } => write!(
                f,
                "loan dates do not match loan flag (is_loaned = {is_loaned})"
            ),
        }
    }
}

impl Error for MaterialValidationError {}

/// Lending state of one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialStatus {
    Available,
    Loaned,
}

impl MaterialStatus {
    /// Returns the user-facing status label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Loaned => "Loaned",
        }
    }
}

impl Display for MaterialStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind-specific data and loan policy.
///
/// Serialized with an internal `type` tag so the kind and its field sit
/// beside the common material fields on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialKind {
    /// Physical book with a shelf copy number.
    PhysicalBook { copy_number: u32 },
    /// Digital book with a download size in megabytes.
    DigitalBook { file_size_mb: f64 },
}

impl MaterialKind {
    /// Builds the physical kind, rejecting non-positive or out-of-range
    /// copy numbers.
    pub fn physical(copy_number: i64) -> Result<Self, MaterialValidationError> {
        match u32::try_from(copy_number) {
            Ok(value) if value > 0 => Ok(Self::PhysicalBook { copy_number: value }),
            _ => Err(MaterialValidationError::InvalidCopyNumber(copy_number)),
        }
    }

    /// Builds the digital kind, rejecting non-positive or non-finite sizes.
    pub fn digital(file_size_mb: f64) -> Result<Self, MaterialValidationError> {
        if file_size_mb.is_finite() && file_size_mb > 0.0 {
            Ok(Self::DigitalBook { file_size_mb })
        } else {
            Err(MaterialValidationError::InvalidFileSize(file_size_mb))
        }
    }

    /// Maximum days a material of this kind may stay loaned.
    pub fn loan_period_days(&self) -> i64 {
        match self {
            Self::PhysicalBook { .. } => 7,
            Self::DigitalBook { .. } => 3,
        }
    }

    /// Short kind label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PhysicalBook { .. } => "PHYSICAL",
            Self::DigitalBook { .. } => "DIGITAL",
        }
    }

    /// Kind-specific descriptive line.
    pub fn specific_info(&self) -> String {
        match self {
            Self::PhysicalBook { copy_number } => format!("Copy number: {copy_number}"),
            Self::DigitalBook { file_size_mb } => format!("File size: {file_size_mb} MB"),
        }
    }

    fn validate(&self) -> Result<(), MaterialValidationError> {
        match self {
            Self::PhysicalBook { copy_number } => {
                if *copy_number == 0 {
                    return Err(MaterialValidationError::InvalidCopyNumber(0));
                }
            }
            Self::DigitalBook { file_size_mb } => {
                if !(file_size_mb.is_finite() && *file_size_mb > 0.0) {
                    return Err(MaterialValidationError::InvalidFileSize(*file_size_mb));
                }
            }
        }
        Ok(())
    }
}

/// Canonical record for one lendable material.
///
/// Timestamps are Unix epoch milliseconds. The loan/due dates are only
/// meaningful while `is_loaned` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed, non-empty author.
    pub author: String,
    /// Stable 8-character `A-Z0-9` identifier assigned at registration.
    pub code: String,
    /// Whether the material is currently out on loan.
    pub is_loaned: bool,
    /// Loan start, epoch milliseconds. Set while loaned.
    pub loan_date: Option<i64>,
    /// Loan deadline, epoch milliseconds. Set while loaned.
    pub due_date: Option<i64>,
    /// Kind-specific data and loan policy.
    #[serde(flatten)]
    pub kind: MaterialKind,
}

impl Material {
    /// Creates a material with a freshly generated code.
    ///
    /// # Invariants
    /// - The new material starts `Available` with both dates `None`.
    pub fn new(
        kind: MaterialKind,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Self, MaterialValidationError> {
        Self::with_code(generate_code(), kind, title, author)
    }

    /// Creates a material with a caller-provided code.
    ///
    /// Used by the registry when it has to regenerate codes until one is
    /// collision-free.
    ///
    /// # Errors
    /// - Rejects empty title/author, malformed codes, and invalid
    ///   kind-specific fields. Nothing is constructed on failure.
    pub fn with_code(
        code: impl Into<String>,
        kind: MaterialKind,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Self, MaterialValidationError> {
        let code = code.into();
        if !CODE_RE.is_match(&code) {
            return Err(MaterialValidationError::InvalidCode(code));
        }
        kind.validate()?;

        let mut material = Self {
            title: String::new(),
            author: String::new(),
            code,
            is_loaned: false,
            loan_date: None,
            due_date: None,
            kind,
        };
        material.set_title(title)?;
        material.set_author(author)?;
        Ok(material)
    }

    /// Replaces the title with its trimmed value.
    ///
    /// # Errors
    /// - `EmptyTitle` when the value is empty or whitespace-only.
    pub fn set_title(&mut self, value: impl Into<String>) -> Result<(), MaterialValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MaterialValidationError::EmptyTitle);
        }
        self.title = trimmed.to_string();
        Ok(())
    }

    /// Replaces the author with its trimmed value.
    ///
    /// # Errors
    /// - `EmptyAuthor` when the value is empty or whitespace-only.
    pub fn set_author(&mut self, value: impl Into<String>) -> Result<(), MaterialValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MaterialValidationError::EmptyAuthor);
        }
        self.author = trimmed.to_string();
        Ok(())
    }

    /// Loans the material now.
    ///
    /// Returns `false` without any state change when already loaned.
    pub fn loan(&mut self) -> bool {
        self.loan_at(Utc::now().timestamp_millis())
    }

    /// Loans the material at an explicit instant.
    ///
    /// # Contract
    /// - Sets `loan_date = now_ms` and `due_date = now_ms + loan period`.
    /// - Already-loaned materials are left untouched and `false` is returned.
    pub fn loan_at(&mut self, now_ms: i64) -> bool {
        if self.is_loaned {
            return false;
        }
        self.is_loaned = true;
        self.loan_date = Some(now_ms);
        self.due_date = Some(now_ms + self.kind.loan_period_days() * MS_PER_DAY);
        true
    }

    /// Returns the material from loan, clearing both dates.
    ///
    /// Returns `false` without any state change when not loaned.
    pub fn return_material(&mut self) -> bool {
        if !self.is_loaned {
            return false;
        }
        self.is_loaned = false;
        self.loan_date = None;
        self.due_date = None;
        true
    }

    /// Current lending status.
    pub fn status(&self) -> MaterialStatus {
        if self.is_loaned {
            MaterialStatus::Loaned
        } else {
            MaterialStatus::Available
        }
    }

    /// Maximum loan period in days for this material's kind.
    pub fn loan_period_days(&self) -> i64 {
        self.kind.loan_period_days()
    }

    /// Kind-specific descriptive line.
    pub fn specific_info(&self) -> String {
        self.kind.specific_info()
    }

    /// Checks every field and state invariant.
    ///
    /// # Errors
    /// - Returns the first violated invariant: empty title/author, malformed
    ///   code, invalid kind field, or loan flag/date mismatch.
    pub fn validate(&self) -> Result<(), MaterialValidationError> {
        if self.title.trim().is_empty() || self.title != self.title.trim() {
            return Err(MaterialValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() || self.author != self.author.trim() {
            return Err(MaterialValidationError::EmptyAuthor);
        }
        if !CODE_RE.is_match(&self.code) {
            return Err(MaterialValidationError::InvalidCode(self.code.clone()));
        }
        self.kind.validate()?;

        let dates_set = self.loan_date.is_some() && self.due_date.is_some();
        let dates_clear = self.loan_date.is_none() && self.due_date.is_none();
        let consistent = if self.is_loaned { dates_set } else { dates_clear };
        if !consistent {
            return Err(MaterialValidationError::InconsistentLoanState {
                is_loaned: self.is_loaned,
            });
        }
        Ok(())
    }
}

/// Generates one 8-character `A-Z0-9` material code.
///
/// Codes are random and not checked for uniqueness here; the registry
/// regenerates on collision before inserting.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let index = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[index] as char
        })
        .collect()
}
