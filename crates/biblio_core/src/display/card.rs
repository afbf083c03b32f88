//! Material information card.
//!
//! # Responsibility
//! - Project one material into structured display fields.
//! - Render the fields as a bordered text block for console output.
//!
//! # Invariants
//! - The due-date field is present only while the material is loaned.
//! - The rendered block width fits the longest line of its content.

use crate::model::material::{Material, MaterialKind, MaterialStatus};
use chrono::DateTime;

const DUE_DATE_FORMAT: &str = "%d/%m/%Y";

/// One labeled line in the kind-specific section of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub label: &'static str,
    pub value: String,
}

/// Structured display data for one material.
///
/// Built from a `Material` and consumed by `render()` or by any other
/// front end that prefers fields over pre-rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialCard {
    /// Kind-specific header, e.g. `PHYSICAL BOOK`.
    pub header: &'static str,
    pub title: String,
    pub author: String,
    pub code: String,
    pub status: MaterialStatus,
    /// Formatted `dd/mm/yyyy` due date, only while loaned.
    pub due_date: Option<String>,
    /// Kind-specific field plus the loan-period field.
    pub details: Vec<CardField>,
}

impl MaterialCard {
    /// Projects a material into card fields.
    pub fn from_material(material: &Material) -> Self {
        let header = match material.kind {
            MaterialKind::PhysicalBook { .. } => "PHYSICAL BOOK",
            MaterialKind::DigitalBook { .. } => "DIGITAL BOOK",
        };

        let kind_field = match material.kind {
            MaterialKind::PhysicalBook { copy_number } => CardField {
                label: "Copy number",
                value: copy_number.to_string(),
            },
            MaterialKind::DigitalBook { file_size_mb } => CardField {
                label: "File size",
                value: format!("{file_size_mb} MB"),
            },
        };
        let period_field = CardField {
            label: "Loan period",
            value: format!("{} days", material.loan_period_days()),
        };

        let due_date = if material.is_loaned {
            material.due_date.and_then(format_due_date)
        } else {
            None
        };

        Self {
            header,
            title: material.title.clone(),
            author: material.author.clone(),
            code: material.code.clone(),
            status: material.status(),
            due_date,
            details: vec![kind_field, period_field],
        }
    }

    /// Renders the card as a bordered multi-line block.
    ///
    /// Layout: centered kind header, the common fields, the conditional
    /// due-date line, then the kind-specific section before the closing
    /// border.
    pub fn render(&self) -> String {
        let mut common = vec![
            format!("Title:  {}", self.title),
            format!("Author: {}", self.author),
            format!("Code:   {}", self.code),
            format!("Status: {}", self.status),
        ];
        if let Some(due_date) = &self.due_date {
            common.push(format!("Due date: {due_date}"));
        }

        let details: Vec<String> = self
            .details
            .iter()
            .map(|field| format!("{}: {}", field.label, field.value))
            .collect();

        let inner_width = common
            .iter()
            .chain(details.iter())
            .map(|line| line.chars().count())
            .chain(std::iter::once(self.header.chars().count()))
            .max()
            .unwrap_or(0)
            + 2;

        let mut block = String::new();
        block.push_str(&format!("╭{}╮\n", "─".repeat(inner_width)));
        block.push_str(&format!("│{}│\n", center(self.header, inner_width)));
        block.push_str(&format!("├{}┤\n", "─".repeat(inner_width)));
        for line in &common {
            block.push_str(&format!("│{}│\n", pad(line, inner_width)));
        }
        block.push_str(&format!("├{}┤\n", "─".repeat(inner_width)));
        for line in &details {
            block.push_str(&format!("│{}│\n", pad(line, inner_width)));
        }
        block.push_str(&format!("╰{}╯", "─".repeat(inner_width)));
        block
    }
}

impl Material {
    /// Formatted information block for console output.
    pub fn display_info(&self) -> String {
        MaterialCard::from_material(self).render()
    }
}

fn format_due_date(due_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(due_ms)
        .map(|instant| instant.format(DUE_DATE_FORMAT).to_string())
}

fn pad(line: &str, width: usize) -> String {
    let used = line.chars().count();
    format!(" {}{}", line, " ".repeat(width.saturating_sub(used + 1)))
}

fn center(line: &str, width: usize) -> String {
    let used = line.chars().count();
    let space = width.saturating_sub(used);
    let left = space / 2;
    format!(
        "{}{}{}",
        " ".repeat(left),
        line,
        " ".repeat(space.saturating_sub(left))
    )
}
