//! Interactive console front end for the biblio core.
//!
//! # Responsibility
//! - Collect and parse user input for every menu operation.
//! - Print menus, cards, and listings returned by the core.
//!
//! # Invariants
//! - No business logic lives here; every decision is delegated to
//!   `MaterialRegistry`.
//! - A malformed interaction is reported and re-prompted, never fatal.

use biblio_core::{default_log_level, init_logging, MaterialRegistry, RegistryError};
use log::info;
use std::io::{self, BufRead, Write};

fn main() {
    if let Err(err) = run() {
        eprintln!("Critical system error: {err}");
        eprintln!("Please contact the system administrator");
    }
}

fn run() -> io::Result<()> {
    setup_logging();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut registry = MaterialRegistry::new();

    println!("Welcome to the University Library System!");
    println!("Manage your library materials the simple way");
    info!("event=session_start module=cli status=ok");

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Select an option (1-7): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => register_physical_flow(&mut input, &mut registry)?,
            "2" => register_digital_flow(&mut input, &mut registry)?,
            "3" => loan_flow(&mut input, &mut registry)?,
            "4" => return_flow(&mut input, &mut registry)?,
            "5" => show_material_flow(&mut input, &registry)?,
            "6" => list_materials(&registry),
            "7" => {
                println!("\nThank you for using the library system. Goodbye!");
                break;
            }
            _ => println!("Invalid option. Please select an option from 1 to 7"),
        }

        if prompt(&mut input, "\nPress Enter to continue...")?.is_none() {
            break;
        }
    }

    info!("event=session_end module=cli status=ok");
    Ok(())
}

fn setup_logging() {
    let log_dir = std::env::temp_dir().join("biblio").join("logs");
    match log_dir.to_str() {
        Some(dir) => {
            if let Err(err) = init_logging(default_log_level(), dir) {
                eprintln!("warning: file logging disabled: {err}");
            }
        }
        None => eprintln!("warning: file logging disabled: log path is not valid UTF-8"),
    }
}

fn print_menu() {
    println!("\n{}", "=".repeat(60));
    println!("     UNIVERSITY LIBRARY SYSTEM");
    println!("{}", "=".repeat(60));
    println!("1. Register physical book");
    println!("2. Register digital book");
    println!("3. Loan material");
    println!("4. Return material");
    println!("5. Show material information");
    println!("6. List all materials");
    println!("7. Exit");
    println!("{}", "=".repeat(60));
}

fn register_physical_flow(
    input: &mut impl BufRead,
    registry: &mut MaterialRegistry,
) -> io::Result<()> {
    println!("\n=== REGISTER PHYSICAL BOOK ===");
    let Some(title) = prompt(input, "Enter the book title: ")? else {
        return Ok(());
    };
    let Some(author) = prompt(input, "Enter the book author: ")? else {
        return Ok(());
    };
    let Some(raw_number) = prompt(input, "Enter the copy number: ")? else {
        return Ok(());
    };

    let copy_number = match parse_copy_number(&raw_number) {
        Ok(value) => value,
        Err(message) => {
            println!("Error: {message}");
            return Ok(());
        }
    };

    match registry.register_physical(title, author, copy_number) {
        Ok(code) => {
            println!("Physical book registered successfully!");
            println!("Assigned code: {code}");
        }
        Err(err) => println!("{}", describe_error(&err)),
    }
    Ok(())
}

fn register_digital_flow(
    input: &mut impl BufRead,
    registry: &mut MaterialRegistry,
) -> io::Result<()> {
    println!("\n=== REGISTER DIGITAL BOOK ===");
    let Some(title) = prompt(input, "Enter the book title: ")? else {
        return Ok(());
    };
    let Some(author) = prompt(input, "Enter the book author: ")? else {
        return Ok(());
    };
    let Some(raw_size) = prompt(input, "Enter the file size (MB): ")? else {
        return Ok(());
    };

    let file_size_mb = match parse_file_size(&raw_size) {
        Ok(value) => value,
        Err(message) => {
            println!("Error: {message}");
            return Ok(());
        }
    };

    match registry.register_digital(title, author, file_size_mb) {
        Ok(code) => {
            println!("Digital book registered successfully!");
            println!("Assigned code: {code}");
        }
        Err(err) => println!("{}", describe_error(&err)),
    }
    Ok(())
}

fn loan_flow(input: &mut impl BufRead, registry: &mut MaterialRegistry) -> io::Result<()> {
    if registry.is_empty() {
        println!("There are no materials registered in the library");
        return Ok(());
    }

    println!("\n=== LOAN MATERIAL ===");
    let Some(code) = prompt(input, "Enter the code of the material to loan: ")? else {
        return Ok(());
    };

    match registry.loan_material(&code.to_uppercase()) {
        Ok(material) => {
            println!("Material loaned successfully!");
            println!("{}", material.display_info());
        }
        Err(err) => println!("{}", describe_error(&err)),
    }
    Ok(())
}

fn return_flow(input: &mut impl BufRead, registry: &mut MaterialRegistry) -> io::Result<()> {
    if registry.is_empty() {
        println!("There are no materials registered in the library");
        return Ok(());
    }

    println!("\n=== RETURN MATERIAL ===");
    let Some(code) = prompt(input, "Enter the code of the material to return: ")? else {
        return Ok(());
    };

    match registry.return_material(&code.to_uppercase()) {
        Ok(material) => {
            println!("Material returned successfully!");
            println!("{}", material.display_info());
        }
        Err(err) => println!("{}", describe_error(&err)),
    }
    Ok(())
}

fn show_material_flow(input: &mut impl BufRead, registry: &MaterialRegistry) -> io::Result<()> {
    if registry.is_empty() {
        println!("There are no materials registered in the library");
        return Ok(());
    }

    println!("\n=== MATERIAL INFORMATION ===");
    let Some(code) = prompt(input, "Enter the code of the material to look up: ")? else {
        return Ok(());
    };

    match registry.find_by_code(&code.to_uppercase()) {
        Some(material) => println!("{}", material.display_info()),
        None => println!("Material not found"),
    }
    Ok(())
}

fn list_materials(registry: &MaterialRegistry) {
    if registry.is_empty() {
        println!("There are no materials registered in the library");
        return;
    }

    println!("\n=== MATERIALS LIST ({}) ===", registry.len());
    for summary in registry.summaries() {
        println!(
            "{:2}. {} | {} | {} | {}",
            summary.index,
            summary.kind_label,
            summary.code,
            summary.title,
            summary.status.label().to_uppercase()
        );
    }
}

/// Prints a prompt and reads one trimmed line.
///
/// Returns `None` on end of input so callers can wind down cleanly.
fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Parses a copy number, reporting parse failures distinctly from the
/// range failures the core raises.
fn parse_copy_number(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| "the copy number must be a whole number".to_string())
}

/// Parses a file size in megabytes, reporting parse failures distinctly
/// from the range failures the core raises.
fn parse_file_size(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| "the file size must be a number".to_string())
}

fn describe_error(err: &RegistryError) -> String {
    match err {
        RegistryError::NotFound(_) => "Material not found".to_string(),
        RegistryError::AlreadyLoaned(_) => "This material is already loaned".to_string(),
        RegistryError::NotLoaned(_) => "This material is not loaned".to_string(),
        RegistryError::Validation(err) => format!("Error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_copy_number, parse_file_size};

    #[test]
    fn parse_copy_number_accepts_integers() {
        assert_eq!(parse_copy_number(" 3 ").unwrap(), 3);
        assert_eq!(parse_copy_number("-5").unwrap(), -5);
    }

    #[test]
    fn parse_copy_number_rejects_non_integers() {
        let message = parse_copy_number("3.5").unwrap_err();
        assert!(message.contains("whole number"));
        assert!(parse_copy_number("three").is_err());
    }

    #[test]
    fn parse_file_size_accepts_numbers() {
        assert_eq!(parse_file_size("2.5").unwrap(), 2.5);
        assert_eq!(parse_file_size(" 10 ").unwrap(), 10.0);
    }

    #[test]
    fn parse_file_size_rejects_non_numbers() {
        let message = parse_file_size("big").unwrap_err();
        assert!(message.contains("must be a number"));
    }
}
