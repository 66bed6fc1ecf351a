//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, blue for headers,
//!   bright_black for secondary detail such as command lines
//! - **Standardized spacing**: Blank line before every message block

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.blue());
}

/// Prints a why-run preview, labelled so it cannot be mistaken for work done
///
/// # Format
/// ```text
///
/// Would <preview>
///   $ <command line>
/// ```
pub fn print_preview(preview: &str, command_line: &str) {
    println!("\n{} {}", "Would".blue(), preview.white());
    println!("  {} {}", "$".bright_black(), command_line.bright_black());
}
