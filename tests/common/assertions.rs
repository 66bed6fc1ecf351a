//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Error banner printed by the binary on failure
pub fn is_error(message: &str) -> impl Predicate<str> {
    predicates::str::contains("Error:").and(predicates::str::contains(message.to_string()))
}

/// Why-run preview line
pub fn would(preview: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Would {preview}"))
}

/// Success line after an executed action
pub fn succeeded(action: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("sqitch {action}:"))
}
