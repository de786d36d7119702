//! Identifier normalization.
//!
//! User-facing names become graph node keys, so they are reduced to a safe
//! alphabet: alphanumeric characters are kept, spaces and underscores become
//! underscores, and everything else is dropped. Normalization never fails,
//! even when nothing survives.
//!
//! # Example
//!
//! ```
//! use eerkit_core::normalize::{normalize_attribute_name, normalize_entity_name};
//!
//! assert_eq!(normalize_entity_name("student id"), "STUDENT_ID");
//! assert_eq!(normalize_attribute_name("student id"), "Student_Id");
//! assert_eq!(normalize_attribute_name("e-mail"), "Email");
//! ```

/// Normalizes an entity or relationship name.
///
/// Alphanumeric characters are upper-cased.
pub fn normalize_entity_name(text: &str) -> String {
    let mut name = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            name.extend(ch.to_uppercase());
        } else if is_separator(ch) {
            name.push('_');
        }
    }
    name
}

/// Normalizes an attribute (or role) name.
///
/// Every word is capitalized, not only the first one: a space or underscore
/// starts a new word, so `"student id"` becomes `"Student_Id"` and never
/// `"Student_id"`. Within a word, retained characters are lower-cased, so
/// internal capitalization is not preserved and `"FirstName"` becomes
/// `"Firstname"`.
pub fn normalize_attribute_name(text: &str) -> String {
    let mut name = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if name.is_empty() || name.ends_with('_') {
                name.extend(ch.to_uppercase());
            } else {
                name.extend(ch.to_lowercase());
            }
        } else if is_separator(ch) {
            name.push('_');
        }
    }
    name
}

fn is_separator(ch: char) -> bool {
    ch == ' ' || ch == '_'
}
