//! Option table validation.
//!
//! Catches table configuration errors (a programming error in the embedding
//! application, not user input) before a parse scan starts: empty or
//! dash-prefixed names, duplicate enabled names, and boolean options marked
//! as taking a value.
//!
//! # Examples
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use plotargs_core::{OptionDescriptor, OptionTable, validate_table};
//!
//! let flag = Rc::new(Cell::new(false));
//! let table = OptionTable::new("plot")
//!     .with_option(OptionDescriptor::boolean("np", Rc::clone(&flag)));
//! assert!(validate_table(&table).is_empty());
//!
//! // Duplicate enabled name
//! let bad = OptionTable::new("plot")
//!     .with_option(OptionDescriptor::boolean("np", Rc::clone(&flag)))
//!     .with_option(OptionDescriptor::boolean("np", Rc::clone(&flag)));
//! assert!(!validate_table(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{OptAction, OptionTable};

/// Table configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// An entry has an empty name.
    #[error("option name cannot be empty")]
    EmptyOptionName,
    /// An entry name carries a leading dash or embedded whitespace.
    #[error("invalid option name: {0:?}")]
    InvalidOptionName(String),
    /// Two enabled entries share a name; matching would be ambiguous.
    #[error("duplicate enabled option: -{0}")]
    DuplicateOption(String),
    /// A boolean option is marked as taking a value.
    #[error("boolean option -{0} cannot take a value")]
    BooleanTakesValue(String),
}

/// Validates a table's structural invariants.
///
/// Returns all problems found; an empty vector means the table is safe to
/// parse against. Disabled entries are exempt from the duplicate check but
/// still need well-formed names.
pub fn validate_table(table: &OptionTable) -> Vec<TableError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for opt in &table.entries {
        if opt.name.is_empty() {
            errors.push(TableError::EmptyOptionName);
            continue;
        }

        if opt.name.starts_with('-') || opt.name.chars().any(|c| c.is_whitespace()) {
            errors.push(TableError::InvalidOptionName(opt.name.clone()));
            continue;
        }

        if opt.enabled && !seen.insert(opt.name.as_str()) {
            errors.push(TableError::DuplicateOption(opt.name.clone()));
        }

        if matches!(opt.action, OptAction::SetBool(_)) && opt.takes_value {
            errors.push(TableError::BooleanTakesValue(opt.name.clone()));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::OptionDescriptor;

    fn flag() -> Rc<Cell<bool>> {
        Rc::new(Cell::new(false))
    }

    #[test]
    fn test_rejects_empty_name() {
        let table = OptionTable::new("t").with_option(OptionDescriptor::boolean("", flag()));
        assert_eq!(validate_table(&table), vec![TableError::EmptyOptionName]);
    }

    #[test]
    fn test_rejects_dash_prefixed_name() {
        let table = OptionTable::new("t").with_option(OptionDescriptor::boolean("-np", flag()));
        assert_eq!(
            validate_table(&table),
            vec![TableError::InvalidOptionName("-np".to_string())]
        );
    }

    #[test]
    fn test_rejects_duplicate_enabled_names() {
        let table = OptionTable::new("t")
            .with_option(OptionDescriptor::boolean("np", flag()))
            .with_option(OptionDescriptor::boolean("np", flag()));
        assert_eq!(
            validate_table(&table),
            vec![TableError::DuplicateOption("np".to_string())]
        );
    }

    #[test]
    fn test_disabled_duplicate_is_allowed() {
        let table = OptionTable::new("t")
            .with_option(OptionDescriptor::boolean("np", flag()))
            .with_option(OptionDescriptor::boolean("np", flag()).disabled());
        assert!(validate_table(&table).is_empty());
    }

    #[test]
    fn test_rejects_boolean_with_value() {
        let table =
            OptionTable::new("t").with_option(OptionDescriptor::boolean("np", flag()).expects_value());
        assert_eq!(
            validate_table(&table),
            vec![TableError::BooleanTakesValue("np".to_string())]
        );
    }
}
