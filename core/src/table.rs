//! Ordered option tables.

use serde::{Deserialize, Serialize};

use crate::{HelpEntry, OptionDescriptor};

/// An ordered sequence of option descriptors.
///
/// Declaration order is matching order: the matcher returns the first
/// enabled entry whose name equals the token. Tables are read-only during
/// parsing; override masking is computed per session instead of flipping
/// entry flags in place.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use plotargs_core::{OptionDescriptor, OptionTable};
///
/// let pause = Rc::new(Cell::new(false));
/// let table = OptionTable::new("plot")
///     .with_option(
///         OptionDescriptor::boolean("np", Rc::clone(&pause))
///             .with_help("No pause between pages"),
///     )
///     .with_note("All parameters must be white-space delimited.");
///
/// assert_eq!(table.len(), 1);
/// assert!(table.find("np").is_some());
/// assert!(table.find("dev").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    /// Short label used in usage headings (e.g. `plot`).
    pub label: String,
    /// Descriptors in declaration order.
    pub entries: Vec<OptionDescriptor>,
    /// Free-form usage notes printed after the help listing.
    pub notes: Vec<String>,
}

impl OptionTable {
    /// Creates an empty table with the given label.
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Default::default()
        }
    }

    /// Appends an option.
    pub fn with_option(mut self, option: OptionDescriptor) -> Self {
        self.entries.push(option);
        self
    }

    /// Appends a usage note line.
    pub fn with_note(mut self, note: &str) -> Self {
        self.notes.push(note.to_string());
        self
    }

    /// Finds the first enabled entry with the given name.
    pub fn find(&self, name: &str) -> Option<&OptionDescriptor> {
        self.entries
            .iter()
            .find(|opt| opt.enabled && opt.name == name)
    }

    /// Number of entries, enabled or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the renderable metadata of all enabled entries, in
    /// declaration order.
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.entries
            .iter()
            .filter(|opt| opt.enabled)
            .map(|opt| HelpEntry {
                syntax: opt.syntax.clone(),
                help: opt.help.clone(),
                invisible: opt.invisible,
            })
            .collect()
    }

    /// Summary of the table suitable for serialization (e.g. documentation
    /// exports); actions and bindings are omitted.
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            label: self.label.clone(),
            options: self.help_entries(),
            notes: self.notes.clone(),
        }
    }
}

/// Serializable view of a table's renderable metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Table label.
    pub label: String,
    /// Help entries for enabled options, in declaration order.
    pub options: Vec<HelpEntry>,
    /// Usage notes.
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_find_skips_disabled_entries() {
        let a = Rc::new(Cell::new(false));
        let b = Rc::new(Cell::new(false));
        let table = OptionTable::new("plot")
            .with_option(OptionDescriptor::boolean("dev", Rc::clone(&a)).disabled())
            .with_option(OptionDescriptor::boolean("np", Rc::clone(&b)));

        assert!(table.find("dev").is_none());
        assert!(table.find("np").is_some());
    }

    #[test]
    fn test_find_returns_first_match_in_declaration_order() {
        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));
        let table = OptionTable::new("plot")
            .with_option(OptionDescriptor::boolean("fam", Rc::clone(&first)).with_help("first"))
            .with_option(OptionDescriptor::boolean("fam", Rc::clone(&second)).with_help("second"));

        assert_eq!(table.find("fam").map(|o| o.help.as_str()), Some("first"));
    }

    #[test]
    fn test_help_entries_exclude_disabled_but_keep_invisible() {
        let flag = Rc::new(Cell::new(false));
        let table = OptionTable::new("plot")
            .with_option(OptionDescriptor::boolean("color", Rc::clone(&flag)))
            .with_option(OptionDescriptor::boolean("geo", Rc::clone(&flag)).invisible())
            .with_option(OptionDescriptor::boolean("old", Rc::clone(&flag)).disabled());

        let entries = table.help_entries();
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].invisible);
        assert!(entries[1].invisible);
    }
}
