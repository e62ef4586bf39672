//! Token classification and two-table option lookup.

use std::collections::HashSet;

use plotargs_core::{HelpEntry, OptionDescriptor, OptionTable};

/// Whether a token enters the flag-matching path at all.
pub(crate) fn is_flag_token(token: &str) -> bool {
    token.starts_with('-')
}

/// Whether a candidate value token must be rejected as a flag.
///
/// Only a dash followed by an ASCII letter counts: `-0.5` or `--` are
/// legitimate values for an argument-requiring option.
pub(crate) fn value_looks_like_flag(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Read-only view over the caller and built-in tables for one session.
///
/// Lookup order is caller table first, then the built-in table with the
/// override mask applied. Disabled entries are skipped everywhere.
pub(crate) struct TableView<'t> {
    caller: Option<&'t OptionTable>,
    builtin: Option<&'t OptionTable>,
    masked: HashSet<String>,
}

impl<'t> TableView<'t> {
    pub(crate) fn new(
        caller: Option<&'t OptionTable>,
        builtin: Option<&'t OptionTable>,
        masked: HashSet<String>,
    ) -> Self {
        Self {
            caller,
            builtin,
            masked,
        }
    }

    /// Finds the first enabled, unmasked descriptor with the given name.
    pub(crate) fn find(&self, name: &str) -> Option<&'t OptionDescriptor> {
        if let Some(found) = self.caller.and_then(|table| table.find(name)) {
            return Some(found);
        }
        if self.masked.contains(name) {
            return None;
        }
        self.builtin.and_then(|table| table.find(name))
    }

    /// Help entries across both tables, caller entries first, with masked
    /// built-in entries omitted.
    pub(crate) fn help_entries(&self) -> Vec<HelpEntry> {
        let mut entries = Vec::new();
        if let Some(caller) = self.caller {
            entries.extend(caller.help_entries());
        }
        if let Some(builtin) = self.builtin {
            entries.extend(
                builtin
                    .entries
                    .iter()
                    .filter(|opt| opt.enabled && !self.masked.contains(opt.name.as_str()))
                    .map(|opt| HelpEntry {
                        syntax: opt.syntax.clone(),
                        help: opt.help.clone(),
                        invisible: opt.invisible,
                    }),
            );
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use plotargs_core::OptionDescriptor;

    use super::*;

    fn flag() -> Rc<Cell<bool>> {
        Rc::new(Cell::new(false))
    }

    #[test]
    fn test_value_flag_pattern_requires_letter() {
        assert!(value_looks_like_flag("-a"));
        assert!(value_looks_like_flag("-dev"));
        assert!(!value_looks_like_flag("-0.5"));
        assert!(!value_looks_like_flag("-9"));
        assert!(!value_looks_like_flag("--"));
        assert!(!value_looks_like_flag("-"));
        assert!(!value_looks_like_flag("plain"));
    }

    #[test]
    fn test_caller_table_shadows_builtin() {
        let builtin = OptionTable::new("plot")
            .with_option(OptionDescriptor::boolean("dev", flag()).with_help("builtin"));
        let caller = OptionTable::new("demo")
            .with_option(OptionDescriptor::boolean("dev", flag()).with_help("caller"));

        let view = TableView::new(Some(&caller), Some(&builtin), HashSet::new());
        assert_eq!(view.find("dev").map(|o| o.help.as_str()), Some("caller"));
    }

    #[test]
    fn test_mask_hides_builtin_entry() {
        let builtin =
            OptionTable::new("plot").with_option(OptionDescriptor::boolean("dev", flag()));
        let mask: HashSet<String> = ["dev".to_string()].into_iter().collect();

        let view = TableView::new(None, Some(&builtin), mask);
        assert!(view.find("dev").is_none());
        assert!(view.help_entries().is_empty());
    }
}
