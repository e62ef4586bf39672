//! Override collision overlay.
//!
//! Override mode suppresses built-in options whose names collide with
//! caller-table options. Rather than flipping enabled bits on a shared
//! table (a process-wide side effect), the collision set is computed fresh
//! for each parse session and consulted by the matcher as an overlay.

use std::collections::HashSet;

use crate::OptionTable;

/// Names of enabled built-in entries shadowed by an enabled caller entry.
///
/// # Examples
///
/// ```
/// use std::cell::{Cell, RefCell};
/// use std::rc::Rc;
/// use plotargs_core::{OptionDescriptor, OptionTable, collision_mask};
///
/// let flag = Rc::new(Cell::new(false));
/// let slot = Rc::new(RefCell::new(None));
/// let builtin = OptionTable::new("plot")
///     .with_option(OptionDescriptor::string("dev", Rc::clone(&slot)))
///     .with_option(OptionDescriptor::boolean("np", Rc::clone(&flag)));
/// let caller = OptionTable::new("demo")
///     .with_option(OptionDescriptor::string("dev", Rc::clone(&slot)));
///
/// let mask = collision_mask(&builtin, &caller);
/// assert!(mask.contains("dev"));
/// assert!(!mask.contains("np"));
/// ```
pub fn collision_mask(builtin: &OptionTable, caller: &OptionTable) -> HashSet<String> {
    let caller_names: HashSet<&str> = caller
        .entries
        .iter()
        .filter(|opt| opt.enabled)
        .map(|opt| opt.name.as_str())
        .collect();

    builtin
        .entries
        .iter()
        .filter(|opt| opt.enabled && caller_names.contains(opt.name.as_str()))
        .map(|opt| opt.name.clone())
        .collect()
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
    fn test_disabled_caller_entries_do_not_mask() {
        let builtin =
            OptionTable::new("plot").with_option(OptionDescriptor::boolean("dev", flag()));
        let caller =
            OptionTable::new("demo").with_option(OptionDescriptor::boolean("dev", flag()).disabled());

        assert!(collision_mask(&builtin, &caller).is_empty());
    }

    #[test]
    fn test_mask_covers_only_collisions() {
        let builtin = OptionTable::new("plot")
            .with_option(OptionDescriptor::boolean("dev", flag()))
            .with_option(OptionDescriptor::boolean("o", flag()))
            .with_option(OptionDescriptor::boolean("np", flag()));
        let caller = OptionTable::new("demo")
            .with_option(OptionDescriptor::boolean("dev", flag()))
            .with_option(OptionDescriptor::boolean("save", flag()));

        let mask = collision_mask(&builtin, &caller);
        assert_eq!(mask.len(), 1);
        assert!(mask.contains("dev"));
    }
}
