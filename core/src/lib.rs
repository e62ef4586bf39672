//! Core option-table types for the plotargs parser.
//!
//! This crate defines the foundational types for table-driven command-line
//! option parsing:
//!
//! - [`OptionDescriptor`] — one table row: name, typed [`OptAction`], mode
//!   flags, syntax and help text.
//! - [`OptionTable`] — an ordered sequence of descriptors with usage notes.
//! - [`ParseMode`] — flags governing a whole parse invocation (strict mode,
//!   quiet mode, compaction control, override masking, halt policy).
//! - [`HelpEntry`] / [`TableSummary`] — serializable renderable metadata.
//!
//! Validation ([`validate_table`]) catches table configuration errors such
//! as duplicate enabled names before a scan starts, and
//! [`collision_mask`] computes the per-session override overlay that
//! replaces in-place mutation of a shared built-in table.
//!
//! # Example
//!
//! ```
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//! use plotargs_core::*;
//!
//! let pause = Rc::new(Cell::new(false));
//! let device = Rc::new(RefCell::new(None));
//!
//! let table = OptionTable::new("plot")
//!     .with_option(
//!         OptionDescriptor::boolean("np", Rc::clone(&pause))
//!             .with_help("No pause between pages"),
//!     )
//!     .with_option(
//!         OptionDescriptor::string("dev", Rc::clone(&device))
//!             .with_syntax("-dev name")
//!             .with_help("Output device name"),
//!     );
//!
//! assert!(validate_table(&table).is_empty());
//! assert!(table.find("dev").unwrap().requires_value());
//! ```

mod overlay;
mod table;
mod types;
mod validate;

pub use overlay::collision_mask;
pub use table::{OptionTable, TableSummary};
pub use types::*;
pub use validate::{TableError, validate_table};
