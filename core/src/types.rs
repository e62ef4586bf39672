//! Option descriptor and parse mode definitions.
//!
//! This module defines the data model consulted during parsing: a typed
//! [`OptAction`] per option (replacing the classic untyped mode-bit/void
//! pointer pairing), the [`OptionDescriptor`] table row, and the
//! [`ParseMode`] flags that govern a whole parse invocation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Result of invoking an option handler.
///
/// `Halt` is the explicit "stop parsing, not an error" signal used by
/// help/version style options. Whether a halt is reported to the caller as
/// success or failure is decided by [`ParseMode::halt_is_error`], not by the
/// handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Keep scanning the remaining arguments.
    Continue,
    /// Stop scanning; remaining arguments are left untouched.
    Halt,
}

/// Callback invoked for [`OptAction::Call`] options.
///
/// Receives the option name (without the leading dash) and the extracted
/// argument, if the option takes one. An `Err` message is surfaced as a
/// handler failure by the parser.
pub type HandlerFn = Rc<dyn Fn(&str, Option<&str>) -> Result<HandlerOutcome, String>>;

/// Processing action bound to an option.
///
/// Exactly one action per descriptor, with its target carried in the
/// variant, so "exactly one processing kind" holds by construction. Bound
/// variables are shared cells: the table keeps one handle, the embedding
/// application keeps another and reads the value after parsing.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use plotargs_core::{OptAction, OptionDescriptor};
///
/// let width = Rc::new(Cell::new(0i64));
/// let opt = OptionDescriptor::integer("width", Rc::clone(&width));
/// assert!(matches!(opt.action, OptAction::ParseInt(_)));
/// assert!(opt.requires_value());
/// ```
#[derive(Clone)]
pub enum OptAction {
    /// Invoke the handler with (name, argument).
    Call(HandlerFn),
    /// Store `true` into the bound flag.
    SetBool(Rc<Cell<bool>>),
    /// Parse the argument as an integer (malformed text yields zero).
    ParseInt(Rc<Cell<i64>>),
    /// Parse the argument as a float (malformed text yields zero).
    ParseFloat(Rc<Cell<f64>>),
    /// Store the argument string, overwriting any previous value.
    StoreString(Rc<RefCell<Option<String>>>),
}

impl fmt::Debug for OptAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            OptAction::Call(_) => "Call",
            OptAction::SetBool(_) => "SetBool",
            OptAction::ParseInt(_) => "ParseInt",
            OptAction::ParseFloat(_) => "ParseFloat",
            OptAction::StoreString(_) => "StoreString",
        };
        f.write_str(kind)
    }
}

/// One row of an option table.
///
/// The name is stored without its leading dash. Use the per-action
/// constructors ([`handler`](OptionDescriptor::handler),
/// [`boolean`](OptionDescriptor::boolean), and friends), then chain builder
/// methods for syntax text, help text, and per-option flags.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use plotargs_core::OptionDescriptor;
///
/// let color = Rc::new(Cell::new(false));
/// let opt = OptionDescriptor::boolean("color", Rc::clone(&color))
///     .with_syntax("-color")
///     .with_help("Enables color output");
/// assert_eq!(opt.name, "color");
/// assert!(!opt.requires_value());
/// assert!(opt.enabled);
/// ```
#[derive(Debug, Clone)]
pub struct OptionDescriptor {
    /// Option name, matched against tokens with the leading dash stripped.
    pub name: String,
    /// Processing action and its bound target.
    pub action: OptAction,
    /// Whether a handler option consumes a following value token.
    /// Value actions imply this; see [`requires_value`](Self::requires_value).
    pub takes_value: bool,
    /// Disabled entries are skipped by the matcher and omitted from help.
    pub enabled: bool,
    /// Keep the consumed token(s) in the argument list after processing.
    pub retain: bool,
    /// Hidden from usage/help output unless show-all is in effect.
    pub invisible: bool,
    /// Short syntax description (e.g. `-width width`).
    pub syntax: String,
    /// One-line help description.
    pub help: String,
}

impl OptionDescriptor {
    fn new(name: &str, action: OptAction) -> Self {
        Self {
            name: name.to_string(),
            action,
            takes_value: false,
            enabled: true,
            retain: false,
            invisible: false,
            syntax: format!("-{name}"),
            help: String::new(),
        }
    }

    /// Creates a handler option. Call [`expects_value`](Self::expects_value)
    /// if the handler expects a following argument token.
    pub fn handler(
        name: &str,
        f: impl Fn(&str, Option<&str>) -> Result<HandlerOutcome, String> + 'static,
    ) -> Self {
        Self::new(name, OptAction::Call(Rc::new(f)))
    }

    /// Creates a boolean option that sets the bound flag to `true`.
    pub fn boolean(name: &str, flag: Rc<Cell<bool>>) -> Self {
        Self::new(name, OptAction::SetBool(flag))
    }

    /// Creates an option that parses its argument as an integer.
    pub fn integer(name: &str, target: Rc<Cell<i64>>) -> Self {
        Self::new(name, OptAction::ParseInt(target))
    }

    /// Creates an option that parses its argument as a float.
    pub fn float(name: &str, target: Rc<Cell<f64>>) -> Self {
        Self::new(name, OptAction::ParseFloat(target))
    }

    /// Creates an option that stores its argument string.
    pub fn string(name: &str, slot: Rc<RefCell<Option<String>>>) -> Self {
        Self::new(name, OptAction::StoreString(slot))
    }

    /// Marks a handler option as consuming a following value token.
    pub fn expects_value(mut self) -> Self {
        self.takes_value = true;
        self
    }

    /// Sets the syntax text shown in usage output.
    pub fn with_syntax(mut self, syntax: &str) -> Self {
        self.syntax = syntax.to_string();
        self
    }

    /// Sets the help description.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Keeps the consumed token(s) in the argument list after processing.
    pub fn retained(mut self) -> Self {
        self.retain = true;
        self
    }

    /// Hides the option from usage/help output unless show-all is set.
    pub fn invisible(mut self) -> Self {
        self.invisible = true;
        self
    }

    /// Registers the option disabled; the matcher skips it entirely.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether matching this option consumes the next argument token.
    ///
    /// Integer, float, and string actions always take a value; boolean
    /// actions never do; handler actions follow the `takes_value` flag.
    pub fn requires_value(&self) -> bool {
        match self.action {
            OptAction::Call(_) => self.takes_value,
            OptAction::SetBool(_) => false,
            OptAction::ParseInt(_) | OptAction::ParseFloat(_) | OptAction::StoreString(_) => true,
        }
    }
}

/// Usage/help metadata for one enabled option.
///
/// A plain snapshot of the renderable parts of a descriptor, detached from
/// its action so help renderers (and help handlers inside the table itself)
/// need no access to live table state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpEntry {
    /// Syntax text, e.g. `-width width`.
    pub syntax: String,
    /// One-line description.
    pub help: String,
    /// Whether the option is hidden unless show-all is in effect.
    pub invisible: bool,
}

/// Flags governing one whole parse invocation.
///
/// Builder-style setters flip individual flags; the default has everything
/// off.
///
/// # Examples
///
/// ```
/// use plotargs_core::ParseMode;
///
/// let mode = ParseMode::default().quiet().no_delete().no_program();
/// assert!(mode.quiet && mode.no_delete && mode.no_program);
/// assert!(!mode.full);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseMode {
    /// Strict mode: any parse error terminates the process with exit code 1.
    pub full: bool,
    /// Suppress messages for user-input errors (configuration errors are
    /// always reported).
    pub quiet: bool,
    /// Retain all consumed tokens instead of compacting them away.
    pub no_delete: bool,
    /// Include invisible options in usage/help output.
    pub show_all: bool,
    /// The first token is not a program name.
    pub no_program: bool,
    /// Mask built-in options whose names collide with caller-table options.
    pub override_builtins: bool,
    /// Retain unrecognized tokens and keep scanning, even in full mode.
    pub skip_unrecognized: bool,
    /// Treat a handler halt (help/version) as a failure instead of a
    /// successful early termination.
    pub halt_is_error: bool,
}

impl ParseMode {
    /// Enables strict exit-on-error mode.
    pub fn full(mut self) -> Self {
        self.full = true;
        self
    }

    /// Suppresses user-input error messages.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Retains all consumed tokens in the argument list.
    pub fn no_delete(mut self) -> Self {
        self.no_delete = true;
        self
    }

    /// Includes invisible options in usage/help output.
    pub fn show_all(mut self) -> Self {
        self.show_all = true;
        self
    }

    /// Treats the first token as an ordinary argument, not a program name.
    pub fn no_program(mut self) -> Self {
        self.no_program = true;
        self
    }

    /// Masks built-in options that collide with caller-table options.
    pub fn override_builtins(mut self) -> Self {
        self.override_builtins = true;
        self
    }

    /// Retains unrecognized tokens without failing, even in full mode.
    pub fn skip_unrecognized(mut self) -> Self {
        self.skip_unrecognized = true;
        self
    }

    /// Reports handler halts as failures.
    pub fn halt_is_error(mut self) -> Self {
        self.halt_is_error = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_actions_require_value() {
        let slot = Rc::new(RefCell::new(None));
        assert!(OptionDescriptor::string("o", slot).requires_value());

        let cell = Rc::new(Cell::new(0i64));
        assert!(OptionDescriptor::integer("ori", cell).requires_value());

        let cell = Rc::new(Cell::new(0.0f64));
        assert!(OptionDescriptor::float("a", cell).requires_value());
    }

    #[test]
    fn test_boolean_never_requires_value() {
        let flag = Rc::new(Cell::new(false));
        let opt = OptionDescriptor::boolean("np", flag);
        assert!(!opt.requires_value());
    }

    #[test]
    fn test_handler_requires_value_only_when_flagged() {
        let plain = OptionDescriptor::handler("h", |_, _| Ok(HandlerOutcome::Halt));
        assert!(!plain.requires_value());

        let with_value =
            OptionDescriptor::handler("dev", |_, _| Ok(HandlerOutcome::Continue)).expects_value();
        assert!(with_value.requires_value());
    }

    #[test]
    fn test_builder_flags() {
        let flag = Rc::new(Cell::new(false));
        let opt = OptionDescriptor::boolean("showall", flag)
            .invisible()
            .retained()
            .with_syntax("-showall")
            .with_help("Turns on invisible options");

        assert!(opt.invisible);
        assert!(opt.retain);
        assert!(opt.enabled);
        assert_eq!(opt.syntax, "-showall");
    }

    #[test]
    fn test_default_syntax_is_dashed_name() {
        let flag = Rc::new(Cell::new(false));
        let opt = OptionDescriptor::boolean("fam", flag);
        assert_eq!(opt.syntax, "-fam");
    }
}
