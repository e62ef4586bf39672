//! Parse session: the token scan loop and argument compaction.

use std::collections::HashSet;
use std::process;

use plotargs_core::{HandlerOutcome, OptionTable, ParseMode, collision_mask, validate_table};
use tracing::debug;

use crate::dispatch::apply_action;
use crate::error::ParseError;
use crate::matcher::{TableView, is_flag_token, value_looks_like_flag};
use crate::usage;

/// Program name used when none has been captured from the argument list.
pub const DEFAULT_PROGRAM: &str = "<user program>";

/// How a successful parse ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every token was scanned.
    Completed,
    /// A handler (help/version style) ended the scan early; remaining
    /// tokens were left untouched.
    Halted {
        /// Name of the halting option, without the leading dash.
        option: String,
    },
}

/// One parse invocation over a caller table and/or the built-in table.
///
/// A session is constructed fresh per parse call and holds only borrowed,
/// read-only tables; the override overlay is computed per session, so
/// parsing never mutates shared table state. The argument vector is
/// compacted in place: consumed tokens are removed (unless no-delete
/// applies), retained tokens keep their relative order.
///
/// In full mode any parse error terminates the process with exit code 1
/// after the usage report; otherwise errors are returned to the caller
/// with all unscanned tokens left in place.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use plotargs_core::{OptionDescriptor, OptionTable, ParseMode};
/// use plotargs_parser::{ParseOutcome, ParseSession};
///
/// let device = Rc::new(RefCell::new(None));
/// let table = OptionTable::new("plot")
///     .with_option(OptionDescriptor::string("dev", Rc::clone(&device)));
///
/// let mut args: Vec<String> = ["-dev", "png", "data.dat"]
///     .map(String::from)
///     .to_vec();
/// let mut session = ParseSession::new(ParseMode::default().no_program())
///     .with_builtin(&table);
///
/// assert_eq!(session.parse(&mut args), Ok(ParseOutcome::Completed));
/// assert_eq!(device.borrow().as_deref(), Some("png"));
/// assert_eq!(args, vec!["data.dat".to_string()]);
/// ```
pub struct ParseSession<'t> {
    mode: ParseMode,
    builtin: Option<&'t OptionTable>,
    caller: Option<&'t OptionTable>,
    usage_handler: Option<Box<dyn Fn(&str) + 't>>,
    program: String,
    matched: usize,
}

impl<'t> ParseSession<'t> {
    /// Creates a session with the given mode and no tables.
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            builtin: None,
            caller: None,
            usage_handler: None,
            program: DEFAULT_PROGRAM.to_string(),
            matched: 0,
        }
    }

    /// Attaches the built-in table, consulted after the caller table.
    pub fn with_builtin(mut self, table: &'t OptionTable) -> Self {
        self.builtin = Some(table);
        self
    }

    /// Attaches a caller-supplied table, consulted first.
    pub fn with_caller(mut self, table: &'t OptionTable) -> Self {
        self.caller = Some(table);
        self
    }

    /// Replaces the default stderr usage report with a caller handler.
    ///
    /// The handler receives the offending token, or an empty string for
    /// missing-argument reports.
    pub fn with_usage_handler(mut self, handler: impl Fn(&str) + 't) -> Self {
        self.usage_handler = Some(Box::new(handler));
        self
    }

    /// Program name captured from the argument list, or a placeholder.
    pub fn program_name(&self) -> &str {
        &self.program
    }

    /// Number of options matched by the last [`parse`](Self::parse) call.
    pub fn matched_count(&self) -> usize {
        self.matched
    }

    /// Scans and compacts the argument list.
    pub fn parse(&mut self, args: &mut Vec<String>) -> Result<ParseOutcome, ParseError> {
        for table in [self.caller, self.builtin].into_iter().flatten() {
            if let Some(error) = validate_table(table).into_iter().next() {
                // configuration errors ignore quiet mode
                eprintln!("{} option table misconfigured: {error}", table.label);
                if self.mode.full {
                    process::exit(1);
                }
                return Err(ParseError::Table(error));
            }
        }

        let masked = match (self.mode.override_builtins, self.builtin, self.caller) {
            (true, Some(builtin), Some(caller)) => collision_mask(builtin, caller),
            _ => HashSet::new(),
        };
        let view = TableView::new(self.caller, self.builtin, masked);

        let tokens = std::mem::take(args);
        let mut retained: Vec<String> = Vec::with_capacity(tokens.len());
        let mut index = 0;
        self.matched = 0;

        if !self.mode.no_program {
            if let Some(first) = tokens.first() {
                self.program = first.clone();
                retained.push(first.clone());
                index = 1;
            }
        }

        let mut outcome = ParseOutcome::Completed;
        let mut failure = None;

        while index < tokens.len() {
            let token = &tokens[index];
            let matched = if is_flag_token(token) {
                view.find(&token[1..])
            } else {
                None
            };

            let Some(desc) = matched else {
                retained.push(token.clone());
                index += 1;
                if self.mode.full && !self.mode.skip_unrecognized {
                    if !self.mode.quiet {
                        self.report_usage(&view, token);
                    }
                    failure = Some(ParseError::UnrecognizedOption(token.clone()));
                    break;
                }
                continue;
            };

            self.matched += 1;
            let keep = self.mode.no_delete || desc.retain;
            if keep {
                retained.push(token.clone());
            }

            let mut value = None;
            if desc.requires_value() {
                match tokens
                    .get(index + 1)
                    .filter(|next| !value_looks_like_flag(next))
                {
                    Some(next) => {
                        if keep {
                            retained.push(next.clone());
                        }
                        value = Some(next.as_str());
                        index += 1;
                    }
                    None => {
                        if !self.mode.quiet {
                            eprintln!("Argument missing for -{} option.", desc.name);
                            self.report_usage(&view, "");
                        }
                        index += 1;
                        failure = Some(ParseError::MissingArgument(desc.name.clone()));
                        break;
                    }
                }
            }
            index += 1;

            debug!(option = %desc.name, value = ?value, "matched option");

            match apply_action(desc, value) {
                Ok(HandlerOutcome::Continue) => {}
                Ok(HandlerOutcome::Halt) => {
                    debug!(option = %desc.name, "handler halted the scan");
                    if self.mode.halt_is_error {
                        failure = Some(ParseError::Halted(desc.name.clone()));
                    } else {
                        outcome = ParseOutcome::Halted {
                            option: desc.name.clone(),
                        };
                    }
                    break;
                }
                Err(error) => {
                    failure = Some(error);
                    break;
                }
            }
        }

        debug!(
            scanned = index,
            matched = self.matched,
            "argument scan finished"
        );
        retained.extend(tokens.into_iter().skip(index));
        *args = retained;

        match failure {
            Some(error) => {
                if self.mode.full {
                    process::exit(1);
                }
                Err(error)
            }
            None => Ok(outcome),
        }
    }

    fn label(&self) -> &str {
        self.builtin
            .or(self.caller)
            .map(|table| table.label.as_str())
            .unwrap_or("")
    }

    fn report_usage(&self, view: &TableView<'_>, bad_option: &str) {
        if let Some(handler) = &self.usage_handler {
            handler(bad_option);
            return;
        }
        let entries = view.help_entries();
        eprint!(
            "{}",
            usage::usage_banner(
                &self.program,
                self.label(),
                bad_option,
                &entries,
                self.mode.show_all,
            )
        );
    }
}
