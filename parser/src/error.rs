//! Parse error types.

use plotargs_core::TableError;
use thiserror::Error;

/// Errors surfaced by a parse session.
///
/// User-input errors (`UnrecognizedOption`, `MissingArgument`) are reported
/// through the usage handler unless quiet mode is set; configuration errors
/// (`Table`) are always reported. In full mode any of these terminates the
/// process instead of being returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A token carrying the flag marker matched no enabled table entry.
    #[error("unrecognized option {0}")]
    UnrecognizedOption(String),
    /// An argument-requiring option was last, or followed by another flag.
    #[error("argument missing for -{0} option")]
    MissingArgument(String),
    /// The option table itself is misconfigured.
    #[error(transparent)]
    Table(#[from] TableError),
    /// A handler reported a failure.
    #[error("processing of -{option} failed: {message}")]
    HandlerFailed {
        /// Option name without the leading dash.
        option: String,
        /// Handler-supplied failure message.
        message: String,
    },
    /// A handler halted the scan while the halt-is-error policy is set.
    #[error("parsing halted by -{0}")]
    Halted(String),
}
