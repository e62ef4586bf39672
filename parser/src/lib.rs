//! Table-driven command-line argument parsing for plotting applications.
//!
//! The parser scans an argument vector against one or two
//! [`OptionTable`](plotargs_core::OptionTable)s: an optional
//! caller-supplied table (consulted first) and the built-in plot option
//! table from [`builtin`]. Matched options are dispatched to their bound
//! targets and consumed tokens are compacted out of the vector, leaving
//! the application's own positional arguments behind.
//!
//! # Examples
//!
//! ```
//! use plotargs_core::ParseMode;
//! use plotargs_parser::builtin::{PlotSettings, parse_internal_opts};
//!
//! let settings = PlotSettings::new();
//! let mut args: Vec<String> = ["plotdemo", "-dev", "png", "data.dat"]
//!     .map(String::from)
//!     .to_vec();
//!
//! parse_internal_opts(&mut args, ParseMode::default().quiet(), &settings)?;
//! assert_eq!(settings.device.borrow().as_deref(), Some("png"));
//! assert_eq!(args, vec!["plotdemo".to_string(), "data.dat".to_string()]);
//! # Ok::<(), plotargs_parser::ParseError>(())
//! ```

pub mod builtin;
pub mod usage;

mod dispatch;
mod error;
mod matcher;
mod session;

pub use error::ParseError;
pub use session::{DEFAULT_PROGRAM, ParseOutcome, ParseSession};

pub use builtin::{PlotSettings, parse_internal_opts, set_option};
