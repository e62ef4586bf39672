//! Built-in plot option table and its handlers.
//!
//! The library ships one table of plot-level options (`-dev`, `-geometry`,
//! `-width`, ...) whose targets live in a shared [`PlotSettings`] record.
//! Embedding applications layer their own table on top of it via
//! [`ParseSession::with_caller`], optionally masking collisions with
//! override mode.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use plotargs_core::{HandlerOutcome, HelpEntry, OptionDescriptor, OptionTable, ParseMode};

use crate::dispatch::{parse_float_lenient, parse_int_lenient};
use crate::error::ParseError;
use crate::session::{DEFAULT_PROGRAM, ParseOutcome, ParseSession};
use crate::usage;

/// Version string printed by the `-v` option.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Notes trailer printed after the `-h` listing.
pub const PLOT_NOTES: &[&str] = &[
    "All parameters must be white-space delimited.  Some options are driver",
    "dependent.  Please see the plotargs reference document for more detail.",
];

static GEOMETRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)x(\d+)([+-]\d+)?([+-]\d+)?$").expect("static regex must compile")
});

/// Output window geometry, e.g. `400x300+100+0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Window width in pixels.
    pub width: i64,
    /// Window height in pixels.
    pub height: i64,
    /// Horizontal offset in pixels.
    pub x_offset: i64,
    /// Vertical offset in pixels.
    pub y_offset: i64,
}

/// Background color parsed from a `rrggbb` hex string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parses a geometry string of the form `WxH`, `WxH+X`, or `WxH+X+Y`.
///
/// Offsets may be signed; width and height must be nonzero.
///
/// # Examples
///
/// ```
/// use plotargs_parser::builtin::parse_geometry;
///
/// let geo = parse_geometry("400x300+100+0").unwrap();
/// assert_eq!((geo.width, geo.height), (400, 300));
/// assert_eq!((geo.x_offset, geo.y_offset), (100, 0));
///
/// assert!(parse_geometry("0x300").is_err());
/// assert!(parse_geometry("400by300").is_err());
/// ```
pub fn parse_geometry(text: &str) -> Result<PageGeometry, String> {
    let caps = GEOMETRY_RE
        .captures(text.trim())
        .ok_or_else(|| format!("invalid geometry {text:?}"))?;

    let field = |i: usize| caps.get(i).map_or(0, |m| parse_int_lenient(m.as_str()));
    let geometry = PageGeometry {
        width: field(1),
        height: field(2),
        x_offset: field(3),
        y_offset: field(4),
    };

    if geometry.width == 0 || geometry.height == 0 {
        return Err(format!("invalid geometry {text:?}: zero width or height"));
    }
    Ok(geometry)
}

/// Parses a `rrggbb` hex color; malformed text yields black.
pub fn parse_background(text: &str) -> Rgb {
    let packed = i64::from_str_radix(text.trim(), 16).unwrap_or(0);
    Rgb {
        r: ((packed >> 16) & 0xFF) as u8,
        g: ((packed >> 8) & 0xFF) as u8,
        b: (packed & 0xFF) as u8,
    }
}

/// Targets for the built-in plot option table.
///
/// Fields are shared cells: [`builtin_table`] binds one handle into each
/// descriptor and the application keeps the record to read the parsed
/// values afterwards. Cloning the record clones the handles, not the
/// values.
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// Output device name (`-dev`).
    pub device: Rc<RefCell<Option<String>>>,
    /// Output file name (`-o`).
    pub output: Rc<RefCell<Option<String>>>,
    /// X server to contact (`-display`).
    pub display: Rc<RefCell<Option<String>>>,
    /// Plot server name (`-plserver`).
    pub server: Rc<RefCell<Option<String>>>,
    /// Plot container window name (`-plwindow`).
    pub window: Rc<RefCell<Option<String>>>,
    /// Output window geometry (`-geometry` / `-geo`).
    pub geometry: Rc<RefCell<Option<PageGeometry>>>,
    /// Plot aspect ratio (`-a`).
    pub aspect: Rc<Cell<f64>>,
    /// Plot orientation (`-ori`; 0,2 landscape / 1,3 portrait).
    pub orientation: Rc<Cell<i64>>,
    /// Default pen width (`-width`).
    pub pen_width: Rc<Cell<i64>>,
    /// Color output enabled (`-color`).
    pub color: Rc<Cell<bool>>,
    /// Background color (`-bg`).
    pub background: Rc<Cell<Rgb>>,
    /// Family output files enabled (`-fam`).
    pub family: Rc<Cell<bool>>,
    /// Family member file size in bytes (`-fsiz`, given in MB).
    pub family_size: Rc<Cell<i64>>,
    /// No pause between pages (`-np`).
    pub no_pause: Rc<Cell<bool>>,
    /// Plots per page in x (`-px`).
    pub subpages_x: Rc<Cell<i64>>,
    /// Plots per page in y (`-py`).
    pub subpages_y: Rc<Cell<i64>>,
    /// Bytes sent before flushing output (`-bufmax`).
    pub buffer_max: Rc<Cell<i64>>,
    /// Show invisible options in help output (`-showall`).
    pub show_all: Rc<Cell<bool>>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            device: Rc::default(),
            output: Rc::default(),
            display: Rc::default(),
            server: Rc::default(),
            window: Rc::default(),
            geometry: Rc::default(),
            aspect: Rc::default(),
            orientation: Rc::default(),
            pen_width: Rc::new(Cell::new(1)),
            color: Rc::default(),
            background: Rc::default(),
            family: Rc::default(),
            family_size: Rc::default(),
            no_pause: Rc::default(),
            subpages_x: Rc::new(Cell::new(1)),
            subpages_y: Rc::new(Cell::new(1)),
            buffer_max: Rc::default(),
            show_all: Rc::default(),
        }
    }
}

impl PlotSettings {
    /// Creates a settings record with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain-value copy of the current settings, for serialization.
    pub fn snapshot(&self) -> PlotSnapshot {
        PlotSnapshot {
            device: self.device.borrow().clone(),
            output: self.output.borrow().clone(),
            display: self.display.borrow().clone(),
            server: self.server.borrow().clone(),
            window: self.window.borrow().clone(),
            geometry: *self.geometry.borrow(),
            aspect: self.aspect.get(),
            orientation: self.orientation.get(),
            pen_width: self.pen_width.get(),
            color: self.color.get(),
            background: self.background.get(),
            family: self.family.get(),
            family_size: self.family_size.get(),
            no_pause: self.no_pause.get(),
            subpages_x: self.subpages_x.get(),
            subpages_y: self.subpages_y.get(),
            buffer_max: self.buffer_max.get(),
        }
    }
}

/// Serializable snapshot of [`PlotSettings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSnapshot {
    pub device: Option<String>,
    pub output: Option<String>,
    pub display: Option<String>,
    pub server: Option<String>,
    pub window: Option<String>,
    pub geometry: Option<PageGeometry>,
    pub aspect: f64,
    pub orientation: i64,
    pub pen_width: i64,
    pub color: bool,
    pub background: Rgb,
    pub family: bool,
    pub family_size: i64,
    pub no_pause: bool,
    pub subpages_x: i64,
    pub subpages_y: i64,
    pub buffer_max: i64,
}

/// Builds the built-in plot option table bound to `settings`.
///
/// `mode` seeds the `-h`/`-v` handlers (quiet suppresses their output,
/// show-all widens the help listing) and `program` names the usage line
/// printed by `-h`. The returned table is independent of any session and
/// safe to parse against repeatedly.
pub fn builtin_table(settings: &PlotSettings, mode: ParseMode, program: &str) -> OptionTable {
    let help_entries: Rc<RefCell<Vec<HelpEntry>>> = Rc::new(RefCell::new(Vec::new()));

    let opt_h = {
        let entries = Rc::clone(&help_entries);
        let show_all = Rc::clone(&settings.show_all);
        let program = program.to_string();
        move |_: &str, _: Option<&str>| {
            if !mode.quiet {
                let show_all = mode.show_all || show_all.get();
                eprintln!("\nUsage:\n        {program} [plot options]");
                eprint!("\n{}", usage::help_listing("plot", &entries.borrow(), show_all));
                eprint!("{}", usage::notes_block(PLOT_NOTES));
            }
            Ok(HandlerOutcome::Halt)
        }
    };

    let opt_v = move |_: &str, _: Option<&str>| {
        if !mode.quiet {
            eprintln!("\nplotargs library version: {LIBRARY_VERSION}");
        }
        Ok(HandlerOutcome::Halt)
    };

    let geometry_handler = |slot: Rc<RefCell<Option<PageGeometry>>>| {
        move |_: &str, value: Option<&str>| {
            let parsed = parse_geometry(value.unwrap_or(""))?;
            *slot.borrow_mut() = Some(parsed);
            Ok(HandlerOutcome::Continue)
        }
    };

    let opt_width = {
        let target = Rc::clone(&settings.pen_width);
        move |_: &str, value: Option<&str>| {
            let width = parse_int_lenient(value.unwrap_or(""));
            if width == 0 {
                return Err(format!("invalid pen width {:?}", value.unwrap_or("")));
            }
            target.set(width);
            Ok(HandlerOutcome::Continue)
        }
    };

    let opt_bg = {
        let target = Rc::clone(&settings.background);
        move |_: &str, value: Option<&str>| {
            target.set(parse_background(value.unwrap_or("")));
            Ok(HandlerOutcome::Continue)
        }
    };

    let opt_fsiz = {
        let target = Rc::clone(&settings.family_size);
        move |_: &str, value: Option<&str>| {
            let bytes = (parse_float_lenient(value.unwrap_or("")) * 1.0e6) as i64;
            if bytes == 0 {
                return Err(format!("invalid family size {:?}", value.unwrap_or("")));
            }
            target.set(bytes);
            Ok(HandlerOutcome::Continue)
        }
    };

    let table = OptionTable::new("plot")
        .with_option(
            OptionDescriptor::handler("h", opt_h)
                .with_syntax("-h")
                .with_help("Print out this message"),
        )
        .with_option(
            OptionDescriptor::handler("v", opt_v)
                .with_syntax("-v")
                .with_help("Print out the plotargs library version number"),
        )
        .with_option(
            OptionDescriptor::string("dev", Rc::clone(&settings.device))
                .with_syntax("-dev name")
                .with_help("Output device name"),
        )
        .with_option(
            OptionDescriptor::boolean("showall", Rc::clone(&settings.show_all))
                .invisible()
                .with_syntax("-showall")
                .with_help("Turns on invisible options"),
        )
        .with_option(
            OptionDescriptor::string("o", Rc::clone(&settings.output))
                .with_syntax("-o name")
                .with_help("Output filename"),
        )
        .with_option(
            OptionDescriptor::string("display", Rc::clone(&settings.display))
                .with_syntax("-display name")
                .with_help("X server to contact"),
        )
        .with_option(
            OptionDescriptor::integer("px", Rc::clone(&settings.subpages_x))
                .with_syntax("-px number")
                .with_help("Plots per page in x"),
        )
        .with_option(
            OptionDescriptor::integer("py", Rc::clone(&settings.subpages_y))
                .with_syntax("-py number")
                .with_help("Plots per page in y"),
        )
        .with_option(
            OptionDescriptor::handler("geometry", geometry_handler(Rc::clone(&settings.geometry)))
                .expects_value()
                .with_syntax("-geometry geom")
                .with_help("Window size, in pixels (e.g. -geometry 400x300)"),
        )
        .with_option(
            OptionDescriptor::handler("geo", geometry_handler(Rc::clone(&settings.geometry)))
                .expects_value()
                .invisible()
                .with_syntax("-geo geom")
                .with_help("Window size, in pixels (e.g. -geo 400x300)"),
        )
        .with_option(
            OptionDescriptor::float("a", Rc::clone(&settings.aspect))
                .with_syntax("-a aspect")
                .with_help("Plot aspect ratio"),
        )
        .with_option(
            OptionDescriptor::integer("ori", Rc::clone(&settings.orientation))
                .with_syntax("-ori orient")
                .with_help("Plot orientation (0,2=landscape, 1,3=portrait)"),
        )
        .with_option(
            OptionDescriptor::handler("width", opt_width)
                .expects_value()
                .with_syntax("-width width")
                .with_help("Default pen width (1 <= width <= 10)"),
        )
        .with_option(
            OptionDescriptor::boolean("color", Rc::clone(&settings.color))
                .with_syntax("-color")
                .with_help("Enables color output (e.g. for PS driver)"),
        )
        .with_option(
            OptionDescriptor::handler("bg", opt_bg)
                .expects_value()
                .with_syntax("-bg color")
                .with_help("Background color (0=black, FFFFFF=white)"),
        )
        .with_option(
            OptionDescriptor::boolean("fam", Rc::clone(&settings.family))
                .with_syntax("-fam")
                .with_help("Create a family of output files"),
        )
        .with_option(
            OptionDescriptor::handler("fsiz", opt_fsiz)
                .expects_value()
                .with_syntax("-fsiz size")
                .with_help("Output family file size in MB (e.g. -fsiz 1.0)"),
        )
        .with_option(
            OptionDescriptor::boolean("np", Rc::clone(&settings.no_pause))
                .with_syntax("-np")
                .with_help("No pause between pages"),
        )
        .with_option(
            OptionDescriptor::integer("bufmax", Rc::clone(&settings.buffer_max))
                .invisible()
                .with_syntax("-bufmax")
                .with_help("bytes sent before flushing output"),
        )
        .with_option(
            OptionDescriptor::string("plserver", Rc::clone(&settings.server))
                .invisible()
                .with_syntax("-plserver name")
                .with_help("Name of plot server"),
        )
        .with_option(
            OptionDescriptor::string("plwindow", Rc::clone(&settings.window))
                .invisible()
                .with_syntax("-plwindow name")
                .with_help("Name of plot container window"),
        );

    let table = PLOT_NOTES
        .iter()
        .fold(table, |table, note| table.with_note(note));

    // The -h handler renders the table it belongs to; fill its snapshot now
    // that every entry is registered.
    *help_entries.borrow_mut() = table.help_entries();
    table
}

/// Parses the built-in plot options against `settings`.
///
/// Override mode is stripped first: it only applies when a caller table is
/// layered on top of the built-in one.
pub fn parse_internal_opts(
    args: &mut Vec<String>,
    mode: ParseMode,
    settings: &PlotSettings,
) -> Result<ParseOutcome, ParseError> {
    let mode = ParseMode {
        override_builtins: false,
        ..mode
    };
    let program = if mode.no_program {
        None
    } else {
        args.first().cloned()
    };
    let table = builtin_table(settings, mode, program.as_deref().unwrap_or(DEFAULT_PROGRAM));

    ParseSession::new(mode).with_builtin(&table).parse(args)
}

/// Processes a single built-in option and optional argument pair.
///
/// Equivalent to parsing a synthetic two-token argument list with quiet,
/// no-delete, and no-program modes forced on. Unlike a full parse, an
/// unmatched name is reported as [`ParseError::UnrecognizedOption`].
pub fn set_option(
    settings: &PlotSettings,
    name: &str,
    value: Option<&str>,
) -> Result<ParseOutcome, ParseError> {
    let mode = ParseMode::default().quiet().no_delete().no_program();
    let table = builtin_table(settings, mode, DEFAULT_PROGRAM);

    let name = name.trim_start_matches('-');
    let mut args = vec![format!("-{name}")];
    if let Some(value) = value {
        args.push(value.to_string());
    }

    let mut session = ParseSession::new(mode).with_builtin(&table);
    let outcome = session.parse(&mut args)?;
    if session.matched_count() == 0 {
        return Err(ParseError::UnrecognizedOption(format!("-{name}")));
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geometry_variants() {
        assert_eq!(
            parse_geometry("400x300"),
            Ok(PageGeometry {
                width: 400,
                height: 300,
                x_offset: 0,
                y_offset: 0,
            })
        );
        assert_eq!(
            parse_geometry("400x300+100"),
            Ok(PageGeometry {
                width: 400,
                height: 300,
                x_offset: 100,
                y_offset: 0,
            })
        );
        assert_eq!(
            parse_geometry(" 640x480-10+20 "),
            Ok(PageGeometry {
                width: 640,
                height: 480,
                x_offset: -10,
                y_offset: 20,
            })
        );
        assert!(parse_geometry("0x300").is_err());
        assert!(parse_geometry("400x0").is_err());
        assert!(parse_geometry("garbage").is_err());
    }

    #[test]
    fn test_parse_background_hex_and_fallback() {
        assert_eq!(parse_background("FFFF00"), Rgb { r: 255, g: 255, b: 0 });
        assert_eq!(parse_background("0000ff"), Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(parse_background("not-hex"), Rgb::default());
    }

    #[test]
    fn test_parse_internal_opts_fills_settings() {
        let settings = PlotSettings::new();
        let mut args: Vec<String> = [
            "plotdemo", "-dev", "png", "-geometry", "400x300+10+20", "-bg", "00FF00", "-np",
            "out.dat",
        ]
        .map(String::from)
        .to_vec();

        let outcome = parse_internal_opts(&mut args, ParseMode::default().quiet(), &settings)
            .expect("parse should succeed");
        assert_eq!(outcome, ParseOutcome::Completed);

        assert_eq!(settings.device.borrow().as_deref(), Some("png"));
        assert_eq!(
            *settings.geometry.borrow(),
            Some(PageGeometry {
                width: 400,
                height: 300,
                x_offset: 10,
                y_offset: 20,
            })
        );
        assert_eq!(settings.background.get(), Rgb { r: 0, g: 255, b: 0 });
        assert!(settings.no_pause.get());
        assert_eq!(args, vec!["plotdemo".to_string(), "out.dat".to_string()]);
    }

    #[test]
    fn test_zero_width_is_a_handler_failure() {
        let settings = PlotSettings::new();
        let mut args: Vec<String> = ["plotdemo", "-width", "0"].map(String::from).to_vec();

        let err = parse_internal_opts(&mut args, ParseMode::default().quiet(), &settings)
            .expect_err("zero width should fail");
        assert!(matches!(err, ParseError::HandlerFailed { .. }));
        assert_eq!(settings.pen_width.get(), 1);
    }

    #[test]
    fn test_help_halts_quietly_under_quiet_mode() {
        let settings = PlotSettings::new();
        let mut args: Vec<String> = ["plotdemo", "-h", "-dev", "png"].map(String::from).to_vec();

        let outcome = parse_internal_opts(&mut args, ParseMode::default().quiet(), &settings)
            .expect("help should halt successfully");
        assert_eq!(
            outcome,
            ParseOutcome::Halted {
                option: "h".to_string(),
            }
        );
        // the scan stopped before -dev
        assert!(settings.device.borrow().is_none());
        assert_eq!(args, ["plotdemo", "-dev", "png"].map(String::from).to_vec());
    }

    #[test]
    fn test_set_option_round_trip() {
        let settings = PlotSettings::new();

        set_option(&settings, "dev", Some("svg")).expect("dev should be recognized");
        set_option(&settings, "-fam", None).expect("dash-prefixed names are accepted");
        set_option(&settings, "a", Some("1.5")).expect("aspect should parse");

        assert_eq!(settings.device.borrow().as_deref(), Some("svg"));
        assert!(settings.family.get());
        assert_eq!(settings.aspect.get(), 1.5);

        let err = set_option(&settings, "nosuch", None).expect_err("unknown option");
        assert_eq!(err, ParseError::UnrecognizedOption("-nosuch".to_string()));
    }

    #[test]
    fn test_snapshot_reflects_current_values() {
        let settings = PlotSettings::new();
        settings.pen_width.set(3);
        *settings.output.borrow_mut() = Some("plot.ps".to_string());

        let snapshot = settings.snapshot();
        assert_eq!(snapshot.pen_width, 3);
        assert_eq!(snapshot.output.as_deref(), Some("plot.ps"));
        assert_eq!(snapshot.subpages_x, 1);
    }
}
