//! Demo driver: parses plot options plus two application options and
//! reports the resulting settings as JSON.

use std::cell::{Cell, RefCell};
use std::env;
use std::process;
use std::rc::Rc;

use plotargs_core::{OptionDescriptor, OptionTable, ParseMode};
use plotargs_parser::builtin::{PlotSettings, builtin_table};
use plotargs_parser::{ParseOutcome, ParseSession};

fn main() {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "plotargs".to_string());

    let mode = ParseMode::default().override_builtins();
    let settings = PlotSettings::new();
    let plot_table = builtin_table(&settings, mode, &program);

    let save: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let verbose = Rc::new(Cell::new(false));
    let demo_table = OptionTable::new("demo")
        .with_option(
            OptionDescriptor::string("save", Rc::clone(&save))
                .with_syntax("-save name")
                .with_help("Save plot settings to the named file"),
        )
        .with_option(
            OptionDescriptor::boolean("verbose", Rc::clone(&verbose))
                .with_syntax("-verbose")
                .with_help("Report everything that was parsed"),
        );

    let mut session = ParseSession::new(mode)
        .with_builtin(&plot_table)
        .with_caller(&demo_table);

    match session.parse(&mut args) {
        // help/version already wrote their output
        Ok(ParseOutcome::Halted { .. }) => return,
        Ok(ParseOutcome::Completed) => {}
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }

    let report = serde_json::json!({
        "settings": settings.snapshot(),
        "save": *save.borrow(),
        "verbose": verbose.get(),
        "args": args.get(1..).unwrap_or_default(),
    });
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
