//! Usage and help rendering.
//!
//! Pure formatters over [`HelpEntry`] snapshots: a compact wrapped syntax
//! line, a verbose per-option listing, a notes trailer, and the usage
//! banner printed when parsing fails. Nothing here touches table state;
//! callers decide where the text goes (the default session handler prints
//! to stderr).

use plotargs_core::HelpEntry;

const WRAP_COLUMN: usize = 79;
const SYNTAX_PAD: usize = 20;

fn visible<'e>(
    entries: &'e [HelpEntry],
    show_all: bool,
) -> impl Iterator<Item = &'e HelpEntry> + 'e {
    entries
        .iter()
        .filter(move |entry| show_all || !entry.invisible)
}

/// Compact syntax summary: each option as `[-opt ...]`, wrapped before
/// column 80 with a three-space continuation indent.
pub fn syntax_line(label: &str, entries: &[HelpEntry], show_all: bool) -> String {
    let mut out = format!("{label} options:\n");
    let mut col = 0;

    for entry in visible(entries, show_all) {
        let item = format!(" [{}]", entry.syntax);
        if col == 0 || col + item.len() > WRAP_COLUMN {
            if col != 0 {
                out.push('\n');
            }
            out.push_str("   ");
            col = 3;
        }
        out.push_str(&item);
        col += item.len();
    }

    out.push('\n');
    out
}

/// Verbose listing: one line per option with syntax and description.
///
/// Invisible options shown via `show_all` carry a `" * "` marker prefix so
/// they stand out from regularly documented ones.
pub fn help_listing(label: &str, entries: &[HelpEntry], show_all: bool) -> String {
    let mut out = format!("{label} options:\n");

    for entry in visible(entries, show_all) {
        let marker = if entry.invisible { " *  " } else { "    " };
        out.push_str(&format!(
            "{marker}{syntax:<pad$} {help}\n",
            syntax = entry.syntax,
            help = entry.help,
            pad = SYNTAX_PAD,
        ));
    }

    out
}

/// Free-form notes trailer printed after the help listing.
pub fn notes_block<S: AsRef<str>>(notes: &[S]) -> String {
    if notes.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n");
    for note in notes {
        out.push_str(note.as_ref());
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Usage banner naming the offending token (empty for missing-argument
/// reports), followed by the syntax summary and a `-h` hint.
pub fn usage_banner(
    program: &str,
    label: &str,
    bad_option: &str,
    entries: &[HelpEntry],
    show_all: bool,
) -> String {
    let mut out = String::new();
    if !bad_option.is_empty() {
        out.push_str(&format!(
            "\n{program}: bad command line option \"{bad_option}\"\n"
        ));
    }
    out.push_str(&format!("\nUsage:\n        {program} [{label} options]\n\n"));
    out.push_str(&syntax_line(label, entries, show_all));
    out.push_str(&format!(
        "\nType '{program} -h' for a full description.\n\n"
    ));
    out
}
