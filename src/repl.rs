//! # repl
//!
//! Interactive menu loop: pick a table, then query it for as many NIINs as
//! wanted.
//!
//! Reads from any `BufRead` and writes to any `Write`. Closing the input ends
//! the loop the same way `quit` does, minus the farewell.

use crate::client::RecordSource;
use crate::display::{display_part_summary, display_payload};
use crate::error::QueryError;
use crate::summary::part_summary;
use crate::table::{Selection, Table};

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use indicatif::ProgressBar;

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];
const BACK_WORDS: [&str; 2] = ["back", "b"];

/// What the NIIN prompt asked for once it hands control back.
enum Flow {
    Back,
    Quit,
}

/// Writes prompt and reads one trimmed line. `None` at end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, text: &str) -> Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

/// Runs f behind a spinner on stderr. The spinner hides itself when stderr
/// is not a terminal.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner().with_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}

/// Queries one table and prints the result or the reason there is none.
fn show_table(source: &impl RecordSource, out: &mut impl Write, table: Table, niin: &str) -> Result<()> {
    let result = with_spinner("querying OpenFLIS", || source.query(table, niin));

    match result {
        Ok(payload) => display_payload(out, Some(&payload))?,
        Err(e @ QueryError::MissingApiKey) => {
            writeln!(out, "Error: {}", e)?;
            display_payload(out, None)?;
        }
        Err(e) => {
            writeln!(out, "Error making API request: {}", e)?;
            display_payload(out, None)?;
        }
    }

    Ok(())
}

fn show_menu(input: &mut impl BufRead, out: &mut impl Write) -> Result<Option<String>> {
    writeln!(out, "\nSelect API Endpoint:")?;
    for (n, selection) in (1..).zip(Selection::menu()) {
        writeln!(out, "{}. {}", n, selection.menu_entry())?;
    }
    prompt(input, out, "Choose option (1-9): ")
}

/// Prompts for NIINs against one selection until the user goes back or quits.
fn niin_loop(
    source: &impl RecordSource,
    input: &mut impl BufRead,
    out: &mut impl Write,
    selection: Selection,
) -> Result<Flow> {
    writeln!(out, "\nSelected: {}", selection.label())?;
    writeln!(out, "{}", "-".repeat(40))?;

    loop {
        let text = "\nEnter NIIN (or 'back' to change endpoint, 'quit' to exit): ";
        let Some(niin) = prompt(input, out, text)? else {
            return Ok(Flow::Quit);
        };

        let word = niin.to_lowercase();
        if QUIT_WORDS.contains(&word.as_str()) {
            writeln!(out, "Goodbye!")?;
            return Ok(Flow::Quit);
        }
        if BACK_WORDS.contains(&word.as_str()) {
            return Ok(Flow::Back);
        }
        if niin.is_empty() {
            writeln!(out, "Please enter a valid NIIN")?;
            continue;
        }

        match selection {
            Selection::Table(table) => {
                writeln!(out, "\nFetching {} data for NIIN: {}", table.label(), niin)?;
                writeln!(out, "Please wait...")?;
                show_table(source, out, table, &niin)?;
            }
            Selection::PartSummary => {
                writeln!(out, "\nFetching comprehensive summary for NIIN: {}", niin)?;
                writeln!(out, "Please wait...")?;
                let summary = with_spinner("building part summary", || part_summary(source, &niin));
                display_part_summary(out, &summary)?;
            }
        }
    }
}

/// Runs the interactive application until the user quits or input ends.
pub fn run(source: &impl RecordSource, mut input: impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "OpenFLIS NIIN Data Retrieval Application")?;
    writeln!(out, "{}", "=".repeat(40))?;

    loop {
        let Some(choice) = show_menu(&mut input, out)? else {
            return Ok(());
        };

        let Some(selection) = Selection::from_menu(&choice) else {
            writeln!(out, "Invalid selection. Please choose 1-9.")?;
            continue;
        };
        tracing::debug!(?selection, "menu selection");

        match niin_loop(source, &mut input, out, selection)? {
            Flow::Back => continue,
            Flow::Quit => return Ok(()),
        }
    }
}
