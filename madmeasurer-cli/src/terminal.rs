// ============================================================================
// madmeasurer-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Styling and Program Output
//
// Program output (playlist paths, report rows, measurement tool progress)
// goes to stdout regardless of verbosity. Summaries and errors go to stderr
// so a silent `find` can be piped into other tools.
//
// Colours come from the console crate, which turns them off when the stream
// is not a terminal.

use console::{Term, style};

use madmeasurer_core::events::{Event, EventHandler};

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const ERROR_SYMBOL: &str = "✗";
    pub const STATUS_INDENT: &str = "  ";
    pub const LABEL_WIDTH: usize = 15;
}

/// Prints measurement tool output as it arrives.
#[derive(Debug, Default)]
pub struct TerminalEventHandler;

impl TerminalEventHandler {
    pub fn new() -> Self {
        Self
    }
}

impl EventHandler for TerminalEventHandler {
    fn handle(&self, event: &Event) {
        if let Event::MeasurementProgress { line } = event {
            print_output(line);
        }
    }
}

/// Writes one line of program output to stdout.
pub fn print_output(line: &str) {
    Term::stdout().write_line(line).ok();
}

/// Prints a "label: value" summary line.
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let padding = styling::LABEL_WIDTH.saturating_sub(label.len()).max(1);
    let value = if highlight {
        style(value).bold().for_stderr().to_string()
    } else {
        value.to_string()
    };
    Term::stderr()
        .write_line(&format!(
            "{}{}:{}{}",
            styling::STATUS_INDENT,
            label,
            " ".repeat(padding),
            value
        ))
        .ok();
}

pub fn print_success(message: &str) {
    Term::stderr()
        .write_line(&format!(
            "{} {}",
            style(styling::SUCCESS_SYMBOL).green().for_stderr(),
            message
        ))
        .ok();
}

/// Prints an error in red. Errors are printed whatever the verbosity.
pub fn print_error(message: &str) {
    Term::stderr()
        .write_line(&format!(
            "{} {}",
            styling::ERROR_SYMBOL,
            style(format!("Error: {message}")).red().bold().for_stderr()
        ))
        .ok();
}
