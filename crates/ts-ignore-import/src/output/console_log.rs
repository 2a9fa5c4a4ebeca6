use colored::Colorize;
use tsignore_core::{LogEntry, VerboseLog};

const TITLE_PAD: usize = 30;
const MESSAGE_PAD: usize = 25;
const TITLE_PAD_LONG: usize = TITLE_PAD + MESSAGE_PAD + 1;
const MESSAGE_PAD_LONG: usize = MESSAGE_PAD + 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verbosity {
    Silent,
    Normal,
    Verbose,
}

/// Prints log entries to stdout as aligned columns.
///
/// Dimmed entries are progress detail and only shown at `Verbosity::Verbose`.
pub(crate) struct ConsoleLog {
    verbosity: Verbosity,
}

impl ConsoleLog {
    pub(crate) fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn shows(&self, entry: &LogEntry<'_>) -> bool {
        match self.verbosity {
            Verbosity::Silent => false,
            Verbosity::Normal => !entry.dim,
            Verbosity::Verbose => true,
        }
    }
}

impl VerboseLog for ConsoleLog {
    fn log(&self, entry: &LogEntry<'_>) {
        if self.shows(entry) {
            println!("{}", format_entry(entry));
        }
    }
}

pub(crate) fn format_entry(entry: &LogEntry<'_>) -> String {
    let mut columns = Vec::with_capacity(3);

    if !entry.title.is_empty() {
        let title = if entry.message.is_some() || entry.extras.is_some() {
            let width = if entry.title.len() > TITLE_PAD {
                TITLE_PAD_LONG
            } else {
                TITLE_PAD
            };
            format!("{:<width$}", entry.title)
        } else {
            entry.title.to_string()
        };
        columns.push(title.bold().to_string());
    }

    match (entry.message, entry.extras) {
        (message, Some(extras)) => {
            let message = message.unwrap_or_default();
            let width = if message.len() >= MESSAGE_PAD {
                MESSAGE_PAD_LONG
            } else {
                MESSAGE_PAD
            };
            columns.push(format!("{message:<width$}"));
            columns.push(extras.dimmed().to_string());
        }
        (Some(message), None) if !message.is_empty() => columns.push(message.to_string()),
        _ => {}
    }

    let line = columns.join(" ");
    if entry.dim {
        line.dimmed().to_string()
    } else {
        line
    }
}
