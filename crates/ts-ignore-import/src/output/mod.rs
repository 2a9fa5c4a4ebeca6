mod console_log;
mod summary;

pub(crate) use console_log::{ConsoleLog, Verbosity};
pub(crate) use summary::format_summary;
