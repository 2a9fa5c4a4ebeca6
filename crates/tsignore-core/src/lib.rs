mod log;
mod path;
pub mod specifier;
pub mod types;

pub use log::{LogEntry, NoopLog, VerboseLog};
pub use path::{FixedWorkingDir, ProcessWorkingDir, WorkingDirProvider};
pub use specifier::{SUPPRESSION_MARKER, is_allowed, is_relative, strip_quotes};
pub use types::*;
