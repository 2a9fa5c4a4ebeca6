/// One advisory progress message handed to a [`VerboseLog`].
///
/// `title` is always present; `message` and `extras` are optional columns that
/// console renderers pad and dim. `dim` marks low-importance detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry<'a> {
    pub title: &'a str,
    pub message: Option<&'a str>,
    pub extras: Option<&'a str>,
    pub dim: bool,
}

impl<'a> LogEntry<'a> {
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            message: None,
            extras: None,
            dim: false,
        }
    }

    #[must_use]
    pub fn message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }

    #[must_use]
    pub fn extras(mut self, extras: &'a str) -> Self {
        self.extras = Some(extras);
        self
    }

    #[must_use]
    pub fn dimmed(mut self) -> Self {
        self.dim = true;
        self
    }
}

/// Caller supplied sink for human readable progress output.
///
/// Purely advisory: nothing in the library branches on whether or how an entry
/// was rendered.
pub trait VerboseLog: Send + Sync {
    fn log(&self, entry: &LogEntry<'_>);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLog;

impl VerboseLog for NoopLog {
    fn log(&self, _entry: &LogEntry<'_>) {}
}

impl<F> VerboseLog for F
where
    F: Fn(&LogEntry<'_>) + Send + Sync,
{
    fn log(&self, entry: &LogEntry<'_>) {
        self(entry);
    }
}
