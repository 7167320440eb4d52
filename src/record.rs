use std::fmt;

/// Severity of a log line. Rendered as a fixed 5-character tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl Level {
    /// The tag exactly as it appears on the wire, padded to 5 characters.
    pub const fn as_tag(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO ",
            Level::Warn => "WARN ",
            Level::Error => "ERROR",
            Level::Critical => "CRITI",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "TRACE" => Some(Level::Trace),
            "DEBUG" => Some(Level::Debug),
            "INFO " => Some(Level::Info),
            "WARN " => Some(Level::Warn),
            "ERROR" => Some(Level::Error),
            "CRITI" => Some(Level::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

/// Everything one logging call knows about itself. Lives for a single call.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: Level,
    pub file: &'a str,
    pub function: &'a str,
    pub line: u32,
    pub args: fmt::Arguments<'a>,
}

/// Strips directories from a source path, accepting both separators.
///
/// ```
/// # use micro_logger::basename;
/// assert_eq!(basename("src/net/socket.rs"), "socket.rs");
/// assert_eq!(basename("main.rs"), "main.rs");
/// ```
pub fn basename(path: &str) -> &str {
    match path.rfind(|c: char| c == '/' || c == '\\') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_five_wide() {
        for level in [
            Level::Trace,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Critical,
        ] {
            assert_eq!(level.as_tag().len(), 5);
            assert_eq!(Level::from_tag(level.as_tag()), Some(level));
        }
        assert_eq!(Level::from_tag("INFO"), None);
    }

    #[test]
    fn test_basename_windows_path() {
        assert_eq!(basename(r"src\lib.rs"), "lib.rs");
        assert_eq!(basename("dir/"), "");
    }
}
