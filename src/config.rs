use chrono::format::{Item, StrftimeItems};

use crate::error::ConfigError;
use crate::template::HeaderPattern;

/// Size of a memory page; header and message buffers should fit in one.
pub const PAGE_SIZE: usize = 4096;

pub const DEFAULT_HEADER_PATTERN: &str = "[{level}]{thread}[{file}:{line}::{func}][{message}]\n";
pub const DEFAULT_TIME_FORMAT: &str = "[%D %T";
pub const DEFAULT_MILLISECONDS_FORMAT: &str = ".{ms}]";

/// Tunables fixed when a logger is built.
///
/// The defaults produce lines such as
/// `[10/17/26 09:14:07.042][INFO ][pid:00004242][tid:0000000000000001][main.rs:042::main][hello]`.
///
/// # Examples
///
/// ```
/// # use micro_logger::LogParameters;
/// let params = LogParameters::default()
///     .with_message_size(256)
///     .with_line_width(5);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogParameters {
    /// Bound for the rendered timestamp; also added to `message_size` to bound the whole line.
    pub header_size: usize,
    /// The message body keeps at most `message_size - 1` bytes.
    pub message_size: usize,
    /// Line layout with `{level}`, `{thread}`, `{file}`, `{line}`, `{func}` and `{message}` placeholders.
    pub header_pattern: String,
    /// Filename is right-justified to this width. 0 disables padding.
    pub filename_width: usize,
    /// Line number is zero padded to this width. 0 disables padding.
    pub line_width: usize,
    /// strftime-style date/time pattern, rendered in local time.
    pub time_format: String,
    /// Suffix appended after the date; `{ms}` becomes the 3-digit millisecond.
    pub milliseconds_format: Option<String>,
}

impl Default for LogParameters {
    fn default() -> Self {
        Self {
            header_size: 128,
            message_size: 1024,
            header_pattern: DEFAULT_HEADER_PATTERN.to_string(),
            filename_width: 0,
            line_width: 3,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            milliseconds_format: Some(DEFAULT_MILLISECONDS_FORMAT.to_string()),
        }
    }
}

impl LogParameters {
    pub fn with_header_size(self, header_size: usize) -> Self {
        Self {
            header_size,
            ..self
        }
    }

    pub fn with_message_size(self, message_size: usize) -> Self {
        Self {
            message_size,
            ..self
        }
    }

    pub fn with_header_pattern(self, pattern: &str) -> Self {
        Self {
            header_pattern: pattern.into(),
            ..self
        }
    }

    pub fn with_filename_width(self, filename_width: usize) -> Self {
        Self {
            filename_width,
            ..self
        }
    }

    pub fn with_line_width(self, line_width: usize) -> Self {
        Self { line_width, ..self }
    }

    pub fn with_time_format(self, format: &str) -> Self {
        Self {
            time_format: format.into(),
            ..self
        }
    }

    /// Sets or clears the milliseconds suffix.
    pub fn with_milliseconds_format(self, format: Option<&str>) -> Self {
        Self {
            milliseconds_format: format.map(String::from),
            ..self
        }
    }

    /// Upper bound on a finished line in bytes.
    pub fn line_capacity(&self) -> usize {
        self.header_size.saturating_add(self.message_size)
    }

    /// Checks every parameter. Oversized buffers are only reported with a warning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.message_size == 0 {
            return Err(ConfigError::MessageSize);
        }
        if self.header_size == 0 {
            return Err(ConfigError::HeaderSize);
        }
        HeaderPattern::parse(&self.header_pattern)?;
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::TimeFormat(self.time_format.clone()));
        }
        if self.line_capacity() > PAGE_SIZE {
            tracing::warn!(
                header_size = self.header_size,
                message_size = self.message_size,
                "header and message buffers exceed one memory page"
            );
        }
        Ok(())
    }
}
