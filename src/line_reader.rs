//! Reader for lines written with the default parameters.
//!
//! Consumers of the log (a test, a `nc` listener piping into a script) rely
//! on the bracketed wire format:
//!
//! ```text
//! [<date> <time>.<ms>][<LEVEL>][pid:<pid>][tid:<tid>][<file>:<line>::<func>][<message>]
//! ```
//!
//! Custom header patterns or time formats are not understood here.

use std::str::Lines;
use std::sync::LazyLock;

use regex::Regex;

use crate::record::Level;

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\[(?P<date>\d{2}/\d{2}/\d{2}) (?P<time>\d{2}:\d{2}:\d{2}\.\d{3})\]",
        r"\[(?P<level>TRACE|DEBUG|INFO |WARN |ERROR|CRITI)\]",
        r"\[pid:(?P<pid>\d+)\]\[tid:(?P<tid>\d+)\]",
        r"\[ *(?P<file>[^:\]]+):(?P<line>\d+)::(?P<function>[^\]]*)\]",
        r"\[(?P<message>.*)\]$",
    ))
    .expect("line pattern is a valid regex")
});

/// The fields of one parsed log line, borrowed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub level: Level,
    pub pid: u32,
    pub tid: u64,
    pub file: &'a str,
    /// Line number exactly as written, padding included.
    pub line: &'a str,
    pub function: &'a str,
    pub message: &'a str,
}

impl LogLine<'_> {
    pub fn line_number(&self) -> Option<u32> {
        self.line.parse().ok()
    }
}

/// Parses one line; a trailing newline is ignored.
///
/// # Examples
///
/// ```
/// # use micro_logger::{parse_line, Level};
/// let text = "[03/09/24 07:05:03.042][INFO ][pid:00000042][tid:0000000000000001][main.rs:042::main][hello world]\n";
/// let line = parse_line(text).unwrap();
/// assert_eq!(line.level, Level::Info);
/// assert_eq!(line.line, "042");
/// assert_eq!(line.message, "hello world");
/// ```
pub fn parse_line(text: &str) -> Option<LogLine<'_>> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let caps = LINE_PATTERN.captures(text)?;
    let field = |name: &str| caps.name(name).map(|m| m.as_str());

    Some(LogLine {
        date: field("date")?,
        time: field("time")?,
        level: Level::from_tag(field("level")?)?,
        pid: field("pid")?.parse().ok()?,
        tid: field("tid")?.parse().ok()?,
        file: field("file")?,
        line: field("line")?,
        function: field("function")?,
        message: field("message")?,
    })
}

/// Iterates over the parseable lines of a text blob.
///
/// Lines that do not match the wire format are skipped and counted.
pub struct LineReader<'a> {
    lines: Lines<'a>,
    skipped: usize,
}

impl<'a> LineReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            skipped: 0,
        }
    }

    /// Number of lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<'a> Iterator for LineReader<'a> {
    type Item = LogLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for text in self.lines.by_ref() {
            match parse_line(text) {
                Some(line) => return Some(line),
                None => self.skipped += 1,
            }
        }
        None
    }
}
