//! Header pattern parsing and per-thread header templates.
//!
//! A [`HeaderPattern`] is parsed once from [`LogParameters::header_pattern`].
//! Binding it to a thread bakes the thread identity and alignment widths in,
//! which yields the [`HeaderTemplate`] cached for that thread. Only level,
//! file, line, function and message remain open for each call.
//!
//! [`LogParameters::header_pattern`]: crate::LogParameters::header_pattern

use crate::bounded::BoundedWriter;
use crate::error::ConfigError;
use crate::record::Level;
use crate::thread_info::ThreadInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Level,
    Thread,
    File,
    Line,
    Function,
    Message,
}

/// A parsed header pattern, not yet bound to any thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPattern {
    pieces: Vec<Piece>,
}

impl HeaderPattern {
    /// Parses `{name}` placeholders; `{{` and `}}` stand for literal braces.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::Pattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => return Err(invalid("unterminated placeholder")),
                            Some(c) => name.push(c),
                        }
                    }
                    let piece = match name.as_str() {
                        "level" => Piece::Level,
                        "thread" => Piece::Thread,
                        "file" => Piece::File,
                        "line" => Piece::Line,
                        "func" => Piece::Function,
                        "message" => Piece::Message,
                        other => return Err(invalid(&format!("unknown placeholder {{{other}}}"))),
                    };
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(piece);
                }
                '}' => return Err(invalid("unmatched '}'")),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        Ok(Self { pieces })
    }

    /// Bakes a thread identity and alignment widths into a template.
    pub fn bind(&self, thread: &ThreadInfo, filename_width: usize, line_width: usize) -> HeaderTemplate {
        let mut fields: Vec<Field> = Vec::with_capacity(self.pieces.len());
        for piece in &self.pieces {
            let field = match piece {
                Piece::Literal(text) => Field::Literal(text.clone()),
                Piece::Thread => Field::Literal(thread.info.clone()),
                Piece::Level => Field::Level,
                Piece::File => Field::File,
                Piece::Line => Field::Line,
                Piece::Function => Field::Function,
                Piece::Message => Field::Message,
            };
            // merge neighbouring literals so rendering is one push per run of text
            if let (Field::Literal(text), Some(Field::Literal(prev))) = (&field, fields.last_mut()) {
                prev.push_str(text);
                continue;
            }
            fields.push(field);
        }
        HeaderTemplate {
            fields,
            filename_width,
            line_width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Literal(String),
    Level,
    File,
    Line,
    Function,
    Message,
}

/// Header pattern bound to one thread. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    fields: Vec<Field>,
    filename_width: usize,
    line_width: usize,
}

impl HeaderTemplate {
    /// Fills the open fields into `out`, truncating whatever does not fit.
    pub fn render(
        &self,
        out: &mut BoundedWriter<'_>,
        level: Level,
        file: &str,
        line: u32,
        function: &str,
        message: &str,
    ) {
        for field in &self.fields {
            if out.is_truncated() {
                return;
            }
            match field {
                Field::Literal(text) => out.push_str(text),
                Field::Level => out.push_str(level.as_tag()),
                Field::File if self.filename_width > 0 => {
                    out.write_args(format_args!("{file:>width$}", width = self.filename_width))
                }
                Field::File => out.push_str(file),
                Field::Line => {
                    out.write_args(format_args!("{line:0width$}", width = self.line_width))
                }
                Field::Function => out.push_str(function),
                Field::Message => out.push_str(message),
            }
        }
    }
}
