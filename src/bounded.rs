use std::fmt;

/// A `fmt::Write` adapter that never lets a `String` grow past `limit` bytes.
///
/// Text that does not fit is cut at the last whole character and everything
/// after it is dropped. Once truncated, further writes return `fmt::Error` so
/// the formatting machinery can stop early; callers ignore that error because
/// truncation is not a failure.
pub struct BoundedWriter<'a> {
    buf: &'a mut String,
    limit: usize,
    truncated: bool,
}

impl<'a> BoundedWriter<'a> {
    /// Wraps `buf`. `limit` is an absolute cap on `buf.len()`, existing content included.
    pub fn new(buf: &'a mut String, limit: usize) -> Self {
        let truncated = buf.len() >= limit;
        Self {
            buf,
            limit,
            truncated,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.buf.len())
    }

    /// Appends `s`, cutting it when it does not fit.
    pub fn push_str(&mut self, s: &str) {
        if self.truncated {
            return;
        }
        let room = self.remaining();
        if s.len() <= room {
            self.buf.push_str(s);
            return;
        }
        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf.push_str(&s[..cut]);
        self.truncated = true;
    }

    /// Formats `args` into the buffer, truncating silently.
    pub fn write_args(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::write(self, args);
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        if self.truncated {
            Err(fmt::Error)
        } else {
            Ok(())
        }
    }
}
