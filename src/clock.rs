use std::fmt::{self, Display};

use chrono::{DateTime, Local, TimeZone};

use crate::bounded::BoundedWriter;
use crate::config::LogParameters;

/// Renders the timestamp prefix of a log line.
#[derive(Debug, Clone)]
pub struct Clock {
    time_format: String,
    millis: Option<MillisFormat>,
    limit: usize,
}

#[derive(Debug, Clone)]
enum MillisFormat {
    Literal(String),
    Split { before: String, after: String },
}

impl Clock {
    pub fn new(params: &LogParameters) -> Self {
        let millis = params.milliseconds_format.as_deref().map(|format| {
            match format.split_once("{ms}") {
                Some((before, after)) => MillisFormat::Split {
                    before: before.to_string(),
                    after: after.to_string(),
                },
                None => MillisFormat::Literal(format.to_string()),
            }
        });
        Self {
            time_format: params.time_format.clone(),
            millis,
            limit: params.header_size,
        }
    }

    /// Appends the current local time to `out` and returns the bytes written.
    ///
    /// An empty time format skips the clock read entirely.
    pub fn render_timestamp(&self, out: &mut String) -> usize {
        if self.time_format.is_empty() {
            return 0;
        }
        self.render_at(&Local::now(), out)
    }

    /// Appends `now` to `out`, bounded by the header size.
    ///
    /// The date part follows the strftime pattern; the milliseconds suffix is
    /// only added when the date part produced something. A date pattern that
    /// fails to render leaves `out` untouched and returns 0.
    pub fn render_at<Tz>(&self, now: &DateTime<Tz>, out: &mut String) -> usize
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let start = out.len();
        let limit = start.saturating_add(self.limit);

        let failed = {
            let mut w = BoundedWriter::new(out, limit);
            let result = fmt::write(&mut w, format_args!("{}", now.format(&self.time_format)));
            result.is_err() && !w.is_truncated()
        };
        if failed {
            out.truncate(start);
            return 0;
        }
        if out.len() == start {
            return 0;
        }

        if let Some(millis) = &self.millis {
            let ms = now.timestamp_millis().rem_euclid(1000);
            let mut w = BoundedWriter::new(out, limit);
            match millis {
                MillisFormat::Literal(text) => w.push_str(text),
                MillisFormat::Split { before, after } => {
                    w.push_str(before);
                    w.write_args(format_args!("{ms:03}"));
                    w.push_str(after);
                }
            }
        }
        out.len() - start
    }
}
