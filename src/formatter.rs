use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::bounded::BoundedWriter;
use crate::clock::Clock;
use crate::config::LogParameters;
use crate::error::ConfigError;
use crate::record::Record;
use crate::template::{HeaderPattern, HeaderTemplate};
use crate::thread_info::ThreadInfo;

thread_local! {
    static MESSAGE_SCRATCH: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Per-thread header templates, built lazily and kept for the life of the cache.
///
/// Keyed by [`ThreadInfo::current_tid`], so lookups work even from
/// thread-local destructors. Entries are never evicted: the cache grows with
/// the number of distinct threads that ever logged, and a tid is never reused.
#[derive(Debug)]
pub struct HeaderCache {
    pattern: HeaderPattern,
    filename_width: usize,
    line_width: usize,
    templates: Mutex<HashMap<u64, Arc<HeaderTemplate>>>,
}

impl HeaderCache {
    pub fn new(pattern: HeaderPattern, filename_width: usize, line_width: usize) -> Self {
        Self {
            pattern,
            filename_width,
            line_width,
            templates: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the calling thread's template, building it on first use.
    pub fn get_or_build(&self) -> Arc<HeaderTemplate> {
        let tid = ThreadInfo::current_tid();
        let mut templates = self.templates.lock();
        if let Some(template) = templates.get(&tid) {
            return Arc::clone(template);
        }

        let info = ThreadInfo::current();
        let template = Arc::new(self.pattern.bind(&info, self.filename_width, self.line_width));
        tracing::trace!(pid = info.pid, tid = %info.tid_hex(), "built header template");
        templates.insert(tid, Arc::clone(&template));
        template
    }

    /// Number of threads with a cached template.
    pub fn len(&self) -> usize {
        self.templates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns a [`Record`] into the exact bytes handed to a sink.
#[derive(Debug)]
pub struct RecordFormatter {
    params: LogParameters,
    clock: Clock,
    headers: HeaderCache,
}

impl RecordFormatter {
    pub fn new(params: LogParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        let pattern = HeaderPattern::parse(&params.header_pattern)?;
        Ok(Self {
            clock: Clock::new(&params),
            headers: HeaderCache::new(pattern, params.filename_width, params.line_width),
            params,
        })
    }

    pub fn parameters(&self) -> &LogParameters {
        &self.params
    }

    pub fn headers(&self) -> &HeaderCache {
        &self.headers
    }

    pub fn header_template(&self) -> Arc<HeaderTemplate> {
        self.headers.get_or_build()
    }

    pub fn render_timestamp(&self, out: &mut String) -> usize {
        self.clock.render_timestamp(out)
    }

    /// Replaces the content of `out` with the finished line and returns its length.
    ///
    /// The message keeps at most `message_size - 1` bytes and the whole line at
    /// most `header_size + message_size`; anything beyond is cut off. This
    /// never fails.
    pub fn format_line(&self, record: &Record<'_>, out: &mut String) -> usize {
        let written = MESSAGE_SCRATCH
            .try_with(|scratch| {
                scratch
                    .try_borrow_mut()
                    .ok()
                    .map(|mut message| self.assemble(record, &mut message, out))
            })
            .ok()
            .flatten();
        // None when a Display impl logs from inside a log call
        match written {
            Some(len) => len,
            None => self.assemble(record, &mut String::new(), out),
        }
    }

    fn assemble(&self, record: &Record<'_>, message: &mut String, out: &mut String) -> usize {
        let header = self.headers.get_or_build();

        message.clear();
        BoundedWriter::new(message, self.params.message_size - 1).write_args(record.args);

        out.clear();
        self.clock.render_timestamp(out);
        let mut line = BoundedWriter::new(out, self.params.line_capacity());
        header.render(
            &mut line,
            record.level,
            record.file,
            record.line,
            record.function,
            message,
        );
        out.len()
    }
}
