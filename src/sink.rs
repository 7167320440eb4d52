use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::SinkError;

/// Destination for finished log lines.
///
/// A sink receives one complete line per call. The [`Logger`](crate::Logger)
/// serializes calls, so an implementation never sees two writes at once and
/// does not need its own locking.
///
/// # Usage
///
/// ```
/// # use micro_logger::LogSink;
/// # use std::io;
/// # use std::sync::{Arc, Mutex};
/// // Sink that keeps lines in memory
/// struct Collect(Arc<Mutex<Vec<String>>>);
///
/// impl LogSink for Collect {
///     fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
///         self.0.lock().unwrap().push(String::from_utf8_lossy(buf).into_owned());
///         Ok(buf.len())
///     }
/// }
/// ```
pub trait LogSink: Send {
    /// Writes one line and returns how many bytes were accepted.
    ///
    /// Asynchronous sinks report bytes *submitted*, not bytes durably written.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Pushes anything buffered towards its final destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl LogSink for SilentSink {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }
}

/// Writes to the process standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Appends to a file. Each line goes to the file in a single write.
#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Opens `path` for appending, creating it when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { file })
    }
}

impl LogSink for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.sync_data()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.file.flush();
    }
}
