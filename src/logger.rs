use std::cell::RefCell;
use std::fmt;
use std::io;
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::config::LogParameters;
use crate::error::ConfigError;
use crate::formatter::RecordFormatter;
use crate::record::{Level, Record};
use crate::sink::LogSink;

thread_local! {
    static LINE_SCRATCH: RefCell<String> = const { RefCell::new(String::new()) };
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Formats records and hands them to one sink.
///
/// Formatting runs on the calling thread without holding the write lock;
/// only the final sink write is serialized. Two lines written by different
/// threads therefore never interleave, but their relative order is whichever
/// thread takes the lock first.
///
/// # Examples
///
/// ```
/// # use micro_logger::{Logger, LogParameters, SilentSink, Level};
/// let logger = Logger::new(SilentSink, LogParameters::default()).unwrap();
/// micro_logger::info!(logger: logger, "ready after {} ms", 12);
/// logger.log(Level::Warn, "main.rs", "main", 10, format_args!("low disk"));
/// ```
pub struct Logger {
    formatter: RecordFormatter,
    sink: Mutex<Box<dyn LogSink>>,
}

impl Logger {
    /// Builds a logger that owns `sink`.
    pub fn new<S: LogSink + 'static>(sink: S, parameters: LogParameters) -> Result<Self, ConfigError> {
        Ok(Self {
            formatter: RecordFormatter::new(parameters)?,
            sink: Mutex::new(Box::new(sink)),
        })
    }

    /// Formats one line and writes it to the sink.
    ///
    /// Sink errors are swallowed: a call site cannot observe whether the
    /// line was delivered.
    pub fn log(&self, level: Level, file: &str, function: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log_record(&Record {
            level,
            file,
            function,
            line,
            args,
        });
    }

    pub fn log_record(&self, record: &Record<'_>) {
        let reused = LINE_SCRATCH
            .try_with(|scratch| match scratch.try_borrow_mut() {
                Ok(mut line) => {
                    self.emit(record, &mut line);
                    true
                }
                Err(_) => false,
            })
            .unwrap_or(false);
        // re-entrant call or thread teardown
        if !reused {
            self.emit(record, &mut String::new());
        }
    }

    fn emit(&self, record: &Record<'_>, line: &mut String) {
        self.formatter.format_line(record, line);
        let mut sink = self.sink.lock();
        let _ = sink.write(line.as_bytes());
    }

    pub fn flush(&self) -> io::Result<()> {
        self.sink.lock().flush()
    }

    pub fn parameters(&self) -> &LogParameters {
        self.formatter.parameters()
    }

    pub fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("parameters", self.parameters())
            .finish_non_exhaustive()
    }
}

/// Outcome of [`initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    /// This call installed the process-wide logger.
    Installed,
    /// A logger was already installed; the sink passed in was dropped.
    AlreadyInitialized,
}

/// Flushes the process-wide sink when dropped.
///
/// The global logger lives in a static and is never dropped, so an
/// [`AsyncSink`](crate::AsyncSink) behind it would lose whatever is still
/// queued when `main` returns. Keep the guard alive in `main` until logging
/// is done:
///
/// ```
/// # use micro_logger::{initialize, AsyncSink, SilentSink};
/// let _guard = initialize(AsyncSink::new(SilentSink).unwrap(), None).unwrap();
/// micro_logger::info!("queued");
/// // dropping `_guard` waits for the queue to drain
/// ```
#[must_use = "dropping the guard flushes the logger right away"]
#[derive(Debug)]
pub struct FlushGuard {
    status: InitStatus,
}

impl FlushGuard {
    pub fn status(&self) -> InitStatus {
        self.status
    }
}

impl Drop for FlushGuard {
    fn drop(&mut self) {
        if let Err(err) = flush() {
            tracing::error!(error = %err, "failed to flush logger on shutdown");
        }
    }
}

/// Installs the process-wide logger used by the logging macros.
///
/// The first successful call wins, both for the sink and the parameters.
/// Later calls change nothing and report [`InitStatus::AlreadyInitialized`]
/// through [`FlushGuard::status`]; this is not an error so setup code may
/// run more than once. The check is atomic, concurrent first calls still
/// install exactly one logger.
///
/// `parameters` defaults to [`LogParameters::default`].
///
/// The returned [`FlushGuard`] flushes the sink when dropped. Hold it until
/// the program stops logging, otherwise lines buffered in the sink may be
/// lost at exit.
///
/// # Errors
///
/// [`ConfigError`] when the parameters are invalid. Nothing is installed in
/// that case.
pub fn initialize<S: LogSink + 'static>(
    sink: S,
    parameters: Option<LogParameters>,
) -> Result<FlushGuard, ConfigError> {
    if GLOBAL.get().is_some() {
        return Ok(FlushGuard {
            status: InitStatus::AlreadyInitialized,
        });
    }
    let logger = Logger::new(sink, parameters.unwrap_or_default())?;
    let status = match GLOBAL.set(logger) {
        Ok(()) => InitStatus::Installed,
        Err(_) => InitStatus::AlreadyInitialized,
    };
    Ok(FlushGuard { status })
}

/// The process-wide logger, once [`initialize`] has run.
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get()
}

/// Entry point behind the logging macros.
///
/// # Panics
///
/// When called before [`initialize`].
pub fn log(level: Level, file: &str, function: &str, line: u32, args: fmt::Arguments<'_>) {
    match GLOBAL.get() {
        Some(logger) => logger.log(level, file, function, line, args),
        None => panic!("micro_logger::initialize must be called before logging"),
    }
}

/// Flushes the process-wide sink. Does nothing before [`initialize`].
pub fn flush() -> io::Result<()> {
    match GLOBAL.get() {
        Some(logger) => logger.flush(),
        None => Ok(()),
    }
}

/// Name of the enclosing function, closures skipped.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        let name = name.strip_suffix("::__here").unwrap_or(name);
        name.rsplit("::")
            .find(|part| *part != "{{closure}}")
            .unwrap_or(name)
    }};
}

/// Logs at an explicit level, capturing file, line and function.
///
/// Targets the process-wide logger unless prefixed with `logger: <expr>,`.
///
/// ```
/// # use micro_logger::{Level, Logger, LogParameters, SilentSink};
/// let logger = Logger::new(SilentSink, LogParameters::default()).unwrap();
/// micro_logger::log!(logger: logger, Level::Debug, "x = {}", 3);
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $crate::basename(::std::file!()),
            $crate::__function_name!(),
            ::std::line!(),
            ::std::format_args!($($arg)+),
        )
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::log(
            $level,
            $crate::basename(::std::file!()),
            $crate::__function_name!(),
            ::std::line!(),
            ::std::format_args!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! trace {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Trace, $($arg)+) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Trace, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Debug, $($arg)+) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Info, $($arg)+) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Warn, $($arg)+) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Error, $($arg)+) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Error, $($arg)+) };
}

#[macro_export]
macro_rules! critical {
    (logger: $logger:expr, $($arg:tt)+) => { $crate::log!(logger: $logger, $crate::Level::Critical, $($arg)+) };
    ($($arg:tt)+) => { $crate::log!($crate::Level::Critical, $($arg)+) };
}

/// Traces entry into the enclosing function.
#[macro_export]
macro_rules! enter {
    (logger: $logger:expr) => { $crate::log!(logger: $logger, $crate::Level::Trace, "--ENTER--") };
    () => { $crate::log!($crate::Level::Trace, "--ENTER--") };
}

/// Traces exit from the enclosing function.
#[macro_export]
macro_rules! exit {
    (logger: $logger:expr) => { $crate::log!(logger: $logger, $crate::Level::Trace, "--EXIT--") };
    () => { $crate::log!($crate::Level::Trace, "--EXIT--") };
}
