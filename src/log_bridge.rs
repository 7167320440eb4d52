//! Routes records from the `log` crate macros through micro_logger.

use log::{LevelFilter, Metadata};

use crate::error::BridgeError;
use crate::logger::{self, Logger};
use crate::record::{basename, Record};

impl log::Log for Logger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.log_record(&Record {
            level: record.level().into(),
            file: record.file().map(basename).unwrap_or("unknown"),
            function: record.module_path().unwrap_or_else(|| record.target()),
            line: record.line().unwrap_or(0),
            args: *record.args(),
        });
    }

    fn flush(&self) {
        let _ = Logger::flush(self);
    }
}

/// Makes the process-wide logger the backend of the `log` crate.
///
/// Every level is forwarded; micro_logger does not filter.
pub fn install_log_bridge() -> Result<(), BridgeError> {
    let logger = logger::global().ok_or(BridgeError::NotInitialized)?;
    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
