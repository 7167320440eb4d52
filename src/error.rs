use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Malformed input handed to the hex helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    /// Hex text must hold two digits per byte.
    #[error("hex string has odd length {0}, every byte needs two digits")]
    OddLength(usize),

    /// A digit pair is not valid hexadecimal.
    #[error("data is incorrect [{pair}] at offset {offset}")]
    InvalidDigit { offset: usize, pair: String },

    /// Integral reconstruction only accepts 1, 2, 4 or 8 bytes.
    #[error("input of {len} bytes does not match a supported integral width (1, 2, 4 or 8 up to {max})")]
    UnsupportedLength { len: usize, max: usize },
}

/// A sink could not be set up.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The log file could not be opened.
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The address did not resolve or no connection could be made.
    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The background writer thread could not be started.
    #[error("failed to spawn async writer thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Rejected logger parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("message_size must be at least 1")]
    MessageSize,

    #[error("header_size must be at least 1")]
    HeaderSize,

    #[error("invalid header pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("invalid time format {0:?}")]
    TimeFormat(String),
}

/// The `log` crate bridge could not be installed.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("micro_logger::initialize must run before installing the log bridge")]
    NotInitialized,

    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
}
