//! # micro_logger
//!
//! A minimal logger that renders every record as one self-describing line:
//!
//! ```text
//! [10/17/26 09:14:07.042][INFO ][pid:00004242][tid:0000000000000001][main.rs:042::main][hello world]
//! ```
//!
//! and hands it to a pluggable [`LogSink`], with writes serialized across threads.
//!
//! ## Key Features
//!
//! * Per-thread header templates: process and thread identity are rendered
//!   once per thread, not once per line
//! * Bounded formatting: oversized messages are truncated, never rejected
//! * Sinks for nothing, stdout, files, TCP peers (with reconnect) and a
//!   background-thread wrapper for any of them
//! * An explicit [`Logger`] handle, or a process-wide logger set up once
//!   through [`initialize`]
//!
//! ## Main Components
//!
//! * `logger`: [`Logger`], [`initialize`] and the logging macros
//! * `formatter`: header template cache and line assembly
//! * `clock`: timestamp rendering
//! * `sink`, `network_sink`, `async_sink`: output destinations
//! * `line_reader`: parser for the wire format
//! * `hex`: byte and hex-text helpers
//!
//! ## Quick Start
//!
//! ```
//! use micro_logger::{initialize, InitStatus, StdoutSink};
//!
//! // first call wins, later calls are ignored
//! let guard = initialize(StdoutSink, None).unwrap();
//! assert_eq!(guard.status(), InitStatus::Installed);
//! let again = initialize(StdoutSink, None).unwrap();
//! assert_eq!(again.status(), InitStatus::AlreadyInitialized);
//!
//! micro_logger::info!("hello {}", "world");
//! micro_logger::warn!("disk at {}%", 93);
//! ```
//!
//! Initialize once, early, before spawning threads that log, and keep the
//! returned guard alive until the end of `main`: dropping it flushes the
//! sink, which is the only way queued lines reach their destination since
//! the process-wide logger itself is never dropped. Logging through the
//! macros without a logger installed panics.

pub mod async_sink;
pub mod bounded;
pub mod clock;
pub mod config;
pub mod error;
pub mod formatter;
pub mod hex;
pub mod line_reader;
pub mod log_bridge;
pub mod logger;
pub mod network_sink;
pub mod record;
pub mod sink;
pub mod template;
pub mod thread_info;

pub use async_sink::AsyncSink;
pub use config::LogParameters;
pub use error::{BridgeError, ConfigError, HexError, SinkError};
pub use formatter::RecordFormatter;
pub use hex::{bytes_to_hex, bytes_to_integral, hex_to_bytes};
pub use line_reader::{parse_line, LineReader, LogLine};
pub use log_bridge::install_log_bridge;
pub use logger::{flush, global, initialize, log, FlushGuard, InitStatus, Logger};
pub use network_sink::NetworkSink;
pub use record::{basename, Level, Record};
pub use sink::{FileSink, LogSink, SilentSink, StdoutSink};
pub use thread_info::ThreadInfo;
