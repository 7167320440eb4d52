use micro_logger::{parse_line, Level, LineReader, LogParameters, LogSink, Logger, ThreadInfo};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

/// Keeps every line it receives, one entry per write.
#[derive(Clone, Default)]
struct CollectingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CollectingSink {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for CollectingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8(buf.to_vec()).expect("log lines are utf-8");
        self.lines.lock().unwrap().push(line);
        Ok(buf.len())
    }
}

fn logger_with(params: LogParameters) -> (Logger, CollectingSink) {
    let sink = CollectingSink::default();
    let logger = Logger::new(sink.clone(), params).unwrap();
    (logger, sink)
}

#[test]
fn test_hello_world_scenario() {
    let (logger, sink) = logger_with(LogParameters::default());
    logger.log(Level::Info, "file.cpp", "func", 42, format_args!("hello {}", "world"));

    let lines = sink.lines();
    assert_eq!(lines.len(), 1, "One call should produce exactly one write");
    assert!(lines[0].ends_with('\n'));

    let line = parse_line(&lines[0]).expect("line should match the wire format");
    assert_eq!(line.message, "hello world");
    assert_eq!(line.line, "042");
    assert_eq!(line.line_number(), Some(42));
    assert_eq!(line.level, Level::Info);
    assert!(lines[0].contains("[INFO ]"));
    assert_eq!(line.file, "file.cpp");
    assert_eq!(line.function, "func");
}

#[test]
fn test_wire_format_round_trip() {
    let (logger, sink) = logger_with(LogParameters::default());
    micro_logger::error!(logger: logger, "disk {} at {}%", "sda", 97);

    let lines = sink.lines();
    let line = parse_line(&lines[0]).unwrap();
    let me = ThreadInfo::current();
    assert_eq!(line.level, Level::Error);
    assert_eq!(line.pid, std::process::id());
    assert_eq!(line.tid, me.tid);
    assert_eq!(line.file, "logger_tests.rs");
    assert_eq!(line.function, "test_wire_format_round_trip");
    assert_eq!(line.message, "disk sda at 97%");
    assert!(line.line_number().unwrap() > 0);
    assert_eq!(line.date.len(), 8);
    assert_eq!(line.time.len(), 12);
}

#[test]
fn test_every_level_tag() {
    let (logger, sink) = logger_with(LogParameters::default());
    micro_logger::trace!(logger: logger, "t");
    micro_logger::debug!(logger: logger, "d");
    micro_logger::info!(logger: logger, "i");
    micro_logger::warn!(logger: logger, "w");
    micro_logger::error!(logger: logger, "e");
    micro_logger::critical!(logger: logger, "c");

    let text = sink.lines().concat();
    let levels: Vec<Level> = LineReader::new(&text).map(|line| line.level).collect();
    assert_eq!(
        levels,
        vec![
            Level::Trace,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Critical
        ]
    );
    for tag in ["[TRACE]", "[DEBUG]", "[INFO ]", "[WARN ]", "[ERROR]", "[CRITI]"] {
        assert!(text.contains(tag), "Missing level tag {tag}");
    }
}

#[test]
fn test_enter_exit_markers() {
    let (logger, sink) = logger_with(LogParameters::default());
    micro_logger::enter!(logger: logger);
    micro_logger::exit!(logger: logger);

    let text = sink.lines().concat();
    let lines: Vec<_> = LineReader::new(&text).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].message, "--ENTER--");
    assert_eq!(lines[1].message, "--EXIT--");
    assert!(lines.iter().all(|l| l.level == Level::Trace));
    assert!(lines.iter().all(|l| l.function == "test_enter_exit_markers"));
}

#[test]
fn test_custom_sizes_truncate_message() {
    let params = LogParameters::default().with_message_size(6).with_line_width(5);
    let (logger, sink) = logger_with(params);
    logger.log(Level::Info, "file.cpp", "func", 42, format_args!("hello {}", "world"));

    let lines = sink.lines();
    let line = parse_line(&lines[0]).expect("truncated line should still parse");
    assert_eq!(line.message, "hello");
    assert_eq!(line.line, "00042");
}

#[test]
fn test_oversized_line_is_cut_not_dropped() {
    let params = LogParameters::default().with_header_size(32).with_message_size(16);
    let (logger, sink) = logger_with(params);
    let long = "x".repeat(1000);
    micro_logger::info!(logger: logger, "{long}");

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].len() <= 48, "Line of {} bytes exceeds capacity", lines[0].len());
}

#[test]
fn test_filename_width_right_aligns() {
    let params = LogParameters::default().with_filename_width(10);
    let (logger, sink) = logger_with(params);
    logger.log(Level::Warn, "net.rs", "send", 7, format_args!("retry"));

    let lines = sink.lines();
    assert!(lines[0].contains("[    net.rs:007::send][retry]"));
    assert_eq!(parse_line(&lines[0]).unwrap().file, "net.rs");
}

#[test]
fn test_custom_header_pattern() {
    let params = LogParameters::default()
        .with_time_format("")
        .with_header_pattern("{level}|{func}|{{literal}}|{message}\n");
    let (logger, sink) = logger_with(params);
    logger.log(Level::Debug, "a.rs", "work", 1, format_args!("step {}", 3));

    assert_eq!(sink.lines(), vec!["DEBUG|work|{literal}|step 3\n".to_string()]);
}

#[test]
fn test_invalid_pattern_rejected() {
    let params = LogParameters::default().with_header_pattern("[{lvl}]");
    assert!(Logger::new(CollectingSink::default(), params).is_err());
}

#[test]
fn test_concurrent_lines_do_not_interleave() {
    const LINES_PER_THREAD: usize = 500;
    let (logger, sink) = logger_with(LogParameters::default());

    thread::scope(|s| {
        for worker in 0..2 {
            let logger = &logger;
            s.spawn(move || {
                for i in 0..LINES_PER_THREAD {
                    micro_logger::info!(logger: logger, "worker {worker} line {i}");
                }
            });
        }
    });

    let lines = sink.lines();
    assert_eq!(lines.len(), 2 * LINES_PER_THREAD);

    let mut per_tid: HashMap<u64, Vec<String>> = HashMap::new();
    for text in &lines {
        assert_eq!(text.matches('\n').count(), 1, "Torn line: {text:?}");
        let line = parse_line(text).expect("every line should parse");
        per_tid.entry(line.tid).or_default().push(line.message.to_string());
    }

    assert_eq!(per_tid.len(), 2, "Each thread should carry its own tid");
    for messages in per_tid.values() {
        assert_eq!(messages.len(), LINES_PER_THREAD);
        // Lines from one thread keep their order
        let worker = messages[0].split(' ').nth(1).unwrap().to_string();
        for (i, message) in messages.iter().enumerate() {
            assert_eq!(message, &format!("worker {worker} line {i}"));
        }
    }
    assert_eq!(logger.formatter().headers().len(), 2);
}

#[test]
fn test_tid_differs_across_threads() {
    let here = ThreadInfo::current();
    let there = thread::spawn(ThreadInfo::current).join().unwrap();
    assert_eq!(here.pid, there.pid);
    assert_ne!(here.tid, there.tid);
    assert_eq!(ThreadInfo::current(), here, "Identity should be stable within a thread");
}

#[test]
fn test_log_crate_levels_map() {
    assert_eq!(Level::from(log::Level::Error), Level::Error);
    assert_eq!(Level::from(log::Level::Warn), Level::Warn);
    assert_eq!(Level::from(log::Level::Info), Level::Info);
    assert_eq!(Level::from(log::Level::Debug), Level::Debug);
    assert_eq!(Level::from(log::Level::Trace), Level::Trace);
}

struct LogOnThreadExit(Arc<Logger>);

impl Drop for LogOnThreadExit {
    fn drop(&mut self) {
        micro_logger::info!(logger: self.0, "thread exiting");
    }
}

thread_local! {
    static ON_EXIT: RefCell<Option<LogOnThreadExit>> = const { RefCell::new(None) };
}

#[test]
fn test_logging_from_thread_local_destructor() {
    let params = LogParameters::default()
        .with_time_format("")
        .with_header_pattern("{thread} {message}\n");
    let sink = CollectingSink::default();
    let logger = Arc::new(Logger::new(sink.clone(), params).unwrap());

    let worker_logger = Arc::clone(&logger);
    let tid = thread::spawn(move || {
        micro_logger::info!(logger: worker_logger, "working");
        ON_EXIT.with(|slot| *slot.borrow_mut() = Some(LogOnThreadExit(worker_logger)));
        ThreadInfo::current().tid
    })
    .join()
    .expect("logging during thread teardown should not panic");

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    let prefix = format!("[pid:{:08}][tid:{tid:016}] ", std::process::id());
    assert_eq!(lines[0], format!("{prefix}working\n"));
    assert_eq!(lines[1], format!("{prefix}thread exiting\n"));
    assert_eq!(logger.formatter().headers().len(), 1);
}
