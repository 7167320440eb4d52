use std::env;
use std::error::Error;
use std::process::ExitCode;
use std::thread;

use micro_logger::{AsyncSink, FileSink, LogSink, NetworkSink, SilentSink, StdoutSink};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: micro_logger [silent|stdout|file <path>|net <host:port>] [--async] [--threads N] [--lines N]";

/// Where the demo sends its lines. Read a network run with `nc -l -p <port>`.
enum Target {
    Silent,
    Stdout,
    File(String),
    Network { host: String, port: u16 },
}

struct Options {
    target: Target,
    async_writes: bool,
    threads: usize,
    lines: usize,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = Options {
            target: Target::Stdout,
            async_writes: false,
            threads: 4,
            lines: 10,
        };
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "silent" => options.target = Target::Silent,
                "stdout" => options.target = Target::Stdout,
                "file" => {
                    let path = args.next().ok_or("file needs a path")?;
                    options.target = Target::File(path.clone());
                }
                "net" => {
                    let address = args.next().ok_or("net needs host:port")?;
                    let (host, port) = address.rsplit_once(':').ok_or("net needs host:port")?;
                    let port = port.parse().map_err(|_| format!("bad port {port:?}"))?;
                    options.target = Target::Network {
                        host: host.to_string(),
                        port,
                    };
                }
                "--async" => options.async_writes = true,
                "--threads" => options.threads = parse_count(args.next(), "--threads")?,
                "--lines" => options.lines = parse_count(args.next(), "--lines")?,
                "-h" | "--help" => return Err(USAGE.to_string()),
                other => return Err(format!("unknown argument {other:?}\n{USAGE}")),
            }
        }
        Ok(options)
    }

    fn sink(&self) -> Result<Box<dyn LogSink>, Box<dyn Error>> {
        let sink: Box<dyn LogSink> = match &self.target {
            Target::Silent => Box::new(SilentSink),
            Target::Stdout => Box::new(StdoutSink),
            Target::File(path) => Box::new(FileSink::open(path)?),
            Target::Network { host, port } => Box::new(NetworkSink::connect(host, *port)?),
        };
        if self.async_writes {
            return Ok(Box::new(AsyncSink::new(sink)?));
        }
        Ok(sink)
    }
}

fn parse_count(value: Option<&String>, flag: &str) -> Result<usize, String> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{flag} needs a number"))
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let options = Options::parse(args)?;
    let _guard = micro_logger::initialize(options.sink()?, None)?;

    micro_logger::enter!();
    let lines = options.lines;
    let workers: Vec<_> = (0..options.threads)
        .map(|worker| {
            thread::spawn(move || {
                for line in 0..lines {
                    micro_logger::info!("worker {worker} says hello #{line}");
                }
                micro_logger::warn!("worker {worker} done");
            })
        })
        .collect();
    for worker in workers {
        worker.join().map_err(|_| "worker thread panicked")?;
    }
    micro_logger::critical!("{} lines from {} threads", lines * options.threads, options.threads);
    micro_logger::exit!();
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_timer(UtcTime::rfc_3339())
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("micro_logger: {err}");
            ExitCode::FAILURE
        }
    }
}
