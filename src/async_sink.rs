use std::io::{self, ErrorKind};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use crate::error::SinkError;
use crate::sink::LogSink;

enum Command {
    Write(Vec<u8>),
    Flush(Sender<()>),
}

/// Moves the actual write onto a background thread.
///
/// `write` copies the line into a queue and returns at once. A dedicated
/// worker forwards queued lines to the inner sink one at a time, in
/// submission order. Dropping the sink closes the queue, lets the worker
/// drain whatever is still pending and joins it, so every line submitted
/// before the drop reaches the inner sink before `drop` returns.
pub struct AsyncSink {
    sender: Option<Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl AsyncSink {
    /// Spawns the worker thread that owns `inner`.
    pub fn new<S: LogSink + 'static>(inner: S) -> Result<Self, SinkError> {
        let (sender, receiver) = unbounded::<Command>();
        let worker = thread::Builder::new()
            .name("micro_logger-async".into())
            .spawn(move || run_worker(inner, receiver))
            .map_err(SinkError::Spawn)?;
        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    fn submit(&self, command: Command) -> io::Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| io::Error::from(ErrorKind::BrokenPipe))?;
        sender
            .send(command)
            .map_err(|_| io::Error::new(ErrorKind::BrokenPipe, "async writer thread is gone"))
    }
}

fn run_worker<S: LogSink>(mut inner: S, receiver: Receiver<Command>) {
    // iter() keeps yielding queued commands after the sender is dropped
    for command in receiver.iter() {
        match command {
            Command::Write(line) => {
                if let Err(err) = inner.write(&line) {
                    tracing::debug!(error = %err, "async sink: inner write failed");
                }
            }
            Command::Flush(done) => {
                if let Err(err) = inner.flush() {
                    tracing::debug!(error = %err, "async sink: inner flush failed");
                }
                let _ = done.send(());
            }
        }
    }
    let _ = inner.flush();
}

impl LogSink for AsyncSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.submit(Command::Write(buf.to_vec()))?;
        Ok(buf.len())
    }

    /// Blocks until every line submitted so far has reached the inner sink.
    fn flush(&mut self) -> io::Result<()> {
        let (done, wait) = bounded(1);
        self.submit(Command::Flush(done))?;
        wait.recv()
            .map_err(|_| io::Error::new(ErrorKind::BrokenPipe, "async writer thread is gone"))
    }
}

impl Drop for AsyncSink {
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("async sink worker panicked");
            }
        }
    }
}
