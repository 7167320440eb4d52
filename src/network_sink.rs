use std::io::{self, ErrorKind, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use crate::error::SinkError;
use crate::sink::LogSink;

/// Streams lines to a TCP peer, e.g. `nc -l -p <port>`.
///
/// When a write reports that the peer went away, the sink drops the socket,
/// dials again and retries that write once. If the new connection cannot be
/// made the sink stays disconnected and tries again on the next write.
/// Any number of network sinks can coexist.
#[derive(Debug)]
pub struct NetworkSink {
    host: String,
    port: u16,
    stream: Option<TcpStream>,
}

impl NetworkSink {
    /// Resolves `host:port` and connects.
    pub fn connect(host: &str, port: u16) -> Result<Self, SinkError> {
        let stream = dial(host, port)?;
        tracing::debug!(host, port, "network sink connected");
        Ok(Self {
            host: host.to_string(),
            port,
            stream: Some(stream),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.stream.as_ref().and_then(|s| s.peer_addr().ok())
    }

    /// Closes the current socket, if any, and opens a new connection.
    pub fn reconnect(&mut self) -> Result<(), SinkError> {
        self.stream = None;
        let stream = dial(&self.host, self.port)?;
        self.stream = Some(stream);
        tracing::debug!(host = %self.host, port = self.port, "network sink reconnected");
        Ok(())
    }

    fn send(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.stream.as_mut() {
            Some(stream) => stream.write_all(buf),
            None => Err(io::Error::from(ErrorKind::NotConnected)),
        }
    }

    fn recover(&mut self) -> io::Result<()> {
        self.reconnect().map_err(|err| {
            tracing::error!(error = %err, "network sink failed to reconnect");
            io::Error::new(ErrorKind::NotConnected, err)
        })
    }
}

impl LogSink for NetworkSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.send(buf) {
            Ok(()) => return Ok(buf.len()),
            Err(err) if is_disconnect(&err) => {
                tracing::warn!(error = %err, host = %self.host, port = self.port, "peer went away, reconnecting");
            }
            Err(err) => return Err(err),
        }
        self.recover()?;
        self.send(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stream.as_mut() {
            Some(stream) => stream.flush(),
            None => Ok(()),
        }
    }
}

fn is_disconnect(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::BrokenPipe
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
    )
}

fn dial(host: &str, port: u16) -> Result<TcpStream, SinkError> {
    let address = format!("{host}:{port}");
    let connect_err = |source: io::Error| SinkError::Connect {
        address: address.clone(),
        source,
    };

    let mut last_err = io::Error::new(ErrorKind::AddrNotAvailable, "address resolved to nothing");
    for addr in (host, port).to_socket_addrs().map_err(connect_err)? {
        match TcpStream::connect(addr) {
            Ok(stream) => {
                stream.set_nodelay(true).map_err(connect_err)?;
                return Ok(stream);
            }
            Err(err) => last_err = err,
        }
    }
    Err(connect_err(last_err))
}
