//! TCP connection establishment, with optional TLS.

use std::io::{self, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use native_tls::{TlsConnector, TlsStream};

/// TLS options for collectors terminating their own certificates.
#[derive(Clone, Debug)]
pub struct TlsOptions {
    /// Domain name presented during the TLS handshake.
    pub domain: String,
    /// Skip certificate validation when true (intended for tests).
    pub insecure_skip_verify: bool,
}

impl TlsOptions {
    fn connector(&self) -> io::Result<TlsConnector> {
        let mut builder = TlsConnector::builder();
        if self.insecure_skip_verify {
            builder.danger_accept_invalid_certs(true);
            builder.danger_accept_invalid_hostnames(true);
        }
        builder.build().map_err(io::Error::other)
    }
}

/// An established connection to the collector.
pub enum Connection {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl Connection {
    /// Update the write timeout on the underlying socket.
    pub fn set_write_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        match self {
            Connection::Plain(stream) => stream.set_write_timeout(Some(timeout)),
            Connection::Tls(stream) => stream.get_ref().set_write_timeout(Some(timeout)),
        }
    }

    /// Write a full buffer to the socket.
    pub fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Connection::Plain(stream) => stream.write_all(buf),
            Connection::Tls(stream) => stream.write_all(buf),
        }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        match self {
            Connection::Plain(stream) => stream.flush(),
            Connection::Tls(stream) => stream.flush(),
        }
    }
}

fn resolve(host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    (host, port).to_socket_addrs().map(|iter| iter.collect())
}

fn connect_tcp(host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in resolve(host, port)? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no addresses resolved for {host}:{port}"),
        )
    }))
}

/// Connect to `host:port`, wrapping the stream in TLS when requested.
pub fn connect(
    host: &str,
    port: u16,
    tls: Option<&TlsOptions>,
    connect_timeout: Duration,
) -> io::Result<Connection> {
    let stream = connect_tcp(host, port, connect_timeout)?;
    match tls {
        Some(options) => {
            let connector = options.connector()?;
            // Bound the handshake with the connect timeout, then return to
            // blocking reads once established.
            stream.set_read_timeout(Some(connect_timeout))?;
            stream.set_write_timeout(Some(connect_timeout))?;
            let stream = connector
                .connect(&options.domain, stream)
                .map_err(io::Error::other)?;
            let tcp = stream.get_ref();
            tcp.set_read_timeout(None)?;
            tcp.set_write_timeout(None)?;
            Ok(Connection::Tls(Box::new(stream)))
        }
        None => Ok(Connection::Plain(stream)),
    }
}
