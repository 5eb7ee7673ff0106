use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// A single connection attempt against `host:port`.
pub trait Connector: Send + Sync {
    fn connect(&self, host: &str, port: u16, timeout: Duration) -> io::Result<()>;
}

/// Plain TCP connect; the stream is dropped as soon as it is established.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    fn connect(&self, host: &str, port: u16, timeout: Duration) -> io::Result<()> {
        let host = host.trim_start_matches('[').trim_end_matches(']');
        let mut last_err = None;
        for addr in (host, port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(_) => return Ok(()),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}:{} did not resolve to any address", host, port),
            )
        }))
    }
}
