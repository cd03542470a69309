//! TCP transport: connection establishment and keepalive tuning.
//!
//! Gateways are headless boxes on the boat network; dead peers are detected
//! through TCP keepalive rather than per-call timeouts.
use crate::error::TransportError;
use socket2::{SockRef, TcpKeepalive};
use std::time::Duration;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// Keepalive profile applied to every gateway connection: 30 s idle, 10 s
/// probe interval, 5 probes before the peer is declared dead.
const KEEPALIVE_IDLE: Duration = Duration::from_secs(30);
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(10);
const KEEPALIVE_RETRIES: u32 = 5;

/// Open a TCP connection to the gateway and enable keepalive.
pub(super) async fn open(
    host: &str,
    port: u16,
) -> Result<(OwnedReadHalf, OwnedWriteHalf), TransportError> {
    let stream = TcpStream::connect((host, port)).await?;

    let keepalive = TcpKeepalive::new()
        .with_time(KEEPALIVE_IDLE)
        .with_interval(KEEPALIVE_INTERVAL)
        .with_retries(KEEPALIVE_RETRIES);
    SockRef::from(&stream).set_tcp_keepalive(&keepalive)?;

    Ok(stream.into_split())
}
