//! Client role: connect once, send one message, log the reply.
//!
//! There is no retry or backoff: if nothing is listening on the address
//! yet, the connect fails and the error propagates.

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::info;

/// Maximum number of bytes read in one receive call.
const BUFFER_SIZE: usize = 1024;

/// Connect to `addr`, send `message`, and return the server's reply.
///
/// The reply is whatever a single receive call delivers, decoded as UTF-8.
/// The connection is closed on every exit path when the stream drops.
pub async fn exchange_messages(
    addr: &str,
    message: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    info!("Connecting to server");
    let mut stream = TcpStream::connect(addr).await?;
    info!(address = %addr, "Connected");

    stream.write_all(message.as_bytes()).await?;

    let mut buffer = BytesMut::zeroed(BUFFER_SIZE);
    let n = stream.read(&mut buffer).await?;
    buffer.truncate(n);
    let reply = std::str::from_utf8(&buffer)?.to_owned();
    info!(reply = %reply, "Reply received");
    Ok(reply)
}
