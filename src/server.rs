//! Server role: accept exactly one connection, read one message, reply
//! with a prefixed echo.
//!
//! The listening socket and the accepted connection are both dropped when
//! `serve_once` returns, on every exit path, so no listener survives the
//! exchange. A second connection attempt after the first completes is
//! refused.

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

/// Maximum number of bytes read in one receive call. Fixed protocol
/// parameter; implicitly caps the message length.
const BUFFER_SIZE: usize = 1024;

/// Literal prepended to the echoed message on the wire.
const RESPONSE_PREFIX: &str = "Antwort vom Server: ";

/// Bind the listen address and serve exactly one exchange.
///
/// Bind failure (address in use, permission) is fatal and propagates.
pub async fn run(listen: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Starting server");
    let listener = TcpListener::bind(listen).await?;
    info!(address = %listen, "Waiting for a client");
    serve_once(listener).await
}

/// Accept one connection on `listener`, echo one message back, then close
/// both sockets.
///
/// Blocks until a client connects. A zero-byte read (peer closed without
/// sending) yields an empty message that is still echoed.
pub async fn serve_once(
    listener: TcpListener,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (stream, peer) = listener.accept().await?;
    info!(peer = %peer, "Connection established");
    handle_client(stream).await
}

/// Receive the client's message and send the prefixed response.
async fn handle_client(
    mut stream: TcpStream,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Handling message from client");
    let message = read_message(&mut stream).await?;
    info!(message = %message, "Message received");

    let response = format!("{RESPONSE_PREFIX}{message}");
    stream.write_all(response.as_bytes()).await?;
    info!("Closing connection");
    Ok(())
}

/// One receive call, capped at `BUFFER_SIZE` bytes, decoded as UTF-8.
///
/// A payload longer than `BUFFER_SIZE` is truncated, not rejected. Invalid
/// UTF-8 is fatal and propagates.
async fn read_message(
    stream: &mut TcpStream,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut buffer = BytesMut::zeroed(BUFFER_SIZE);
    let n = stream.read(&mut buffer).await?;
    buffer.truncate(n);
    Ok(std::str::from_utf8(&buffer)?.to_owned())
}
