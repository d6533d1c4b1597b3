//! Framed-TCP serve loop.

use crate::server::CoderServer;
use std::io::{self, ErrorKind};
use std::sync::Arc;
use stripstore_protocol::{CoderMessage, ErrorResponse, MAX_FRAME_LEN};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Accepts connections and serves coder requests until the listener
/// fails.
///
/// Each connection's requests are handled sequentially in their own
/// task; a failed request or a dropped connection never affects other
/// connections or the process.
pub async fn serve(server: Arc<CoderServer>, listener: TcpListener) -> io::Result<()> {
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, codec = server.codec_name(), "coder service listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        let server = Arc::clone(&server);
        tokio::spawn(async move {
            tracing::debug!(%peer, "connection opened");
            if let Err(err) = handle_connection(&server, stream).await {
                tracing::debug!(%peer, error = %err, "connection closed with error");
            } else {
                tracing::debug!(%peer, "connection closed");
            }
        });
    }
}

async fn handle_connection(server: &CoderServer, mut stream: TcpStream) -> io::Result<()> {
    loop {
        let request = match read_frame(&mut stream).await? {
            FrameOutcome::Message(message) => message,
            FrameOutcome::Eof => return Ok(()),
            FrameOutcome::Malformed(reason) => {
                // Reject synchronously; the frame boundary may be
                // lost, so drop the connection afterwards.
                let reply = CoderMessage::Error(ErrorResponse::new(reason));
                write_frame(&mut stream, &reply).await?;
                return Ok(());
            }
        };

        let code = request.type_code();
        let reply = server.handle_message(request);
        tracing::debug!(
            request = code,
            reply = reply.type_code(),
            "request handled"
        );
        write_frame(&mut stream, &reply).await?;
    }
}

enum FrameOutcome {
    Message(CoderMessage),
    Eof,
    Malformed(String),
}

async fn read_frame(stream: &mut TcpStream) -> io::Result<FrameOutcome> {
    let mut len_buf = [0u8; 4];
    match stream.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => return Ok(FrameOutcome::Eof),
        Err(err) => return Err(err),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Ok(FrameOutcome::Malformed(format!(
            "frame of {len} bytes exceeds limit of {MAX_FRAME_LEN}"
        )));
    }

    let mut body = vec![0u8; len];
    stream.read_exact(&mut body).await?;

    match CoderMessage::decode(&body) {
        Ok(message) => Ok(FrameOutcome::Message(message)),
        Err(err) => Ok(FrameOutcome::Malformed(err.to_string())),
    }
}

async fn write_frame(stream: &mut TcpStream, message: &CoderMessage) -> io::Result<()> {
    let body = message
        .encode()
        .map_err(|e| io::Error::new(ErrorKind::InvalidData, e.to_string()))?;
    stream.write_u32(body.len() as u32).await?;
    stream.write_all(&body).await?;
    stream.flush().await?;
    Ok(())
}
