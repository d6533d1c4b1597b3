//! Length-prefixed framing for coder messages.
//!
//! A frame is a 4-byte big-endian body length followed by the CBOR
//! body. The limit guards both sides against a garbage length prefix.

use crate::error::{ProtocolError, ProtocolResult};
use crate::messages::CoderMessage;
use bytes::{BufMut, BytesMut};
use std::io::{Read, Write};

/// Maximum frame body size, in bytes.
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Writes one framed message.
///
/// # Errors
///
/// Fails if the body exceeds [`MAX_FRAME_LEN`], on encode failure, or
/// on I/O failure.
pub fn write_message<W: Write>(writer: &mut W, message: &CoderMessage) -> ProtocolResult<()> {
    let body = message.encode()?;
    if body.len() > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLarge {
            len: body.len(),
            max: MAX_FRAME_LEN,
        });
    }

    let mut frame = BytesMut::with_capacity(4 + body.len());
    frame.put_u32(body.len() as u32);
    frame.put_slice(&body);
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Reads one framed message.
///
/// # Errors
///
/// Fails if the announced length exceeds [`MAX_FRAME_LEN`], on a short
/// read, or if the body is not a valid message.
pub fn read_message<R: Read>(reader: &mut R) -> ProtocolResult<CoderMessage> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLarge {
            len,
            max: MAX_FRAME_LEN,
        });
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    CoderMessage::decode(&body)
}
