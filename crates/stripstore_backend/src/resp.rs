//! Minimal RESP (Redis serialization protocol) client plumbing.
//!
//! Implements only what the backend needs: array-of-bulk-string
//! commands out, the five RESP2 reply kinds back. No pipelining, no
//! pub/sub, no RESP3.

use crate::error::{BackendError, BackendResult};
use bytes::{BufMut, BytesMut};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// A reply from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reply {
    /// `+OK\r\n`
    Simple(String),
    /// `-ERR ...\r\n`
    Error(String),
    /// `:42\r\n`
    Integer(i64),
    /// `$n\r\n<bytes>\r\n`, `None` for the nil bulk (`$-1`).
    Bulk(Option<Vec<u8>>),
    /// `*n\r\n<replies>`, `None` for the nil array (`*-1`).
    Array(Option<Vec<Reply>>),
}

/// Encodes a command as a RESP array of bulk strings.
pub(crate) fn encode_command(args: &[&[u8]]) -> BytesMut {
    let payload: usize = args.iter().map(|a| a.len() + 16).sum();
    let mut buf = BytesMut::with_capacity(payload + 16);
    buf.put_u8(b'*');
    buf.put_slice(args.len().to_string().as_bytes());
    buf.put_slice(b"\r\n");
    for arg in args {
        buf.put_u8(b'$');
        buf.put_slice(arg.len().to_string().as_bytes());
        buf.put_slice(b"\r\n");
        buf.put_slice(arg);
        buf.put_slice(b"\r\n");
    }
    buf
}

/// Reads one reply, recursing into arrays.
pub(crate) fn read_reply<R: BufRead>(reader: &mut R) -> BackendResult<Reply> {
    let line = read_line(reader)?;
    let (kind, rest) = line
        .split_at_checked(1)
        .ok_or_else(|| BackendError::Protocol("empty reply line".into()))?;

    match kind.as_bytes()[0] {
        b'+' => Ok(Reply::Simple(rest.to_string())),
        b'-' => Ok(Reply::Error(rest.to_string())),
        b':' => {
            let n = rest
                .parse::<i64>()
                .map_err(|_| BackendError::Protocol(format!("bad integer reply: {rest}")))?;
            Ok(Reply::Integer(n))
        }
        b'$' => {
            let len = rest
                .parse::<i64>()
                .map_err(|_| BackendError::Protocol(format!("bad bulk length: {rest}")))?;
            if len < 0 {
                return Ok(Reply::Bulk(None));
            }
            let mut data = vec![0u8; len as usize];
            reader.read_exact(&mut data)?;
            let mut crlf = [0u8; 2];
            reader.read_exact(&mut crlf)?;
            if &crlf != b"\r\n" {
                return Err(BackendError::Protocol("bulk reply missing CRLF".into()));
            }
            Ok(Reply::Bulk(Some(data)))
        }
        b'*' => {
            let len = rest
                .parse::<i64>()
                .map_err(|_| BackendError::Protocol(format!("bad array length: {rest}")))?;
            if len < 0 {
                return Ok(Reply::Array(None));
            }
            let mut items = Vec::with_capacity(len as usize);
            for _ in 0..len {
                items.push(read_reply(reader)?);
            }
            Ok(Reply::Array(Some(items)))
        }
        other => Err(BackendError::Protocol(format!(
            "unknown reply type byte: {:#04x}",
            other
        ))),
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> BackendResult<String> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    if !line.ends_with(b"\r\n") {
        return Err(BackendError::Protocol("truncated reply line".into()));
    }
    line.truncate(line.len() - 2);
    String::from_utf8(line).map_err(|_| BackendError::Protocol("non-UTF-8 reply line".into()))
}

/// One TCP connection speaking RESP.
///
/// Connect, read, and write all respect the timeout given at
/// construction, so a stuck backend surfaces as an I/O error instead
/// of hanging the calling thread.
pub(crate) struct RespConnection {
    writer: TcpStream,
    reader: BufReader<TcpStream>,
}

impl RespConnection {
    /// Connects to `addr` (`host:port`) with the given timeout.
    pub(crate) fn connect(addr: &str, timeout: Duration) -> BackendResult<Self> {
        let socket_addr = addr
            .to_socket_addrs()
            .map_err(|e| BackendError::InvalidAddress(format!("{addr}: {e}")))?
            .next()
            .ok_or_else(|| BackendError::InvalidAddress(addr.to_string()))?;

        let stream = TcpStream::connect_timeout(&socket_addr, timeout)?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;
        stream.set_nodelay(true)?;
        let reader = BufReader::new(stream.try_clone()?);

        Ok(Self {
            writer: stream,
            reader,
        })
    }

    /// Sends one command and reads its reply.
    pub(crate) fn request(&mut self, args: &[&[u8]]) -> BackendResult<Reply> {
        let command = encode_command(args);
        self.writer.write_all(&command)?;
        self.writer.flush()?;
        read_reply(&mut self.reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(input: &[u8]) -> BackendResult<Reply> {
        read_reply(&mut Cursor::new(input.to_vec()))
    }

    #[test]
    fn encode_mset_command() {
        let buf = encode_command(&[b"MSET", b"k-0", b"ab"]);
        assert_eq!(&buf[..], b"*3\r\n$4\r\nMSET\r\n$3\r\nk-0\r\n$2\r\nab\r\n");
    }

    #[test]
    fn parse_simple_string() {
        assert_eq!(parse(b"+OK\r\n").unwrap(), Reply::Simple("OK".into()));
    }

    #[test]
    fn parse_error_reply() {
        assert_eq!(
            parse(b"-ERR wrong number of arguments\r\n").unwrap(),
            Reply::Error("ERR wrong number of arguments".into())
        );
    }

    #[test]
    fn parse_integer() {
        assert_eq!(parse(b":42\r\n").unwrap(), Reply::Integer(42));
    }

    #[test]
    fn parse_bulk_string() {
        assert_eq!(
            parse(b"$5\r\nhello\r\n").unwrap(),
            Reply::Bulk(Some(b"hello".to_vec()))
        );
    }

    #[test]
    fn parse_nil_bulk() {
        assert_eq!(parse(b"$-1\r\n").unwrap(), Reply::Bulk(None));
    }

    #[test]
    fn parse_array_of_bulks() {
        let reply = parse(b"*2\r\n$1\r\na\r\n$-1\r\n").unwrap();
        assert_eq!(
            reply,
            Reply::Array(Some(vec![
                Reply::Bulk(Some(b"a".to_vec())),
                Reply::Bulk(None),
            ]))
        );
    }

    #[test]
    fn parse_empty_array() {
        assert_eq!(parse(b"*0\r\n").unwrap(), Reply::Array(Some(vec![])));
    }

    #[test]
    fn parse_truncated_line_fails() {
        assert!(matches!(
            parse(b"+OK"),
            Err(BackendError::Protocol(_))
        ));
    }

    #[test]
    fn parse_unknown_type_fails() {
        assert!(matches!(parse(b"!oops\r\n"), Err(BackendError::Protocol(_))));
    }

    #[test]
    fn parse_bulk_with_binary_payload() {
        assert_eq!(
            parse(b"$3\r\n\x00\xff\x7f\r\n").unwrap(),
            Reply::Bulk(Some(vec![0x00, 0xff, 0x7f]))
        );
    }
}
