//! RESP framing: command encoding and reply parsing.
//!
//! Commands go out as arrays of bulk strings. Replies come back as simple
//! strings (`+`), errors (`-`), integers (`:`), or bulk strings (`$len`,
//! with `$-1` as the null sentinel). Nothing else is needed for the
//! command set this client speaks.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use clawbrain_core::errors::SyncStateError;

/// A parsed RESP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Simple(String),
    Error(String),
    Integer(i64),
    /// Bulk string; `None` is the null sentinel.
    Bulk(Option<String>),
}

/// Encode a command as a RESP array of bulk strings.
pub fn encode_command(args: &[&str]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 * (args.len() + 1));
    buf.extend_from_slice(format!("*{}\r\n", args.len()).as_bytes());
    for arg in args {
        buf.extend_from_slice(format!("${}\r\n", arg.len()).as_bytes());
        buf.extend_from_slice(arg.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
    buf
}

fn protocol(reason: impl Into<String>) -> SyncStateError {
    SyncStateError::Protocol {
        reason: reason.into(),
    }
}

fn io_err(e: std::io::Error) -> SyncStateError {
    SyncStateError::Io {
        reason: e.to_string(),
    }
}

async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<String, SyncStateError> {
    let mut line = String::new();
    let n = reader.read_line(&mut line).await.map_err(io_err)?;
    if n == 0 {
        return Err(protocol("connection closed mid-reply"));
    }
    if !line.ends_with("\r\n") {
        return Err(protocol(format!("missing CRLF terminator in {line:?}")));
    }
    line.truncate(line.len() - 2);
    Ok(line)
}

/// Read one framed reply.
pub async fn read_reply<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Reply, SyncStateError> {
    let line = read_line(reader).await?;
    let (kind, rest) = line
        .split_at_checked(1)
        .ok_or_else(|| protocol("empty reply line"))?;

    match kind {
        "+" => Ok(Reply::Simple(rest.to_string())),
        "-" => Ok(Reply::Error(rest.to_string())),
        ":" => rest
            .parse::<i64>()
            .map(Reply::Integer)
            .map_err(|_| protocol(format!("bad integer reply {rest:?}"))),
        "$" => {
            let len: i64 = rest
                .parse()
                .map_err(|_| protocol(format!("bad bulk length {rest:?}")))?;
            if len < 0 {
                return Ok(Reply::Bulk(None));
            }
            let mut body = vec![0u8; len as usize + 2];
            reader.read_exact(&mut body).await.map_err(io_err)?;
            if &body[len as usize..] != b"\r\n" {
                return Err(protocol("bulk string missing CRLF terminator"));
            }
            body.truncate(len as usize);
            let value = String::from_utf8(body)
                .map_err(|_| protocol("bulk string is not valid UTF-8"))?;
            Ok(Reply::Bulk(Some(value)))
        }
        other => Err(protocol(format!("unsupported reply type {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokio::io::BufReader;

    async fn parse(bytes: &[u8]) -> Result<Reply, SyncStateError> {
        let mut reader = BufReader::new(Cursor::new(bytes.to_vec()));
        read_reply(&mut reader).await
    }

    #[test]
    fn encodes_set_with_ttl() {
        let encoded = encode_command(&["SET", "k", "v", "EX", "604800"]);
        assert_eq!(
            encoded,
            b"*5\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\nv\r\n$2\r\nEX\r\n$6\r\n604800\r\n"
        );
    }

    #[tokio::test]
    async fn parses_simple_string() {
        assert_eq!(parse(b"+OK\r\n").await.unwrap(), Reply::Simple("OK".into()));
    }

    #[tokio::test]
    async fn parses_error() {
        assert_eq!(
            parse(b"-ERR wrong type\r\n").await.unwrap(),
            Reply::Error("ERR wrong type".into())
        );
    }

    #[tokio::test]
    async fn parses_integer() {
        assert_eq!(parse(b":42\r\n").await.unwrap(), Reply::Integer(42));
    }

    #[tokio::test]
    async fn parses_bulk_and_null_bulk() {
        assert_eq!(
            parse(b"$5\r\nhello\r\n").await.unwrap(),
            Reply::Bulk(Some("hello".into()))
        );
        assert_eq!(parse(b"$-1\r\n").await.unwrap(), Reply::Bulk(None));
    }

    #[tokio::test]
    async fn bulk_may_contain_crlf() {
        assert_eq!(
            parse(b"$7\r\na\r\nb\r\nc\r\n").await.unwrap(),
            Reply::Bulk(Some("a\r\nb\r\nc".into()))
        );
    }

    #[tokio::test]
    async fn rejects_truncated_reply() {
        assert!(parse(b"$5\r\nhel").await.is_err());
        assert!(parse(b"+OK").await.is_err());
    }
}
