//! TCP client speaking RESP: connection plus framed reader, owned together.

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

use clawbrain_core::config::SyncStateConfig;
use clawbrain_core::errors::{ClawbrainResult, SyncStateError};
use clawbrain_core::traits::ISyncState;

use crate::resp::{encode_command, read_reply, Reply};

/// One open session against the sync-state store.
pub struct RespClient {
    stream: BufReader<TcpStream>,
}

impl RespClient {
    pub async fn connect(config: &SyncStateConfig) -> ClawbrainResult<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|e| SyncStateError::Io {
                reason: format!("connect {addr}: {e}"),
            })?;
        debug!(%addr, "sync-state connected");
        Ok(Self {
            stream: BufReader::new(stream),
        })
    }

    async fn command(&mut self, args: &[&str]) -> ClawbrainResult<Reply> {
        let encoded = encode_command(args);
        self.stream
            .get_mut()
            .write_all(&encoded)
            .await
            .map_err(|e| SyncStateError::Io {
                reason: e.to_string(),
            })?;
        match read_reply(&mut self.stream).await? {
            Reply::Error(message) => Err(SyncStateError::Server { message }.into()),
            reply => Ok(reply),
        }
    }

    pub async fn ping(&mut self) -> ClawbrainResult<()> {
        match self.command(&["PING"]).await? {
            Reply::Simple(s) if s == "PONG" => Ok(()),
            other => Err(SyncStateError::Protocol {
                reason: format!("unexpected PING reply: {other:?}"),
            }
            .into()),
        }
    }

    pub async fn del(&mut self, key: &str) -> ClawbrainResult<bool> {
        match self.command(&["DEL", key]).await? {
            Reply::Integer(n) => Ok(n > 0),
            other => Err(SyncStateError::Protocol {
                reason: format!("unexpected DEL reply: {other:?}"),
            }
            .into()),
        }
    }
}

impl ISyncState for RespClient {
    async fn get(&mut self, key: &str) -> ClawbrainResult<Option<String>> {
        match self.command(&["GET", key]).await? {
            Reply::Bulk(value) => Ok(value),
            other => Err(SyncStateError::Protocol {
                reason: format!("unexpected GET reply: {other:?}"),
            }
            .into()),
        }
    }

    async fn set(&mut self, key: &str, value: &str) -> ClawbrainResult<()> {
        match self.command(&["SET", key, value]).await? {
            Reply::Simple(_) => Ok(()),
            other => Err(SyncStateError::Protocol {
                reason: format!("unexpected SET reply: {other:?}"),
            }
            .into()),
        }
    }

    async fn set_with_ttl(&mut self, key: &str, value: &str, ttl_secs: u64) -> ClawbrainResult<()> {
        let ttl = ttl_secs.to_string();
        match self.command(&["SET", key, value, "EX", &ttl]).await? {
            Reply::Simple(_) => Ok(()),
            other => Err(SyncStateError::Protocol {
                reason: format!("unexpected SET EX reply: {other:?}"),
            }
            .into()),
        }
    }

    async fn exists(&mut self, key: &str) -> ClawbrainResult<bool> {
        match self.command(&["EXISTS", key]).await? {
            Reply::Integer(n) => Ok(n > 0),
            other => Err(SyncStateError::Protocol {
                reason: format!("unexpected EXISTS reply: {other:?}"),
            }
            .into()),
        }
    }
}
