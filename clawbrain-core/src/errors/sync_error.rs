/// Sync-state (RESP) client errors.
#[derive(Debug, thiserror::Error)]
pub enum SyncStateError {
    #[error("sync-state io error: {reason}")]
    Io { reason: String },

    #[error("sync-state protocol error: {reason}")]
    Protocol { reason: String },

    #[error("sync-state server error: {message}")]
    Server { message: String },
}
