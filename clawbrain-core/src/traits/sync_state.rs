use crate::errors::ClawbrainResult;

/// Key-value store for per-file ingestion markers.
///
/// The client is stateful (connection + framed reader), so operations take
/// `&mut self`; the operation that opened the connection owns it.
#[allow(async_fn_in_trait)]
pub trait ISyncState: Send {
    /// Fetch a value. `None` when the key is absent.
    async fn get(&mut self, key: &str) -> ClawbrainResult<Option<String>>;

    /// Store a value with no expiry.
    async fn set(&mut self, key: &str, value: &str) -> ClawbrainResult<()>;

    /// Store a value that expires after `ttl_secs`.
    async fn set_with_ttl(&mut self, key: &str, value: &str, ttl_secs: u64) -> ClawbrainResult<()>;

    /// Whether the key exists.
    async fn exists(&mut self, key: &str) -> ClawbrainResult<bool>;
}
