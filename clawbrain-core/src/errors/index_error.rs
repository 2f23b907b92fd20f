/// Vector-index adapter errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index transport error: {reason}")]
    Transport { reason: String },

    #[error("index returned {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("unexpected index response: {reason}")]
    BadResponse { reason: String },

    #[error("collection create failed: {collection}: {reason}")]
    CollectionCreateFailed { collection: String, reason: String },
}
