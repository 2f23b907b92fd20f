/// Memory-engine errors.
///
/// Messages are part of the CLI contract: agents pattern-match the leading
/// token, so keep them stable.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("payload must contain a non-empty \"text\" field")]
    MissingText,

    #[error("vector must not be empty")]
    EmptyVector,
}
