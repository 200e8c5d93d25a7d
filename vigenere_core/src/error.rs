use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("vigenere key must contain at least one character")]
    EmptyKey,

    #[error("malformed frequency profile: {0}")]
    ProfileFormat(#[from] serde_json::Error),

    #[error("invalid profile key {key:?} (expected a single character)")]
    InvalidProfileKey { key: String },
}
