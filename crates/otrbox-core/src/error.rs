//! Error types for otrbox

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OtrboxError>;

#[derive(Error, Debug)]
pub enum OtrboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Key file {} is truncated: expected {expected} hex characters, got {actual}", path.display())]
    TruncatedKeyFile {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("Random source unavailable: {0}")]
    Randomness(String),

    #[error("We only allow messages {max} bytes in size or less, got {actual}")]
    MessageTooLarge { max: usize, actual: usize },

    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Failed to decrypt the message")]
    Decryption,
}
