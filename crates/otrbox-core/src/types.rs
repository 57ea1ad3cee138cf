//! Key and message types

use std::fmt;
use std::str::FromStr;

use crate::{OtrboxError, Result};

/// X25519 key length in bytes
pub const KEY_LEN: usize = 32;
/// X25519 key length as hex string
pub const KEY_HEX_LEN: usize = KEY_LEN * 2;
/// XSalsa20 nonce length in bytes
pub const NONCE_LEN: usize = 24;
/// Poly1305 authentication tag length in bytes
pub const TAG_LEN: usize = 16;
/// Messages must be strictly shorter than this many bytes
pub const MESSAGE_MAX_BYTES: usize = 8192 - 1;
/// Largest sealed message a valid plaintext can produce
pub const SEALED_MAX_BYTES: usize = NONCE_LEN + TAG_LEN + MESSAGE_MAX_BYTES - 1;

/// X25519 public key (32 bytes)
pub type PublicKey = [u8; KEY_LEN];

/// X25519 secret key (32 bytes)
pub type SecretKey = [u8; KEY_LEN];

/// XSalsa20 nonce (24 bytes)
pub type Nonce = [u8; NONCE_LEN];

/// Key pair for box encryption
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

impl KeyPair {
    pub fn new(public_key: PublicKey, secret_key: SecretKey) -> Self {
        Self {
            public_key,
            secret_key,
        }
    }

    pub fn public_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.secret_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_hex())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Nonce followed by the NaCl box (tag + ciphertext).
///
/// Byte layout is `[nonce:24][tag:16][ciphertext]`, the same as
/// `nonce || box.Seal(...)` in other NaCl implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    nonce: Nonce,
    ciphertext: Vec<u8>,
}

impl SealedMessage {
    pub fn new(nonce: Nonce, ciphertext: Vec<u8>) -> Self {
        Self { nonce, ciphertext }
    }

    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// The authenticated box, tag included
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Length of the plaintext this message decrypts to
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len().saturating_sub(TAG_LEN)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        output.extend_from_slice(&self.nonce);
        output.extend_from_slice(&self.ciphertext);
        output
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(OtrboxError::InvalidCiphertext(format!(
                "ciphertext too short: {} bytes (minimum {})",
                bytes.len(),
                NONCE_LEN + TAG_LEN
            )));
        }
        if bytes.len() > SEALED_MAX_BYTES {
            return Err(OtrboxError::InvalidCiphertext(format!(
                "ciphertext too long: {} bytes (maximum {})",
                bytes.len(),
                SEALED_MAX_BYTES
            )));
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let nonce: Nonce = nonce_bytes
            .try_into()
            .map_err(|_| OtrboxError::InvalidCiphertext("invalid nonce".into()))?;

        Ok(Self::new(nonce, ciphertext.to_vec()))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for SealedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SealedMessage {
    type Err = OtrboxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
