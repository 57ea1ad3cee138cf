//! Encryption module using NaCl box
//!
//! Provides X25519 key agreement and XSalsa20-Poly1305 authenticated encryption

mod nacl;

pub use nacl::NaClEngine;

use crate::types::{KeyPair, Nonce, PublicKey, SealedMessage, SecretKey};
use crate::Result;

/// Public-key authenticated encryption between two long-lived key pairs
pub trait EncryptionEngine {
    /// Generate a new X25519 key pair
    fn generate_keypair(&self) -> Result<KeyPair>;

    /// Generate a random nonce
    fn generate_nonce(&self) -> Result<Nonce>;

    /// Encrypt a message for `recipient_pk`, authenticated by `sender_sk`
    fn encrypt(
        &self,
        plaintext: &[u8],
        recipient_pk: &PublicKey,
        sender_sk: &SecretKey,
    ) -> Result<SealedMessage>;

    /// Verify and decrypt a message sent by `sender_pk` to `recipient_sk`
    fn decrypt(
        &self,
        sealed: &SealedMessage,
        sender_pk: &PublicKey,
        recipient_sk: &SecretKey,
    ) -> Result<Vec<u8>>;

    /// Decrypt the hex form of a sealed message
    fn decrypt_hex(
        &self,
        sealed_hex: &str,
        sender_pk: &PublicKey,
        recipient_sk: &SecretKey,
    ) -> Result<Vec<u8>> {
        let sealed = SealedMessage::from_hex(sealed_hex)?;
        self.decrypt(&sealed, sender_pk, recipient_sk)
    }
}
