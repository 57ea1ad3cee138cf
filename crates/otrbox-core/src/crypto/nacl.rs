//! NaCl box implementation using crypto_box (XSalsa20Poly1305)

use crypto_box::{
    aead::{Aead, OsRng},
    SalsaBox,
};
use rand::RngCore;
use tracing::debug;

use super::EncryptionEngine;
use crate::types::{
    KeyPair, Nonce, PublicKey, SealedMessage, SecretKey, KEY_LEN, MESSAGE_MAX_BYTES, NONCE_LEN,
};
use crate::{OtrboxError, Result};

/// NaCl encryption engine
pub struct NaClEngine;

impl NaClEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NaClEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| OtrboxError::Randomness(e.to_string()))
}

impl EncryptionEngine for NaClEngine {
    fn generate_keypair(&self) -> Result<KeyPair> {
        let mut secret_bytes = [0u8; KEY_LEN];
        fill_random(&mut secret_bytes)?;

        let secret_key = crypto_box::SecretKey::from(secret_bytes);
        let public_key = secret_key.public_key();

        Ok(KeyPair::new(*public_key.as_bytes(), secret_key.to_bytes()))
    }

    fn generate_nonce(&self) -> Result<Nonce> {
        let mut nonce = [0u8; NONCE_LEN];
        fill_random(&mut nonce)?;
        Ok(nonce)
    }

    fn encrypt(
        &self,
        plaintext: &[u8],
        recipient_pk: &PublicKey,
        sender_sk: &SecretKey,
    ) -> Result<SealedMessage> {
        if plaintext.len() >= MESSAGE_MAX_BYTES {
            return Err(OtrboxError::MessageTooLarge {
                max: MESSAGE_MAX_BYTES - 1,
                actual: plaintext.len(),
            });
        }

        let recipient_pk = crypto_box::PublicKey::from(*recipient_pk);
        let sender_sk = crypto_box::SecretKey::from(*sender_sk);

        let sealing_box = SalsaBox::new(&recipient_pk, &sender_sk);
        let nonce_bytes = self.generate_nonce()?;
        let nonce = xsalsa20poly1305::Nonce::from_slice(&nonce_bytes);

        let ciphertext = sealing_box
            .encrypt(nonce, plaintext)
            .map_err(|_| OtrboxError::Encryption("Encryption failed".to_string()))?;

        debug!(
            plaintext_len = plaintext.len(),
            sealed_len = NONCE_LEN + ciphertext.len(),
            "sealed message"
        );

        Ok(SealedMessage::new(nonce_bytes, ciphertext))
    }

    fn decrypt(
        &self,
        sealed: &SealedMessage,
        sender_pk: &PublicKey,
        recipient_sk: &SecretKey,
    ) -> Result<Vec<u8>> {
        let sender_pk = crypto_box::PublicKey::from(*sender_pk);
        let recipient_sk = crypto_box::SecretKey::from(*recipient_sk);

        let opening_box = SalsaBox::new(&sender_pk, &recipient_sk);
        let nonce = xsalsa20poly1305::Nonce::from_slice(sealed.nonce());

        let plaintext = opening_box
            .decrypt(nonce, sealed.ciphertext())
            .map_err(|_| OtrboxError::Decryption)?;

        debug!(plaintext_len = plaintext.len(), "opened message");

        Ok(plaintext)
    }
}
