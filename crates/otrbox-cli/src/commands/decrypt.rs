//! Decrypt command

use anyhow::Result;
use otrbox_core::{EncryptionEngine, KeyPair, PublicKey};
use std::io::Write;
use tracing::debug;

/// Open a hex ciphertext from the peer and print the plaintext
pub fn run<E, W>(
    engine: &E,
    keys: &KeyPair,
    ciphertext: &str,
    their_public_key: &PublicKey,
    out: &mut W,
) -> Result<()>
where
    E: EncryptionEngine + ?Sized,
    W: Write,
{
    let plaintext = engine.decrypt_hex(ciphertext.trim(), their_public_key, &keys.secret_key)?;
    debug!(bytes = plaintext.len(), "Decrypted message");

    writeln!(out, "Your Public Key:\t{}", keys.public_hex())?;
    writeln!(
        out,
        "Your PlainTxt Message:\t{}",
        String::from_utf8_lossy(&plaintext)
    )?;
    Ok(())
}
