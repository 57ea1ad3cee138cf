//! Encrypt command

use anyhow::Result;
use otrbox_core::{EncryptionEngine, KeyPair, PublicKey};
use std::io::Write;
use tracing::debug;

/// Seal `message` for the peer and print it as hex
pub fn run<E, W>(
    engine: &E,
    keys: &KeyPair,
    message: &str,
    their_public_key: &PublicKey,
    out: &mut W,
) -> Result<()>
where
    E: EncryptionEngine + ?Sized,
    W: Write,
{
    let sealed = engine.encrypt(message.as_bytes(), their_public_key, &keys.secret_key)?;
    debug!(bytes = message.len(), "Encrypted message");

    writeln!(out, "Your Public Key:\t{}", keys.public_hex())?;
    writeln!(out, "Your Encrypted Message:\t{}", sealed)?;
    Ok(())
}
