//! Command implementations
//!
//! Flags are first resolved into a single [`Request`]; every rule about which
//! flags may be combined lives in [`RequestOptions::resolve`].

pub mod decrypt;
pub mod encrypt;
pub mod keys;

use anyhow::{bail, Context, Result};
use otrbox_core::{decode_key, EncryptionEngine, KeyPair, PublicKey};
use std::io::Write;

/// Flag values as given on the command line
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    pub encrypt: Option<String>,
    pub decrypt: Option<String>,
    pub my_public_key: bool,
    pub my_private_key: bool,
    pub their_public_key: Option<String>,
}

/// The one operation a run performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ShowPublicKey,
    ShowPrivateKey,
    Encrypt {
        message: String,
        their_public_key: PublicKey,
    },
    Decrypt {
        ciphertext: String,
        their_public_key: PublicKey,
    },
}

impl RequestOptions {
    pub fn resolve(self) -> Result<Request> {
        if self.my_public_key {
            return Ok(Request::ShowPublicKey);
        }
        if self.my_private_key {
            return Ok(Request::ShowPrivateKey);
        }

        // Empty values count as not given
        let message = self.encrypt.filter(|s| !s.is_empty());
        let ciphertext = self.decrypt.filter(|s| !s.is_empty());

        match (message, ciphertext) {
            (Some(_), Some(_)) => {
                bail!("You must either input a message or a ciphertext, not both")
            }
            (None, None) => {
                bail!("You must either input a message or a ciphertext, both are blank")
            }
            (Some(message), None) => Ok(Request::Encrypt {
                message,
                their_public_key: peer_key(self.their_public_key)?,
            }),
            (None, Some(ciphertext)) => Ok(Request::Decrypt {
                ciphertext,
                their_public_key: peer_key(self.their_public_key)?,
            }),
        }
    }
}

fn peer_key(value: Option<String>) -> Result<PublicKey> {
    let Some(hex) = value.filter(|s| !s.is_empty()) else {
        bail!("A peer public key is required, pass it with --theirPublicKey");
    };
    decode_key(hex.trim()).context("Invalid --theirPublicKey")
}

/// Run a resolved request, writing its output to `out`
pub fn execute<E, W>(engine: &E, keys: &KeyPair, request: Request, out: &mut W) -> Result<()>
where
    E: EncryptionEngine + ?Sized,
    W: Write,
{
    match request {
        Request::ShowPublicKey => keys::show_public(keys, out),
        Request::ShowPrivateKey => keys::show_private(keys, out),
        Request::Encrypt {
            message,
            their_public_key,
        } => encrypt::run(engine, keys, &message, &their_public_key, out),
        Request::Decrypt {
            ciphertext,
            their_public_key,
        } => decrypt::run(engine, keys, &ciphertext, &their_public_key, out),
    }
}
