//! otrbox Core Library
//!
//! Key types, hex key codec, on-disk key store and NaCl box encryption
//! for the otrbox command-line tool.

pub mod codec;
pub mod crypto;
pub mod error;
pub mod keystore;
pub mod types;

pub use codec::{decode_key, encode_key};
pub use crypto::{EncryptionEngine, NaClEngine};
pub use error::{OtrboxError, Result};
pub use keystore::{Bootstrap, KeyStore, PRIVATE_KEY_FILE, PUBLIC_KEY_FILE};
pub use types::*;
