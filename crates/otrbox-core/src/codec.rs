//! Hex encoding for 32-byte keys

use crate::types::KEY_LEN;
use crate::{OtrboxError, Result};

/// Decode a hex key into exactly 32 bytes.
///
/// Accepts anything hex-like (`&str`, `String`, raw file bytes). Non-hex
/// input and any decoded length other than 32 bytes are errors.
pub fn decode_key<T: AsRef<[u8]>>(input: T) -> Result<[u8; KEY_LEN]> {
    let bytes = hex::decode(input)?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| OtrboxError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: v.len(),
        })
}

/// Encode a key as lowercase hex
pub fn encode_key(key: &[u8; KEY_LEN]) -> String {
    hex::encode(key)
}
