//! Print this party's own keys

use anyhow::Result;
use otrbox_core::{encode_key, KeyPair};
use std::io::Write;

pub fn show_public<W: Write>(keys: &KeyPair, out: &mut W) -> Result<()> {
    writeln!(out, "{}", encode_key(&keys.public_key))?;
    Ok(())
}

pub fn show_private<W: Write>(keys: &KeyPair, out: &mut W) -> Result<()> {
    writeln!(out, "{}", encode_key(&keys.secret_key))?;
    Ok(())
}
