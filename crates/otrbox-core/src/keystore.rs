//! On-disk key store
//!
//! Each key lives in its own file as one line of hex. Files are read back by
//! taking only the first 64 bytes, so trailing LF/CRLF (or anything else after
//! the key) is ignored.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::codec::{decode_key, encode_key};
use crate::crypto::EncryptionEngine;
use crate::types::{KeyPair, PublicKey, KEY_HEX_LEN, KEY_LEN};
use crate::{OtrboxError, Result};

/// File holding this party's public key
pub const PUBLIC_KEY_FILE: &str = "otrbox.pub";
/// File holding this party's private key
pub const PRIVATE_KEY_FILE: &str = "otrbox.prv";

/// Outcome of [`KeyStore::bootstrap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// Both key files were present and valid, nothing was written
    Existing,
    /// A new pair was generated and written; carries the new public key
    Generated(PublicKey),
}

/// Key files rooted at one directory
#[derive(Debug, Clone)]
pub struct KeyStore {
    dir: PathBuf,
}

impl KeyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a key file inside the store
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn public_key_path(&self) -> PathBuf {
        self.path(PUBLIC_KEY_FILE)
    }

    pub fn private_key_path(&self) -> PathBuf {
        self.path(PRIVATE_KEY_FILE)
    }

    /// Whether `name` holds a readable, well-formed 32-byte key.
    ///
    /// Errors are logged and reported as `false`. A missing file is the
    /// normal first-run case and only logged at debug.
    pub fn exists(&self, name: &str) -> bool {
        match self.load(name) {
            Ok(_) => true,
            Err(OtrboxError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{}: not found", self.path(name).display());
                false
            }
            Err(e) => {
                warn!("{}: {}", self.path(name).display(), e);
                false
            }
        }
    }

    /// Draw a fresh key pair
    pub fn generate<E: EncryptionEngine + ?Sized>(engine: &E) -> Result<KeyPair> {
        engine.generate_keypair()
    }

    /// Write `hex` plus a trailing newline to `name`, replacing any existing file
    pub fn save(&self, name: &str, hex: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path(name);
        std::fs::write(&path, format!("{}\n", hex))?;
        debug!("Wrote key file {}", path.display());

        Ok(())
    }

    /// Read the key stored in `name`
    pub fn load(&self, name: &str) -> Result<[u8; KEY_LEN]> {
        let path = self.path(name);
        let content = std::fs::read(&path)?;

        if content.len() < KEY_HEX_LEN {
            return Err(OtrboxError::TruncatedKeyFile {
                path,
                expected: KEY_HEX_LEN,
                actual: content.len(),
            });
        }

        decode_key(&content[..KEY_HEX_LEN])
    }

    pub fn load_public_key(&self) -> Result<PublicKey> {
        self.load(PUBLIC_KEY_FILE)
    }

    /// Load this party's key pair from both files
    pub fn load_pair(&self) -> Result<KeyPair> {
        let public_key = self.load(PUBLIC_KEY_FILE)?;
        let secret_key = self.load(PRIVATE_KEY_FILE)?;
        Ok(KeyPair::new(public_key, secret_key))
    }

    /// Generate and persist a new key pair, overwriting both files
    pub fn generate_and_save<E: EncryptionEngine + ?Sized>(&self, engine: &E) -> Result<KeyPair> {
        let keys = Self::generate(engine)?;

        self.save(PUBLIC_KEY_FILE, &encode_key(&keys.public_key))?;
        self.save(PRIVATE_KEY_FILE, &encode_key(&keys.secret_key))?;
        restrict_permissions(&self.private_key_path())?;

        Ok(keys)
    }

    /// Make sure both key files exist, generating a new pair if either is
    /// missing or invalid. Valid files are never overwritten.
    pub fn bootstrap<E: EncryptionEngine + ?Sized>(&self, engine: &E) -> Result<Bootstrap> {
        if self.exists(PUBLIC_KEY_FILE) && self.exists(PRIVATE_KEY_FILE) {
            debug!("Using existing keys in {}", self.dir.display());
            return Ok(Bootstrap::Existing);
        }

        info!("Generating public and private keys...");
        let keys = self.generate_and_save(engine)?;
        info!(
            "Wrote {} and {}",
            self.public_key_path().display(),
            self.private_key_path().display()
        );

        Ok(Bootstrap::Generated(keys.public_key))
    }
}

/// Restrict a secret file to its owner (0600) on Unix
fn restrict_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
