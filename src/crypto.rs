//! Cryptographic logics.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Salted SHA-256 hasher.
///
/// Digests are computed over `salt || data`, so two [`Hasher`]s with
/// different salts never agree on the same input.
#[derive(Clone)]
pub struct Hasher(Zeroizing<Vec<u8>>);

impl Hasher {
    /// Create a new [`Hasher`] with a fixed salt.
    pub fn new(salt: impl AsRef<[u8]>) -> Self {
        Self(Zeroizing::new(salt.as_ref().to_vec()))
    }

    /// Digest data into SHA256.
    pub fn digest(&self, data: impl AsRef<[u8]>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.0);
        hasher.update(&data);
        let hash = hasher.finalize();

        hex::encode(hash)
    }
}

impl std::fmt::Debug for Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hasher").field("salt", &"[REDACTED]").finish()
    }
}
