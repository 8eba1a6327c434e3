//! Legacy OpenSSL key stretching for `Proc-Type: 4,ENCRYPTED` PEM keys.
//!
//! This is the single-salt MD5 chain of `EVP_BytesToKey` with one round. It
//! is weak and is kept bit-exact so existing key files keep decrypting.

use md5::{Digest, Md5};
use zeroize::Zeroize;

use crate::cipher::CipherSpec;
use crate::error::{CryptoError, Result};
use crate::secret::Secret;

/// Number of salt bytes the legacy format feeds into the digest
pub const SALT_LEN: usize = 8;

/// Fill `out` with the MD5 chain `D_1 = MD5(password || salt)`,
/// `D_i = MD5(D_{i-1} || password || salt)`, truncating the last block.
pub fn md5_hash_chain(salt: &[u8], password: &[u8], out: &mut [u8]) {
    let mut hasher = Md5::new();
    let mut digest = md5::digest::Output::<Md5>::default();
    let mut filled = 0;

    while filled < out.len() {
        if filled > 0 {
            hasher.update(digest.as_slice());
        }
        hasher.update(password);
        hasher.update(salt);
        hasher.finalize_into_reset(&mut digest);

        let take = digest.len().min(out.len() - filled);
        out[filled..filled + take].copy_from_slice(&digest[..take]);
        filled += take;
    }

    digest.as_mut_slice().zeroize();
}

/// Derive the cipher key for a legacy encrypted PEM key.
///
/// `salt` is the binary IV from `DEK-Info`; only its first 8 bytes are used.
/// An empty password derives nothing and yields `Ok(None)`.
pub fn derive_key(cipher: CipherSpec, salt: &[u8], password: &str) -> Result<Option<Secret>> {
    if salt.len() < SALT_LEN {
        return Err(CryptoError::invalid_data(format!(
            "IV must contain at least {SALT_LEN} bytes"
        )));
    }
    if password.is_empty() {
        return Ok(None);
    }

    let mut key = Secret::new(vec![0u8; cipher.key_len()]);
    md5_hash_chain(&salt[..SALT_LEN], password.as_bytes(), key.as_mut_vec());
    Ok(Some(key))
}
