//! Pluggable crypto backends.
//!
//! The parsing core never touches a cipher or an ASN.1 decoder directly; it
//! goes through these two traits. [`RustCryptoCipher`] and
//! [`DefaultCertificateBackend`] are the implementations used by
//! [`crate::CertKeyManager::new`].

mod certificate;
mod cipher;

pub use certificate::DefaultCertificateBackend;
pub use cipher::RustCryptoCipher;

use crate::cipher::CipherSpec;
use crate::error::Result;
use crate::secret::Secret;
use crate::types::{FileFormat, KeyType};

/// Block cipher operations for legacy encrypted PEM keys
pub trait CipherBackend: Send + Sync {
    /// One-time library setup; must be idempotent
    fn init(&self) -> Result<()> {
        Ok(())
    }

    /// CBC-decrypt and strip PKCS#7 padding.
    ///
    /// `iv` must be at least one cipher block long; only the first block is
    /// used. A ciphertext that is not block aligned or whose padding does not
    /// check out fails with `DecryptionFailed`.
    fn decrypt(
        &self,
        cipher: CipherSpec,
        key_type: KeyType,
        ciphertext: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Secret>;

    /// CBC-encrypt with PKCS#7 padding
    fn encrypt(&self, cipher: CipherSpec, plaintext: &[u8], iv: &[u8], key: &[u8]) -> Result<Vec<u8>>;
}

/// Structural verification of certificates and key containers
pub trait CertificateBackend: Send + Sync {
    /// One-time library setup; must be idempotent
    fn init(&self) -> Result<()> {
        Ok(())
    }

    /// Check that `der` is a well-formed X.509 certificate
    fn verify_der_certificate(&self, der: &[u8]) -> Result<FileFormat>;

    /// Parse a PKCS#12 container and, when a password is given, check it.
    ///
    /// Without a password a container that parses but cannot be opened
    /// fails with `DecryptionFailed`; a wrong password fails with
    /// `InvalidPassword`.
    fn verify_pkcs12(&self, data: &[u8], password: Option<&str>) -> Result<()>;

    /// Parse PKCS#8 DER and, for encrypted keys with a password, decrypt it
    fn verify_pkcs8(&self, der: &[u8], encrypted: bool, password: Option<&str>) -> Result<()>;
}
