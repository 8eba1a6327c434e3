//! The closed set of ciphers accepted in a legacy `DEK-Info` header.

use std::fmt;
use std::str::FromStr;

use crate::error::CryptoError;

/// Block cipher named by a `DEK-Info` header, with the key length the
/// legacy key derivation has to produce for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherSpec {
    DesEde3Cbc,
    DesCbc,
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
}

impl CipherSpec {
    pub const ALL: [CipherSpec; 5] = [
        CipherSpec::DesEde3Cbc,
        CipherSpec::DesCbc,
        CipherSpec::Aes128Cbc,
        CipherSpec::Aes192Cbc,
        CipherSpec::Aes256Cbc,
    ];

    /// Header spelling, e.g. `DES-EDE3-CBC`
    pub fn name(&self) -> &'static str {
        match self {
            CipherSpec::DesEde3Cbc => "DES-EDE3-CBC",
            CipherSpec::DesCbc => "DES-CBC",
            CipherSpec::Aes128Cbc => "AES-128-CBC",
            CipherSpec::Aes192Cbc => "AES-192-CBC",
            CipherSpec::Aes256Cbc => "AES-256-CBC",
        }
    }

    /// Length in bytes of the derived key
    pub fn key_len(&self) -> usize {
        match self {
            CipherSpec::DesEde3Cbc => 24,
            CipherSpec::DesCbc => 8,
            CipherSpec::Aes128Cbc => 16,
            CipherSpec::Aes192Cbc => 24,
            CipherSpec::Aes256Cbc => 32,
        }
    }

    /// Cipher block size, which is also the IV length the cipher consumes
    pub fn block_size(&self) -> usize {
        match self {
            CipherSpec::DesEde3Cbc | CipherSpec::DesCbc => 8,
            CipherSpec::Aes128Cbc | CipherSpec::Aes192Cbc | CipherSpec::Aes256Cbc => 16,
        }
    }

    /// ASCII case-insensitive lookup of a header cipher name
    pub fn from_name(name: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|spec| spec.name().as_bytes().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherSpec {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.as_bytes())
            .ok_or_else(|| CryptoError::UnknownCipher(format!("Private key cipher '{s}' was unknown.")))
    }
}
