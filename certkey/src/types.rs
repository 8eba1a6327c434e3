//! Classification results shared by the parsers and the manager facade.

use std::fmt;

/// Algorithm of a legacy (`BEGIN RSA/DSA PRIVATE KEY`) key file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyType {
    #[default]
    Unknown,
    Rsa,
    Dsa,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Unknown => "unknown",
            KeyType::Rsa => "RSA",
            KeyType::Dsa => "DSA",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level classification of a certificate or key file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Unknown,
    X509,
    Pkcs12,
    RawKey,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Unknown => "unknown",
            FileFormat::X509 => "x509",
            FileFormat::Pkcs12 => "pkcs12",
            FileFormat::RawKey => "raw-key",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of private key classification and (optional) password check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateKeyInfo {
    pub format: FileFormat,
    pub encrypted: bool,
}

/// A certificate file that passed verification
#[derive(Debug, Clone)]
pub struct LoadedCertificate {
    format: FileFormat,
    data: Vec<u8>,
    der: Option<Vec<u8>>,
}

impl LoadedCertificate {
    pub(crate) fn pkcs12(data: &[u8]) -> Self {
        Self {
            format: FileFormat::Pkcs12,
            data: data.to_vec(),
            der: None,
        }
    }

    pub(crate) fn x509(data: &[u8], der: &[u8]) -> Self {
        Self {
            format: FileFormat::X509,
            data: data.to_vec(),
            der: Some(der.to_vec()),
        }
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// The input exactly as it was given (PEM text, DER or PKCS#12)
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// DER encoding of an X.509 certificate; `None` for PKCS#12
    pub fn der(&self) -> Option<&[u8]> {
        self.der.as_deref()
    }
}
