//! Human-readable facts about an X.509 certificate.

use sha2::{Digest, Sha256};
use x509_parser::prelude::*;

use crate::error::{CryptoError, Result};

/// Subject, issuer and fingerprint of a parsed certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    subject: String,
    issuer: String,
    serial: String,
    not_before: String,
    not_after: String,
    fingerprint: String,
}

impl CertificateSummary {
    /// Parse DER-encoded certificate bytes
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (_, cert) = X509Certificate::from_der(der).map_err(|e| {
            CryptoError::CertificateError(format!("Failed to parse certificate: {e}"))
        })?;

        let validity = cert.validity();
        Ok(Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial: cert.raw_serial_as_string(),
            not_before: validity.not_before.to_string(),
            not_after: validity.not_after.to_string(),
            fingerprint: sha256_fingerprint(der),
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Serial number as colon-separated hex
    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn not_before(&self) -> &str {
        &self.not_before
    }

    pub fn not_after(&self) -> &str {
        &self.not_after
    }

    /// SHA-256 over the DER encoding, as colon-separated upper-case hex
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn is_self_signed(&self) -> bool {
        self.subject == self.issuer
    }
}

fn sha256_fingerprint(der: &[u8]) -> String {
    Sha256::digest(der)
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}
