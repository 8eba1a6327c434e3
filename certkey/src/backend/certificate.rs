use std::fmt;
use std::sync::OnceLock;

use openssl::pkcs12::Pkcs12;
use openssl::provider::Provider;
use pkcs8::{EncryptedPrivateKeyInfo, PrivateKeyInfo};
use x509_parser::prelude::*;

use super::CertificateBackend;
use crate::error::{CryptoError, Result};
use crate::types::FileFormat;

/// Certificate and container checks backed by `x509-parser`, `pkcs8` and
/// OpenSSL's PKCS#12 implementation
#[derive(Default)]
pub struct DefaultCertificateBackend {
    // Unloaded when the backend is dropped
    providers: OnceLock<Vec<Provider>>,
}

impl fmt::Debug for DefaultCertificateBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultCertificateBackend")
            .field("providers", &self.providers.get().map_or(0, Vec::len))
            .finish()
    }
}

impl DefaultCertificateBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Containers written by OpenSSL 1.x use RC2-40 and 3DES, which OpenSSL 3
/// only offers through the `legacy` provider. Loading `legacy` explicitly
/// turns off the implicit `default` provider, so both are loaded.
fn load_providers() -> Vec<Provider> {
    ["default", "legacy"]
        .into_iter()
        .filter_map(|name| Provider::try_load(None, name, true).ok())
        .collect()
}

/// OpenSSL reports a wrong PKCS#12 password as a MAC check failure
fn is_mac_failure(err: &openssl::error::ErrorStack) -> bool {
    err.errors()
        .iter()
        .any(|e| e.reason().is_some_and(|reason| reason.contains("mac verify")))
}

/// The MAC is checked before any bag is decrypted, so an unsupported bag
/// algorithm means the password was already accepted.
fn is_unsupported_algorithm(err: &openssl::error::ErrorStack) -> bool {
    err.errors()
        .iter()
        .any(|e| e.reason().is_some_and(|reason| reason.contains("unsupported")))
}

impl CertificateBackend for DefaultCertificateBackend {
    fn init(&self) -> Result<()> {
        openssl::init();
        self.providers.get_or_init(load_providers);
        Ok(())
    }

    fn verify_der_certificate(&self, der: &[u8]) -> Result<FileFormat> {
        X509Certificate::from_der(der).map_err(|e| {
            CryptoError::CertificateError(format!("Couldn't decode certificate: {e}"))
        })?;
        Ok(FileFormat::X509)
    }

    fn verify_pkcs12(&self, data: &[u8], password: Option<&str>) -> Result<()> {
        if password.is_some_and(|p| p.contains('\0')) {
            return Err(CryptoError::InvalidPassword(
                "Password contains an embedded NUL byte.".to_string(),
            ));
        }

        let pkcs12 = Pkcs12::from_der(data)
            .map_err(|e| CryptoError::invalid_data(format!("Couldn't decode PKCS#12 file: {e}")))?;

        match pkcs12.parse2(password.unwrap_or("")) {
            Ok(_) => Ok(()),
            Err(e) if password.is_some() && is_mac_failure(&e) => Err(CryptoError::InvalidPassword(
                "Couldn't verify PKCS#12 file: wrong password.".to_string(),
            )),
            Err(e) if password.is_some() && is_unsupported_algorithm(&e) => Ok(()),
            Err(e) => Err(CryptoError::DecryptionFailed(format!(
                "Couldn't decrypt PKCS#12 file: {e}"
            ))),
        }
    }

    fn verify_pkcs8(&self, der: &[u8], encrypted: bool, password: Option<&str>) -> Result<()> {
        if !encrypted {
            PrivateKeyInfo::try_from(der).map_err(|e| {
                CryptoError::invalid_data(format!("Couldn't decode PKCS#8 file: {e}"))
            })?;
            return Ok(());
        }

        let info = EncryptedPrivateKeyInfo::try_from(der).map_err(|e| {
            CryptoError::invalid_data(format!("Couldn't decode encrypted PKCS#8 file: {e}"))
        })?;

        let Some(password) = password else {
            return Ok(());
        };

        let document = info.decrypt(password).map_err(|e| match e {
            // garbage plaintext fails either the unpad or the DER check
            pkcs8::Error::EncryptedPrivateKey(pkcs8::pkcs5::Error::DecryptFailed) | pkcs8::Error::Asn1(_) => {
                CryptoError::InvalidPassword("Couldn't decrypt PKCS#8 file: wrong password.".to_string())
            }
            other => CryptoError::invalid_data(format!(
                "Couldn't decrypt PKCS#8 file: unsupported encryption scheme ({other})"
            )),
        })?;

        // A wrong password can still produce valid padding by chance
        PrivateKeyInfo::try_from(document.as_bytes()).map_err(|_| {
            CryptoError::InvalidPassword("Couldn't decrypt PKCS#8 file: wrong password.".to_string())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn random_der_is_not_a_certificate() {
        let mut data = vec![0x30, 0x82, 0x01, 0x00];
        data.extend(std::iter::repeat(0x5a).take(256));
        let err = DefaultCertificateBackend::new().verify_der_certificate(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Certificate);
    }

    #[test]
    fn garbage_is_not_pkcs12() {
        let backend = DefaultCertificateBackend::new();
        backend.init().unwrap();
        let err = backend.verify_pkcs12(b"definitely not der", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn init_is_idempotent() {
        let backend = DefaultCertificateBackend::new();
        backend.init().unwrap();
        backend.init().unwrap();
        assert!(format!("{backend:?}").starts_with("DefaultCertificateBackend"));
    }

    #[test]
    fn nul_in_pkcs12_password_is_rejected() {
        let err = DefaultCertificateBackend::new()
            .verify_pkcs12(b"", Some("pass\0word"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPassword);
    }

    #[test]
    fn garbage_is_not_pkcs8() {
        let err = DefaultCertificateBackend::new()
            .verify_pkcs8(&[0x30, 0x03, 0x02, 0x01, 0x00], false, None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = DefaultCertificateBackend::new()
            .verify_pkcs8(&[0x04, 0x00], true, Some("pw"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
