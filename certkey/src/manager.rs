//! Public entry points composing the parsers, the KDF and the backends.

use std::sync::Arc;

use certkey_common::{Component, Logger};
use rand::RngCore;

use crate::backend::{CertificateBackend, CipherBackend, DefaultCertificateBackend, RustCryptoCipher};
use crate::certificate::CertificateSummary;
use crate::cipher::CipherSpec;
use crate::decrypt::{decrypt_key, is_der_sequence};
use crate::error::{CryptoError, Result};
use crate::legacy::{self, DecryptedKey, ParsedLegacyKey};
use crate::pem;
use crate::scan::find_tag;
use crate::secret::Secret;
use crate::types::{FileFormat, KeyType, LoadedCertificate, PrivateKeyInfo};
use crate::{kdf, log_debug, log_warn};

/// Cipher used by [`CertKeyManager::encrypt_legacy_openssl_key`] when the
/// caller has no preference
pub const DEFAULT_ENCRYPTION_CIPHER: CipherSpec = CipherSpec::DesEde3Cbc;

const DER_CERTIFICATE_MAGIC: [u8; 2] = [0x30, 0x82];

/// Handle over initialised crypto backends.
///
/// Construction runs the backends' one-time setup; every operation goes
/// through the handle, so there is no hidden global state. The manager holds
/// no per-call data and can be shared between threads.
pub struct CertKeyManager {
    cipher_backend: Arc<dyn CipherBackend>,
    cert_backend: Arc<dyn CertificateBackend>,
    logger: Arc<Logger>,
    keys_logger: Logger,
    certs_logger: Logger,
    pkcs12_logger: Logger,
}

/// Empty passwords mean "no password"; NUL bytes cannot be passed on to the
/// PKCS#12 backend and are refused everywhere.
pub(crate) fn normalize_password(password: Option<&str>) -> Result<Option<&str>> {
    match password {
        Some(p) if p.contains('\0') => Err(CryptoError::InvalidPassword(
            "Password contains an embedded NUL byte.".to_string(),
        )),
        Some("") => Ok(None),
        other => Ok(other),
    }
}

impl CertKeyManager {
    /// Create a manager with the default RustCrypto/OpenSSL backends
    pub fn new(logger: Arc<Logger>) -> Result<Self> {
        Self::with_backends(
            Arc::new(RustCryptoCipher::new()),
            Arc::new(DefaultCertificateBackend::new()),
            logger,
        )
    }

    /// Create a manager over caller-supplied backends
    pub fn with_backends(
        cipher_backend: Arc<dyn CipherBackend>,
        cert_backend: Arc<dyn CertificateBackend>,
        logger: Arc<Logger>,
    ) -> Result<Self> {
        cipher_backend
            .init()
            .and_then(|()| cert_backend.init())
            .map_err(|e| {
                logger.error(format!("Crypto backend initialization failed: {e}"));
                CryptoError::BackendError(format!("Failed to initialize the crypto engine: {e}"))
            })?;

        logger.debug("Crypto backends initialized");

        Ok(Self {
            keys_logger: logger.with_component(Component::Keys),
            certs_logger: logger.with_component(Component::Certificates),
            pkcs12_logger: logger.with_component(Component::Pkcs12),
            cipher_backend,
            cert_backend,
            logger,
        })
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Decode and, when needed, decrypt a traditional RSA/DSA PEM key.
    ///
    /// With a password the key must be encrypted. Without one, an encrypted
    /// key is recognised but yields `Ok(None)`.
    pub fn decrypt_legacy_openssl_key(
        &self,
        data: &[u8],
        password: Option<&str>,
    ) -> Result<Option<DecryptedKey>> {
        let password = normalize_password(password)?;
        let parsed = legacy::parse_legacy_key(data)?;

        log_debug!(
            self.keys_logger,
            "Parsed {} key ({} bytes, cipher {})",
            parsed.key_type(),
            parsed.data().len(),
            parsed.cipher().map_or("none", |c| c.name())
        );

        match (parsed.is_encrypted(), password) {
            (true, Some(password)) => self.decrypt_parsed(parsed, password).map(Some),
            (true, None) => {
                log_debug!(self.keys_logger, "Key is encrypted and no password was given");
                Ok(None)
            }
            (false, Some(_)) => Err(CryptoError::InvalidPassword(
                "Password provided, but key was not encrypted.".to_string(),
            )),
            (false, None) => {
                let (key_type, dek, der) = parsed.into_parts();
                Ok(Some(DecryptedKey::new(key_type, dek, der)))
            }
        }
    }

    fn decrypt_parsed(&self, parsed: ParsedLegacyKey, password: &str) -> Result<DecryptedKey> {
        let (key_type, dek, ciphertext) = parsed.into_parts();
        let dek = dek.ok_or_else(|| CryptoError::invalid_data("Private key is not encrypted."))?;

        let plaintext = decrypt_key(
            self.cipher_backend.as_ref(),
            dek.cipher,
            key_type,
            ciphertext.expose(),
            dek.iv_hex(),
            password,
        )
        .map_err(|e| match e {
            CryptoError::DecryptionFailed(reason) => {
                log_debug!(self.keys_logger, "Legacy key decryption failed: {reason}");
                CryptoError::InvalidPassword(format!(
                    "Failed to decrypt the private key: {reason}"
                ))
            }
            other => other,
        })?;

        if !is_der_sequence(plaintext.expose()) {
            log_debug!(
                self.keys_logger,
                "Decrypted {} bytes are not a DER SEQUENCE",
                plaintext.len()
            );
            return Err(CryptoError::InvalidPassword(
                "Failed to decrypt the private key: wrong password.".to_string(),
            ));
        }

        Ok(DecryptedKey::new(key_type, Some(dek), plaintext))
    }

    /// Work out what kind of private key `data` holds.
    ///
    /// PKCS#12 is tried first, then PKCS#8, then the traditional RSA/DSA
    /// format. With a password the key is also decrypted to prove the
    /// password right; a wrong one fails with `InvalidPassword`. A password
    /// given for an unencrypted traditional key is ignored.
    pub fn classify_and_verify_private_key(
        &self,
        data: &[u8],
        password: Option<&str>,
    ) -> Result<PrivateKeyInfo> {
        let password = normalize_password(password)?;

        if self.is_pkcs12(data) {
            log_debug!(self.pkcs12_logger, "Private key data is PKCS#12 ({} bytes)", data.len());
            if let Some(password) = password {
                self.cert_backend.verify_pkcs12(data, Some(password))?;
            }
            return Ok(PrivateKeyInfo {
                format: FileFormat::Pkcs12,
                encrypted: true,
            });
        }

        if let Some(key) = pem::try_parse_pkcs8(data) {
            log_debug!(
                self.keys_logger,
                "Private key data is PKCS#8 (encrypted: {})",
                key.encrypted
            );
            if let Some(password) = password {
                self.cert_backend
                    .verify_pkcs8(key.der.expose(), key.encrypted, Some(password))?;
            }
            return Ok(PrivateKeyInfo {
                format: FileFormat::RawKey,
                encrypted: key.encrypted,
            });
        }

        let has_envelope = [pem::RSA_KEY, pem::DSA_KEY]
            .iter()
            .any(|envelope| find_tag(envelope.begin, data, 0).is_some());
        if !has_envelope {
            return Err(CryptoError::invalid_data("Unable to determine private key type."));
        }

        let parsed = legacy::parse_legacy_key(data)?;
        let encrypted = parsed.is_encrypted();
        log_debug!(
            self.keys_logger,
            "Private key data is a traditional {} key (encrypted: {encrypted})",
            parsed.key_type()
        );
        if let (true, Some(password)) = (encrypted, password) {
            self.decrypt_parsed(parsed, password)?;
        }

        Ok(PrivateKeyInfo {
            format: FileFormat::RawKey,
            encrypted,
        })
    }

    /// Classify certificate data and verify its structure.
    ///
    /// PKCS#12 is sniffed first, then raw DER (`30 82` prefix), then a PEM
    /// `CERTIFICATE` envelope.
    pub fn load_and_verify_certificate(&self, data: &[u8]) -> Result<LoadedCertificate> {
        if self.is_pkcs12(data) {
            log_debug!(self.certs_logger, "Certificate data is PKCS#12");
            return Ok(LoadedCertificate::pkcs12(data));
        }

        if data.len() > 2 && data.starts_with(&DER_CERTIFICATE_MAGIC) {
            log_debug!(self.certs_logger, "Certificate data looks like DER ({} bytes)", data.len());
            self.verify_x509(data)?;
            return Ok(LoadedCertificate::x509(data, data));
        }

        let der = pem::extract_pem_certificate(data)?;
        log_debug!(self.certs_logger, "Decoded PEM certificate ({} bytes)", der.len());
        self.verify_x509(der.expose())?;
        Ok(LoadedCertificate::x509(data, der.expose()))
    }

    fn verify_x509(&self, der: &[u8]) -> Result<()> {
        match self.cert_backend.verify_der_certificate(der) {
            Ok(FileFormat::X509) => Ok(()),
            Ok(other) => Err(CryptoError::CertificateError(format!(
                "Expected an X.509 certificate, found {other}"
            ))),
            Err(e) => {
                log_debug!(self.certs_logger, "Certificate verification failed: {e}");
                Err(e)
            }
        }
    }

    /// True when `data` is a PKCS#12 container, whether or not it needs a
    /// password to open.
    pub fn is_pkcs12(&self, data: &[u8]) -> bool {
        if data.is_empty() {
            return false;
        }

        match self.cert_backend.verify_pkcs12(data, None) {
            Ok(()) => true,
            Err(CryptoError::DecryptionFailed(_)) => {
                log_debug!(self.pkcs12_logger, "PKCS#12 container needs a password");
                true
            }
            Err(e) => {
                log_debug!(self.pkcs12_logger, "Not PKCS#12: {e}");
                false
            }
        }
    }

    /// Encrypt DER key material into a traditional PEM key with
    /// `Proc-Type`/`DEK-Info` headers and a random IV.
    pub fn encrypt_legacy_openssl_key(
        &self,
        der: &[u8],
        key_type: KeyType,
        cipher: CipherSpec,
        password: &str,
    ) -> Result<String> {
        let password = normalize_password(Some(password))?.ok_or_else(|| {
            CryptoError::InvalidPassword("A password is required to encrypt the private key.".to_string())
        })?;
        let envelope = legacy::envelope_for(key_type)
            .ok_or_else(|| CryptoError::invalid_data("Unknown private key type."))?;
        if !is_der_sequence(der) {
            return Err(CryptoError::invalid_data("Private key data is not DER encoded."));
        }

        let mut iv = Secret::new(vec![0u8; cipher.block_size()]);
        rand::thread_rng().fill_bytes(iv.as_mut_vec());

        let key = kdf::derive_key(cipher, iv.expose(), password)?
            .ok_or_else(|| CryptoError::InvalidPassword("Empty password.".to_string()))?;
        let ciphertext = self
            .cipher_backend
            .encrypt(cipher, der, iv.expose(), key.expose())?;

        let dek_info = format!("{cipher},{}", hex::encode_upper(iv.expose()));
        log_debug!(
            self.keys_logger,
            "Encrypted {key_type} key with {cipher} ({} bytes)",
            ciphertext.len()
        );

        Ok(pem::encode_pem(
            envelope,
            &[("Proc-Type", "4,ENCRYPTED"), ("DEK-Info", dek_info.as_str())],
            &ciphertext,
        ))
    }

    /// Subject, issuer and fingerprint of DER certificate bytes
    pub fn certificate_summary(&self, der: &[u8]) -> Result<CertificateSummary> {
        CertificateSummary::from_der(der).map_err(|e| {
            log_warn!(self.certs_logger, "Could not summarize certificate: {e}");
            e
        })
    }
}
