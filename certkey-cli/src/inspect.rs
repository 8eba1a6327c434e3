//! Read-only commands: classify keys, certificates and PKCS#12 containers

use anyhow::{Context, Result};
use certkey::{CertKeyManager, FileFormat};
use certkey_common::Logger;
use std::path::Path;
use std::sync::Arc;

pub struct InspectCommand {
    manager: Arc<CertKeyManager>,
    logger: Arc<Logger>,
}

impl InspectCommand {
    pub fn new(manager: Arc<CertKeyManager>, logger: Arc<Logger>) -> Self {
        Self { manager, logger }
    }

    /// Classify a private key file, checking the password when one is given
    pub fn key(&self, path: &Path, password: Option<&str>) -> Result<String> {
        self.logger.debug(format!("Inspecting private key {path:?}"));

        let info = self
            .manager
            .verify_private_key_file(path, password)
            .with_context(|| format!("Failed to verify private key {path:?}"))?;

        let state = match (info.encrypted, password.is_some_and(|p| !p.is_empty())) {
            (false, _) => "unencrypted",
            (true, true) => "encrypted, password ok",
            (true, false) => "encrypted",
        };
        Ok(format!("{} ({state})", info.format))
    }

    /// Classify and verify a certificate file
    pub fn cert(&self, path: &Path) -> Result<String> {
        self.logger.debug(format!("Inspecting certificate {path:?}"));

        let loaded = self
            .manager
            .load_and_verify_certificate_file(path)
            .with_context(|| format!("Failed to verify certificate {path:?}"))?;

        match (loaded.format(), loaded.der()) {
            (FileFormat::X509, Some(der)) => {
                let summary = self.manager.certificate_summary(der)?;
                Ok(format!(
                    "x509 subject=\"{}\" issuer=\"{}\" sha256={}",
                    summary.subject(),
                    summary.issuer(),
                    summary.fingerprint()
                ))
            }
            (format, _) => Ok(format.to_string()),
        }
    }

    /// Report whether a file is a PKCS#12 container
    pub fn pkcs12(&self, path: &Path) -> Result<String> {
        let is_pkcs12 = self
            .manager
            .is_pkcs12_file(path)
            .with_context(|| format!("Failed to read {path:?}"))?;

        Ok(if is_pkcs12 { "yes" } else { "no" }.to_string())
    }
}
