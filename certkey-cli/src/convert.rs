//! Commands that rewrite traditional PEM keys: decrypt to DER, encrypt to PEM

use anyhow::{bail, Context, Result};
use certkey::{CertKeyManager, CipherSpec, KeyType};
use certkey_common::Logger;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub struct ConvertCommand {
    manager: Arc<CertKeyManager>,
    logger: Arc<Logger>,
}

/// Write key material readable by the owner only
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to create {path:?}"))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write {path:?}"))?;
    Ok(())
}

impl ConvertCommand {
    pub fn new(manager: Arc<CertKeyManager>, logger: Arc<Logger>) -> Self {
        Self { manager, logger }
    }

    /// Decrypt a traditional RSA/DSA PEM key and write its DER encoding
    pub fn decrypt(&self, input: &Path, password: Option<&str>, output: &Path) -> Result<String> {
        let key = self
            .manager
            .decrypt_legacy_openssl_key_file(input, password)
            .with_context(|| format!("Failed to decrypt {input:?}"))?;

        let Some(key) = key else {
            bail!("{input:?} is encrypted; a password is required");
        };

        write_private(output, key.der().expose())?;
        self.logger
            .info(format!("Wrote {} key ({} bytes) to {output:?}", key.key_type(), key.der().len()));

        Ok(format!("{} key written to {}", key.key_type(), output.display()))
    }

    /// Encrypt a DER private key into a traditional PEM key
    pub fn encrypt(
        &self,
        input: &Path,
        key_type: KeyType,
        cipher: CipherSpec,
        password: Option<&str>,
        output: &Path,
    ) -> Result<String> {
        let Some(password) = password.filter(|p| !p.is_empty()) else {
            bail!("A password is required to encrypt a key");
        };

        let der = certkey::read_whole_file(input).with_context(|| format!("Failed to read {input:?}"))?;
        let pem = self
            .manager
            .encrypt_legacy_openssl_key(der.expose(), key_type, cipher, password)
            .with_context(|| format!("Failed to encrypt {input:?}"))?;

        write_private(output, pem.as_bytes())?;
        self.logger.info(format!("Wrote {key_type} key encrypted with {cipher} to {output:?}"));

        Ok(format!("{key_type} key encrypted with {cipher} written to {}", output.display()))
    }
}
