//! Path-based variants of the manager operations.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::legacy::DecryptedKey;
use crate::manager::CertKeyManager;
use crate::secret::Secret;
use crate::types::{LoadedCertificate, PrivateKeyInfo};
use crate::log_debug;

/// Read a whole file into a [`Secret`].
///
/// The buffer is sized from the file metadata up front so the contents are
/// never copied through an unwiped reallocation.
pub fn read_whole_file(path: impl AsRef<Path>) -> Result<Secret> {
    let mut file = File::open(path.as_ref())?;
    let size = usize::try_from(file.metadata()?.len()).unwrap_or(usize::MAX);
    let mut contents = Secret::with_capacity(size.saturating_add(1));
    file.read_to_end(contents.as_mut_vec())?;
    Ok(contents)
}

impl CertKeyManager {
    pub fn decrypt_legacy_openssl_key_file(
        &self,
        path: impl AsRef<Path>,
        password: Option<&str>,
    ) -> Result<Option<DecryptedKey>> {
        let contents = self.read_logged(path.as_ref())?;
        self.decrypt_legacy_openssl_key(contents.expose(), password)
    }

    pub fn verify_private_key_file(
        &self,
        path: impl AsRef<Path>,
        password: Option<&str>,
    ) -> Result<PrivateKeyInfo> {
        let contents = self.read_logged(path.as_ref())?;
        self.classify_and_verify_private_key(contents.expose(), password)
    }

    pub fn load_and_verify_certificate_file(&self, path: impl AsRef<Path>) -> Result<LoadedCertificate> {
        let contents = self.read_logged(path.as_ref())?;
        self.load_and_verify_certificate(contents.expose())
    }

    /// Like [`CertKeyManager::is_pkcs12`]; an unreadable file is an error
    /// rather than `false`.
    pub fn is_pkcs12_file(&self, path: impl AsRef<Path>) -> Result<bool> {
        let contents = self.read_logged(path.as_ref())?;
        Ok(self.is_pkcs12(contents.expose()))
    }

    fn read_logged(&self, path: &Path) -> Result<Secret> {
        match read_whole_file(path) {
            Ok(contents) => {
                log_debug!(self.logger(), "Read {} bytes from {}", contents.len(), path.display());
                Ok(contents)
            }
            Err(e) => {
                self.logger()
                    .warn(format!("Failed to read {}: {e}", path.display()));
                Err(e)
            }
        }
    }
}
