//! Credential profiles for the certkey CLI
//!
//! A profile is a JSON file naming the certificate and key files of one
//! 802.1X-style credential set, so they can be verified together.

use anyhow::{Context, Result};
use certkey_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use serde_json::{from_str, to_string_pretty};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Credential set stored in a profile file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// CA certificate (PEM, DER or PKCS#12)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Client certificate (PEM, DER or PKCS#12)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_cert: Option<PathBuf>,

    /// Private key (traditional PEM, PKCS#8 or PKCS#12)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<PathBuf>,

    /// Private key password in clear text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_password: Option<String>,

    /// Name of an environment variable holding the private key password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_password_env: Option<String>,

    /// Logging levels to use while checking this profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

impl Profile {
    /// Load a profile from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Profile file not found: {path:?}"));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile file: {path:?}"))?;

        let profile: Profile = from_str(&content)
            .with_context(|| format!("Failed to parse profile file: {path:?}"))?;

        Ok(profile)
    }

    /// Save the profile as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = to_string_pretty(self).context("Failed to serialize profile")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write profile file: {path:?}"))?;

        Ok(())
    }

    /// Password for the private key: the inline value first, then the
    /// named environment variable.
    pub fn resolve_password(&self) -> Result<Option<Zeroizing<String>>> {
        if let Some(password) = &self.private_key_password {
            return Ok(Some(Zeroizing::new(password.clone())));
        }

        match &self.private_key_password_env {
            Some(var) => std::env::var(var)
                .map(|value| Some(Zeroizing::new(value)))
                .with_context(|| format!("Password environment variable {var} is not set")),
            None => Ok(None),
        }
    }

    /// Resolve a profile path relative to the directory holding the profile
    pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }
}
