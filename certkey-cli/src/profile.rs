//! Verify every credential named by a profile

use anyhow::{Context, Result};
use certkey::CertKeyManager;
use certkey_common::Logger;
use std::path::Path;
use std::sync::Arc;

use crate::config::Profile;
use crate::inspect::InspectCommand;

pub struct ProfileCommand {
    manager: Arc<CertKeyManager>,
    logger: Arc<Logger>,
}

impl ProfileCommand {
    pub fn new(manager: Arc<CertKeyManager>, logger: Arc<Logger>) -> Self {
        Self { manager, logger }
    }

    /// Check the CA certificate, client certificate and private key of a
    /// profile. `password` overrides the one stored in the profile.
    ///
    /// Returns one line per checked entry; the first failure aborts.
    pub fn run(&self, profile_path: &Path, password: Option<&str>) -> Result<Vec<String>> {
        let profile = Profile::load(profile_path)?;
        self.verify(&profile, profile_path, password)
    }

    pub fn verify(&self, profile: &Profile, profile_path: &Path, password: Option<&str>) -> Result<Vec<String>> {
        let base_dir = profile_path.parent().unwrap_or_else(|| Path::new("."));
        let logger = Arc::new(self.logger.with_context(profile_path.display().to_string()));
        let inspect = InspectCommand::new(self.manager.clone(), logger.clone());

        let stored_password = profile.resolve_password()?;
        let password = password.or(stored_password.as_ref().map(|p| p.as_str()));

        let mut lines = Vec::new();

        if let Some(ca_cert) = &profile.ca_cert {
            let path = Profile::resolve_path(base_dir, ca_cert);
            let result = inspect.cert(&path).context("CA certificate check failed")?;
            lines.push(format!("ca_cert: {result}"));
        }

        if let Some(client_cert) = &profile.client_cert {
            let path = Profile::resolve_path(base_dir, client_cert);
            let result = inspect.cert(&path).context("Client certificate check failed")?;
            lines.push(format!("client_cert: {result}"));
        }

        if let Some(private_key) = &profile.private_key {
            let path = Profile::resolve_path(base_dir, private_key);
            let result = inspect.key(&path, password).context("Private key check failed")?;
            lines.push(format!("private_key: {result}"));
        }

        if lines.is_empty() {
            logger.warn("Profile names no certificates or keys");
        } else {
            logger.info_static("Profile credentials verified");
        }

        Ok(lines)
    }
}
