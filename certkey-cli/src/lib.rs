//! Certkey CLI Library
//!
//! Command implementations behind the `certkey` binary: inspection of keys,
//! certificates and PKCS#12 containers, key conversion and profile checks.

pub mod config;
pub mod convert;
pub mod inspect;
pub mod profile;

pub use config::Profile;
pub use convert::ConvertCommand;
pub use inspect::InspectCommand;
pub use profile::ProfileCommand;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
