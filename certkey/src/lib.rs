//! Certkey – format detection, parsing and decryption of private keys and
//! certificates
//!
//! Handles traditional OpenSSL RSA/DSA PEM keys (including the
//! `Proc-Type`/`DEK-Info` encryption headers and their MD5 key stretching),
//! PKCS#8, PEM/DER X.509 certificates and PKCS#12 containers.

pub mod backend;
pub mod certificate;
pub mod cipher;
pub mod decrypt;
pub mod error;
pub mod file;
pub mod kdf;
pub mod legacy;
mod macros;
pub mod manager;
pub mod pem;
pub mod scan;
pub mod secret;
pub mod types;

pub use error::{CryptoError, ErrorKind, Result};

pub use backend::{CertificateBackend, CipherBackend, DefaultCertificateBackend, RustCryptoCipher};
pub use certificate::CertificateSummary;
pub use cipher::CipherSpec;
pub use decrypt::{convert_iv, decrypt_key};
pub use file::read_whole_file;
pub use kdf::{derive_key, md5_hash_chain};
pub use legacy::{parse_legacy_key, probe_legacy_key, DecryptedKey, DekInfo, ParsedLegacyKey};
pub use manager::{CertKeyManager, DEFAULT_ENCRYPTION_CIPHER};
pub use pem::{extract_pem_certificate, parse_pkcs8, try_parse_pkcs8, Pkcs8Key};
pub use scan::{find_tag, LineCursor};
pub use secret::Secret;
pub use types::{FileFormat, KeyType, LoadedCertificate, PrivateKeyInfo};
