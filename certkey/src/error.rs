use thiserror::Error;

/// Error types for the certkey crate
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unknown cipher: {0}")]
    UnknownCipher(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Certificate error: {0}")]
    CertificateError(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Fieldless view of [`CryptoError`] for matching on the failure class only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidData,
    UnknownCipher,
    InvalidPassword,
    DecryptionFailed,
    Certificate,
    Backend,
    Io,
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::InvalidData(_) => ErrorKind::InvalidData,
            CryptoError::UnknownCipher(_) => ErrorKind::UnknownCipher,
            CryptoError::InvalidPassword(_) => ErrorKind::InvalidPassword,
            CryptoError::DecryptionFailed(_) => ErrorKind::DecryptionFailed,
            CryptoError::CertificateError(_) => ErrorKind::Certificate,
            CryptoError::BackendError(_) => ErrorKind::Backend,
            CryptoError::IoError(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn invalid_data(message: impl Into<String>) -> Self {
        CryptoError::InvalidData(message.into())
    }
}

impl From<openssl::error::ErrorStack> for CryptoError {
    fn from(err: openssl::error::ErrorStack) -> Self {
        CryptoError::BackendError(format!("OpenSSL error: {err}"))
    }
}

/// Result type for certkey operations
pub type Result<T> = std::result::Result<T, CryptoError>;
