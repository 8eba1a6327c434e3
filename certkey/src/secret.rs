//! Owned byte buffers that are wiped before their memory is released.

use std::fmt;
use zeroize::Zeroize;

/// An owned byte buffer for key material, IVs, decoded DER and plaintext.
///
/// The whole allocation (not just the initialized length) is overwritten with
/// zeros when the value is dropped, on every exit path. Growing past the
/// initial capacity would leave an unwiped copy behind, so callers that
/// accumulate data size the buffer up front with [`Secret::with_capacity`].
pub struct Secret {
    bytes: Vec<u8>,
}

impl Secret {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    pub fn expose(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Append bytes; the buffer must already have room for them.
    pub(crate) fn extend_within_capacity(&mut self, data: &[u8]) {
        debug_assert!(self.bytes.capacity() - self.bytes.len() >= data.len());
        self.bytes.extend_from_slice(data);
    }

    /// Mutable access to the backing vector for in-place decoding and
    /// decryption.
    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }

    /// Shorten the buffer, wiping the bytes that fall off the end.
    pub(crate) fn truncate(&mut self, len: usize) {
        if len < self.bytes.len() {
            self.bytes[len..].zeroize();
            self.bytes.truncate(len);
        }
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        // Vec::zeroize clears the full capacity, including spare bytes
        self.bytes.zeroize();
    }
}

impl Clone for Secret {
    fn clone(&self) -> Self {
        Self::from_slice(&self.bytes)
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Secret {}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {} bytes])", self.bytes.len())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
