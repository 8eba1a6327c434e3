//! IV handling and the key-derive-then-decrypt step for legacy keys.

use crate::backend::CipherBackend;
use crate::cipher::CipherSpec;
use crate::error::{CryptoError, Result};
use crate::kdf::{self, SALT_LEN};
use crate::secret::Secret;
use crate::types::KeyType;

/// Decode the hex IV of a `DEK-Info` header.
pub fn convert_iv(iv_hex: &str) -> Result<Secret> {
    let hex_bytes = iv_hex.as_bytes();
    if hex_bytes.len() % 2 != 0 {
        return Err(CryptoError::invalid_data(
            "IV must be an even number of bytes in length.",
        ));
    }

    let mut iv = Secret::new(vec![0u8; hex_bytes.len() / 2]);
    hex::decode_to_slice(hex_bytes, iv.as_mut_vec())
        .map_err(|_| CryptoError::invalid_data("IV contains non-hexadecimal digits."))?;

    if iv.len() < SALT_LEN {
        return Err(CryptoError::invalid_data(format!(
            "IV must contain at least {SALT_LEN} bytes"
        )));
    }
    Ok(iv)
}

/// Derive the key from `password` and the IV, then decrypt `ciphertext`.
///
/// The IV, the derived key and any partial plaintext are wiped on every
/// return path.
pub fn decrypt_key(
    backend: &dyn CipherBackend,
    cipher: CipherSpec,
    key_type: KeyType,
    ciphertext: &[u8],
    iv_hex: &str,
    password: &str,
) -> Result<Secret> {
    let iv = convert_iv(iv_hex)?;
    let key = kdf::derive_key(cipher, iv.expose(), password)?.ok_or_else(|| {
        CryptoError::InvalidPassword("A password is required to decrypt the private key.".to_string())
    })?;

    backend.decrypt(cipher, key_type, ciphertext, iv.expose(), key.expose())
}

/// True when `data` is exactly one DER SEQUENCE (definite length).
///
/// Used to catch wrong passwords whose decryption happens to leave valid
/// padding behind.
pub fn is_der_sequence(data: &[u8]) -> bool {
    let (&tag, rest) = match data.split_first() {
        Some(split) => split,
        None => return false,
    };
    if tag != 0x30 {
        return false;
    }
    let (&first, rest) = match rest.split_first() {
        Some(split) => split,
        None => return false,
    };

    let content_len = if first < 0x80 {
        usize::from(first)
    } else {
        let count = usize::from(first & 0x7f);
        if count == 0 || count > std::mem::size_of::<usize>() || rest.len() < count {
            return false;
        }
        rest[..count]
            .iter()
            .fold(0usize, |len, &b| (len << 8) | usize::from(b))
            .saturating_add(count)
    };

    rest.len() == content_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RustCryptoCipher;
    use crate::error::ErrorKind;

    #[test]
    fn iv_conversion_errors() {
        let odd = convert_iv("010203040506070").unwrap_err();
        assert!(odd.to_string().contains("even number"));

        let non_hex = convert_iv("01020304050607zz").unwrap_err();
        assert!(non_hex.to_string().contains("non-hexadecimal"));

        let short = convert_iv("01020304050607").unwrap_err();
        assert!(short.to_string().contains("at least 8 bytes"));

        for err in [odd, non_hex, short] {
            assert_eq!(err.kind(), ErrorKind::InvalidData);
        }
    }

    #[test]
    fn iv_conversion_accepts_mixed_case() {
        let iv = convert_iv("0102030405060708aAbBcCdDeEfF0011").unwrap();
        assert_eq!(iv.len(), 16);
        assert_eq!(&iv.expose()[8..10], &[0xaa, 0xbb]);
    }

    #[test]
    fn decrypt_requires_password() {
        let err = decrypt_key(
            &RustCryptoCipher,
            CipherSpec::DesEde3Cbc,
            KeyType::Rsa,
            &[0u8; 8],
            "0102030405060708",
            "",
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPassword);
    }

    #[test]
    fn der_sequence_check() {
        assert!(is_der_sequence(&[0x30, 0x00]));
        assert!(is_der_sequence(&[0x30, 0x02, 0x05, 0x00]));
        assert!(!is_der_sequence(&[0x30, 0x03, 0x05, 0x00]));
        assert!(!is_der_sequence(&[0x04, 0x00]));
        assert!(!is_der_sequence(&[0x30]));
        assert!(!is_der_sequence(&[]));
        // indefinite length
        assert!(!is_der_sequence(&[0x30, 0x80, 0x00, 0x00]));

        let mut long = vec![0x30, 0x82, 0x01, 0x00];
        long.extend(std::iter::repeat(0u8).take(0x100));
        assert!(is_der_sequence(&long));
        long.push(0);
        assert!(!is_der_sequence(&long));
    }
}
