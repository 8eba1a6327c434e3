use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use super::CipherBackend;
use crate::cipher::CipherSpec;
use crate::error::{CryptoError, Result};
use crate::secret::Secret;
use crate::types::KeyType;

/// CBC ciphers from the RustCrypto `des`/`aes` crates
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoCipher;

impl RustCryptoCipher {
    pub fn new() -> Self {
        Self
    }
}

fn check_iv(cipher: CipherSpec, iv: &[u8]) -> Result<&[u8]> {
    let block = cipher.block_size();
    if iv.len() < block {
        return Err(CryptoError::invalid_data(format!(
            "Invalid IV length (must be at least {block})."
        )));
    }
    Ok(&iv[..block])
}

impl CipherBackend for RustCryptoCipher {
    fn decrypt(
        &self,
        cipher: CipherSpec,
        key_type: KeyType,
        ciphertext: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Secret> {
        let iv = check_iv(cipher, iv)?;
        if ciphertext.is_empty() || ciphertext.len() % cipher.block_size() != 0 {
            return Err(CryptoError::DecryptionFailed(format!(
                "Failed to decrypt the {key_type} private key: data is not a multiple of the {cipher} block size."
            )));
        }

        let mut buf = Secret::from_slice(ciphertext);

        macro_rules! do_decrypt {
            ($cipher:ty) => {{
                let dec = cbc::Decryptor::<$cipher>::new_from_slices(key, iv).map_err(|e| {
                    CryptoError::DecryptionFailed(format!("Failed to initialize the {cipher} context: {e}"))
                })?;
                dec.decrypt_padded_mut::<Pkcs7>(buf.as_mut_vec())
                    .map(|plain| plain.len())
                    .map_err(|_| {
                        CryptoError::DecryptionFailed(format!(
                            "Failed to decrypt the {key_type} private key: bad padding."
                        ))
                    })?
            }};
        }

        let plain_len = match cipher {
            CipherSpec::DesEde3Cbc => do_decrypt!(des::TdesEde3),
            CipherSpec::DesCbc => do_decrypt!(des::Des),
            CipherSpec::Aes128Cbc => do_decrypt!(aes::Aes128),
            CipherSpec::Aes192Cbc => do_decrypt!(aes::Aes192),
            CipherSpec::Aes256Cbc => do_decrypt!(aes::Aes256),
        };

        buf.truncate(plain_len);
        Ok(buf)
    }

    fn encrypt(&self, cipher: CipherSpec, plaintext: &[u8], iv: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        let iv = check_iv(cipher, iv)?;

        macro_rules! do_encrypt {
            ($cipher:ty) => {{
                cbc::Encryptor::<$cipher>::new_from_slices(key, iv)
                    .map_err(|e| {
                        CryptoError::BackendError(format!("Failed to initialize the {cipher} context: {e}"))
                    })?
                    .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
            }};
        }

        Ok(match cipher {
            CipherSpec::DesEde3Cbc => do_encrypt!(des::TdesEde3),
            CipherSpec::DesCbc => do_encrypt!(des::Des),
            CipherSpec::Aes128Cbc => do_encrypt!(aes::Aes128),
            CipherSpec::Aes192Cbc => do_encrypt!(aes::Aes192),
            CipherSpec::Aes256Cbc => do_encrypt!(aes::Aes256),
        })
    }
}
