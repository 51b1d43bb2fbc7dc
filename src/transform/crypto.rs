//! AES-GCM шифрование для конвейера трансформаций.
//!
//! Формат: `[nonce:12][ciphertext || tag:16]`. Nonce случайный для каждого
//! вызова `encrypt`, поэтому шифрование одного и того же буфера дважды даёт
//! разные байты.

use std::fmt;

use aes_gcm::{
    aead::{consts::U12, Aead, KeyInit},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};

use crate::{MinDataError, MinDataResult};

/// Длина nonce в байтах.
pub const NONCE_SIZE: usize = 12;
/// Длина тега аутентификации в байтах.
pub const TAG_SIZE: usize = 16;

type Aes192Gcm = AesGcm<Aes192, U12>;

#[derive(Clone)]
enum Cipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

/// AES-GCM с ключом 128, 192 или 256 бит.
#[derive(Clone)]
pub struct AesGcmCipher {
    cipher: Cipher,
}

impl AesGcmCipher {
    /// Создаёт шифр; размер ключа выбирает вариант AES.
    ///
    /// # Errors
    /// `InvalidKeyLength`, если ключ не 16, 24 или 32 байта.
    pub fn new(key: &[u8]) -> MinDataResult<Self> {
        let invalid = |_| MinDataError::InvalidKeyLength(key.len());
        let cipher = match key.len() {
            16 => Cipher::Aes128(Aes128Gcm::new_from_slice(key).map_err(invalid)?),
            24 => Cipher::Aes192(Aes192Gcm::new_from_slice(key).map_err(invalid)?),
            32 => Cipher::Aes256(Aes256Gcm::new_from_slice(key).map_err(invalid)?),
            other => return Err(MinDataError::InvalidKeyLength(other)),
        };
        Ok(Self { cipher })
    }

    /// Размер ключа в битах.
    pub fn key_bits(&self) -> usize {
        match self.cipher {
            Cipher::Aes128(_) => 128,
            Cipher::Aes192(_) => 192,
            Cipher::Aes256(_) => 256,
        }
    }

    /// Шифрует данные и добавляет случайный nonce в начало.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
    ) -> MinDataResult<Vec<u8>> {
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);
        let nonce_ref = Nonce::<U12>::from_slice(&nonce);

        let sealed = match &self.cipher {
            Cipher::Aes128(c) => c.encrypt(nonce_ref, plaintext),
            Cipher::Aes192(c) => c.encrypt(nonce_ref, plaintext),
            Cipher::Aes256(c) => c.encrypt(nonce_ref, plaintext),
        }
        .map_err(|_| MinDataError::EncryptionFailed)?;

        let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    /// Проверяет тег и расшифровывает данные, созданные [`Self::encrypt`].
    ///
    /// # Errors
    /// - `InvalidDecryptionData`, если вход короче nonce;
    /// - `AuthenticationFailed` при неверном ключе или изменённых данных.
    pub fn decrypt(
        &self,
        data: &[u8],
    ) -> MinDataResult<Vec<u8>> {
        if data.len() < NONCE_SIZE {
            return Err(MinDataError::InvalidDecryptionData {
                len: data.len(),
                required: NONCE_SIZE,
            });
        }
        let (nonce, ciphertext) = data.split_at(NONCE_SIZE);
        let nonce = Nonce::<U12>::from_slice(nonce);

        match &self.cipher {
            Cipher::Aes128(c) => c.decrypt(nonce, ciphertext),
            Cipher::Aes192(c) => c.decrypt(nonce, ciphertext),
            Cipher::Aes256(c) => c.decrypt(nonce, ciphertext),
        }
        .map_err(|_| MinDataError::AuthenticationFailed)
    }
}

impl fmt::Debug for AesGcmCipher {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        // ключевой материал не выводится
        f.debug_struct("AesGcmCipher")
            .field("key_bits", &self.key_bits())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_128: &[u8; 16] = b"0123456789abcdef";
    const KEY_192: &[u8; 24] = b"0123456789abcdef01234567";
    const KEY_256: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_roundtrip_all_key_sizes() {
        for key in [&KEY_128[..], &KEY_192[..], &KEY_256[..]] {
            let cipher = AesGcmCipher::new(key).unwrap();
            assert_eq!(cipher.key_bits(), key.len() * 8);

            let sealed = cipher.encrypt(b"hello world").unwrap();
            assert_eq!(sealed.len(), NONCE_SIZE + 11 + TAG_SIZE);
            assert_eq!(cipher.decrypt(&sealed).unwrap(), b"hello world");
        }
    }

    #[test]
    fn test_nonce_is_random() {
        let cipher = AesGcmCipher::new(KEY_256).unwrap();
        let a = cipher.encrypt(b"same").unwrap();
        let b = cipher.encrypt(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_key_length() {
        for len in [0, 15, 17, 31, 33] {
            assert!(matches!(
                AesGcmCipher::new(&vec![0u8; len]),
                Err(MinDataError::InvalidKeyLength(l)) if l == len
            ));
        }
    }

    #[test]
    fn test_short_ciphertext() {
        let cipher = AesGcmCipher::new(KEY_128).unwrap();
        assert!(matches!(
            cipher.decrypt(&[0u8; 11]),
            Err(MinDataError::InvalidDecryptionData {
                len: 11,
                required: NONCE_SIZE
            })
        ));
    }

    /// Тест проверяет, что изменение любого байта обнаруживается.
    #[test]
    fn test_tampering_is_detected() {
        let cipher = AesGcmCipher::new(KEY_256).unwrap();
        let sealed = cipher.encrypt(b"payload").unwrap();
        for i in 0..sealed.len() {
            let mut bad = sealed.clone();
            bad[i] ^= 0x01;
            assert!(matches!(
                cipher.decrypt(&bad),
                Err(MinDataError::AuthenticationFailed)
            ));
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let sealed = AesGcmCipher::new(KEY_256).unwrap().encrypt(b"x").unwrap();
        let other = AesGcmCipher::new(b"fedcba9876543210fedcba9876543210").unwrap();
        assert!(matches!(
            other.decrypt(&sealed),
            Err(MinDataError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let cipher = AesGcmCipher::new(KEY_128).unwrap();
        let dbg = format!("{cipher:?}");
        assert!(dbg.contains("128"));
        assert!(!dbg.contains("0123"));
    }
}
