//! Параметры вызова: подход, порог сжатия и функции шифрования.

use std::{fmt, sync::Arc};

use crate::{
    transform::{AesGcmCipher, CipherFn, DEFAULT_COMPRESSION_THRESHOLD},
    Approach, MinDataResult,
};

/// Параметры одного вызова `to_bytes` / `from_bytes`.
///
/// Собираются цепочкой `with_*`:
///
/// ```
/// use mindata::Options;
///
/// let opts = Options::new().with_compression_threshold(-1);
/// assert_eq!(opts.effective_compression_threshold(), -1);
/// ```
#[derive(Clone, Default)]
pub struct Options {
    /// Подход для `to_bytes`. `None` — подход по умолчанию (MinData V1).
    pub approach: Option<Arc<dyn Approach>>,
    /// Порог сжатия в байтах. `None` — 25; отрицательное значение отключает
    /// сжатие.
    pub compression_threshold: Option<i64>,
    pub encryptor: Option<CipherFn>,
    pub decryptor: Option<CipherFn>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_approach(
        mut self,
        approach: Arc<dyn Approach>,
    ) -> Self {
        self.approach = Some(approach);
        self
    }

    pub fn with_compression_threshold(
        mut self,
        threshold: i64,
    ) -> Self {
        self.compression_threshold = Some(threshold);
        self
    }

    /// Подключает пользовательские функции шифрования и расшифровки.
    ///
    /// Шифрование применяется последним при кодировании, расшифровка —
    /// первой при декодировании.
    pub fn with_encryption<E, D>(
        mut self,
        encryptor: E,
        decryptor: D,
    ) -> Self
    where
        E: Fn(&[u8]) -> MinDataResult<Vec<u8>> + Send + Sync + 'static,
        D: Fn(&[u8]) -> MinDataResult<Vec<u8>> + Send + Sync + 'static,
    {
        self.encryptor = Some(Arc::new(encryptor));
        self.decryptor = Some(Arc::new(decryptor));
        self
    }

    /// Подключает AES-GCM с указанным ключом (16, 24 или 32 байта).
    ///
    /// # Errors
    /// `InvalidKeyLength` для ключа другой длины.
    pub fn with_aes_gcm(
        self,
        key: &[u8],
    ) -> MinDataResult<Self> {
        let cipher = Arc::new(AesGcmCipher::new(key)?);
        let decrypt_with = Arc::clone(&cipher);
        Ok(self.with_encryption(
            move |data| cipher.encrypt(data),
            move |data| decrypt_with.decrypt(data),
        ))
    }

    /// Порог сжатия с учётом значения по умолчанию.
    pub fn effective_compression_threshold(&self) -> i64 {
        self.compression_threshold
            .unwrap_or(DEFAULT_COMPRESSION_THRESHOLD)
    }
}

impl fmt::Debug for Options {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Options")
            .field("approach", &self.approach.as_ref().map(|a| a.name()))
            .field("compression_threshold", &self.compression_threshold)
            .field("encryptor", &self.encryptor.is_some())
            .field("decryptor", &self.decryptor.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MinData;

    #[test]
    fn test_defaults() {
        let opts = Options::new();
        assert!(opts.approach.is_none());
        assert_eq!(opts.effective_compression_threshold(), 25);
        assert!(opts.encryptor.is_none() && opts.decryptor.is_none());
    }

    #[test]
    fn test_builders() {
        let opts = Options::new()
            .with_approach(Arc::new(MinData::new()))
            .with_compression_threshold(0)
            .with_encryption(|d| Ok(d.to_vec()), |d| Ok(d.to_vec()));
        assert_eq!(opts.approach.as_ref().map(|a| a.name()), Some("MD1"));
        assert_eq!(opts.effective_compression_threshold(), 0);
        assert!(opts.encryptor.is_some() && opts.decryptor.is_some());
    }

    #[test]
    fn test_aes_gcm_hooks_roundtrip() {
        let opts = Options::new().with_aes_gcm(&[7u8; 32]).unwrap();
        let enc = opts.encryptor.as_ref().unwrap();
        let dec = opts.decryptor.as_ref().unwrap();
        assert_eq!(dec(&enc(b"abc").unwrap()).unwrap(), b"abc");
        assert!(Options::new().with_aes_gcm(&[0u8; 10]).is_err());
    }

    #[test]
    fn test_debug_output() {
        let dbg = format!("{:?}", Options::new().with_compression_threshold(-1));
        assert!(dbg.contains("compression_threshold: Some(-1)"));
        assert!(dbg.contains("encryptor: false"));
    }
}
