//! Key, IV and nonce value types.

use std::fmt;
use std::marker::PhantomData;

use sealkit_common::{CryptoError, Scheme};
use zeroize::Zeroizing;

use crate::crypto::{IV_LEN, NONCE_LEN};

/// Marker for what a [`Key`] may be used for.
///
/// Keys for different purposes are distinct types, so handing a MAC key to a
/// cipher (or a CBC key to GCM) does not compile.
pub trait KeyPurpose: sealed::Sealed {
    /// Short name used in logs and `Debug` output.
    const LABEL: &'static str;
}

/// Purpose markers for [`Key`].
pub mod purpose {
    /// AES-CBC encryption keys.
    #[derive(Debug)]
    pub enum Cbc {}
    /// AES-GCM encryption keys.
    #[derive(Debug)]
    pub enum Gcm {}
    /// HMAC-SHA256 keys.
    #[derive(Debug)]
    pub enum Mac {}
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::purpose::Cbc {}
    impl Sealed for super::purpose::Gcm {}
    impl Sealed for super::purpose::Mac {}
}

impl KeyPurpose for purpose::Cbc {
    const LABEL: &'static str = "aes-cbc";
}
impl KeyPurpose for purpose::Gcm {
    const LABEL: &'static str = "aes-gcm";
}
impl KeyPurpose for purpose::Mac {
    const LABEL: &'static str = "hmac-sha256";
}

/// Secret key bytes bound to a single purpose. Zeroized on drop.
///
/// The length is not checked here; each engine validates it at use time.
pub struct Key<P: KeyPurpose> {
    bytes: Zeroizing<Vec<u8>>,
    _purpose: PhantomData<fn() -> P>,
}

/// Key for [`crate::crypto::cbc`].
pub type CbcKey = Key<purpose::Cbc>;
/// Key for [`crate::crypto::gcm`].
pub type GcmKey = Key<purpose::Gcm>;
/// Key for [`crate::crypto::mac`].
pub type MacKey = Key<purpose::Mac>;

impl<P: KeyPurpose> Key<P> {
    /// Wrap caller-supplied key material. The input is moved, not copied.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
            _purpose: PhantomData,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Key size in bits.
    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }
}

impl<P: KeyPurpose> Clone for Key<P> {
    fn clone(&self) -> Self {
        Self::from_bytes(self.bytes.to_vec())
    }
}

impl<P: KeyPurpose> fmt::Debug for Key<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        f.debug_struct("Key")
            .field("purpose", &P::LABEL)
            .field("bits", &self.bits())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Per-message value carried in an [`crate::Envelope`] next to the ciphertext.
pub trait MessageVector: Copy + fmt::Debug + Eq {
    /// Exact length in bytes.
    const LEN: usize;
    /// The construction this vector belongs to.
    const SCHEME: Scheme;

    fn as_bytes(&self) -> &[u8];

    /// Parse from a slice of exactly [`MessageVector::LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidFormat`] on a length mismatch.
    fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError>;
}

/// 128-bit CBC initialisation vector.
///
/// Must not be reused with the same key for different plaintexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Iv([u8; IV_LEN]);

impl Iv {
    pub fn from_bytes(bytes: [u8; IV_LEN]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; IV_LEN] {
        self.0
    }
}

impl MessageVector for Iv {
    const LEN: usize = IV_LEN;
    const SCHEME: Scheme = Scheme::AesCbcHmacSha256;

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; IV_LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidFormat)?;
        Ok(Self(arr))
    }
}

/// 96-bit GCM nonce.
///
/// A (key, nonce) pair must never encrypt two different plaintexts: reuse
/// leaks the GHASH key and allows forgeries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; NONCE_LEN] {
        self.0
    }
}

impl MessageVector for Nonce {
    const LEN: usize = NONCE_LEN;
    const SCHEME: Scheme = Scheme::AesGcm;

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; NONCE_LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidFormat)?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_debug_is_redacted() {
        let key = MacKey::from_bytes(vec![0xAB; 32]);
        let dbg = format!("{key:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(dbg.contains("hmac-sha256"));
        assert!(!dbg.contains("171"));
    }

    #[test]
    fn key_reports_bits() {
        let key = CbcKey::from_bytes([0u8; 24]);
        assert_eq!(key.len(), 24);
        assert_eq!(key.bits(), 192);
        assert!(!key.is_empty());
    }

    #[test]
    fn clone_copies_material() {
        let key = GcmKey::from_bytes(vec![1, 2, 3]);
        assert_eq!(key.clone().as_bytes(), key.as_bytes());
    }

    #[test]
    fn vectors_parse_exact_length_only() {
        assert!(Iv::from_slice(&[0u8; IV_LEN]).is_ok());
        assert!(Iv::from_slice(&[0u8; IV_LEN - 1]).is_err());
        assert!(Nonce::from_slice(&[0u8; NONCE_LEN]).is_ok());
        assert!(Nonce::from_slice(&[0u8; IV_LEN]).is_err());
    }
}
