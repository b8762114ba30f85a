//! Key, IV and nonce generation.
//!
//! All material is drawn from a [`RandomSource`]. [`KeyMaterial::system`]
//! uses the process-wide OS source; [`KeyMaterial::new`] takes any injected
//! source. The free functions are shorthands for the system source.

pub mod types;

pub use types::{purpose, CbcKey, GcmKey, Iv, Key, KeyPurpose, MacKey, MessageVector, Nonce};

use tracing::debug;

use crate::crypto::{IV_LEN, NONCE_LEN};
use crate::random::{next_bytes, RandomSource, SystemRandom};
use sealkit_common::CryptoError;

/// Generator for keys, IVs and nonces over one random source.
#[derive(Clone, Copy)]
pub struct KeyMaterial<'r> {
    source: &'r dyn RandomSource,
}

impl KeyMaterial<'static> {
    /// Generator backed by the OS CSPRNG.
    pub fn system() -> Self {
        Self::new(SystemRandom::shared())
    }
}

impl<'r> KeyMaterial<'r> {
    pub fn new(source: &'r dyn RandomSource) -> Self {
        Self { source }
    }

    /// Generate a `bits`-bit key for purpose `P`.
    ///
    /// Any positive multiple of 8 is accepted. Whether the cipher supports the
    /// size is checked when the key is used.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeySize`] if `bits` is zero or not a
    /// multiple of 8, and [`CryptoError::EntropyUnavailable`] if the source fails.
    pub fn key<P: KeyPurpose>(&self, bits: usize) -> Result<Key<P>, CryptoError> {
        if bits == 0 || bits % 8 != 0 {
            return Err(CryptoError::InvalidKeySize { bits });
        }
        let bytes = next_bytes(self.source, bits / 8)?;
        debug!(purpose = P::LABEL, bits, "generated key");
        Ok(Key::from_bytes(bytes))
    }

    /// Generate a fresh 16-byte CBC IV.
    pub fn iv(&self) -> Result<Iv, CryptoError> {
        let mut bytes = [0u8; IV_LEN];
        self.source.fill(&mut bytes)?;
        Ok(Iv::from_bytes(bytes))
    }

    /// Generate a fresh 12-byte GCM nonce.
    pub fn nonce(&self) -> Result<Nonce, CryptoError> {
        let mut bytes = [0u8; NONCE_LEN];
        self.source.fill(&mut bytes)?;
        Ok(Nonce::from_bytes(bytes))
    }
}

/// Generate a `bits`-bit key from the system source. See [`KeyMaterial::key`].
pub fn generate_key<P: KeyPurpose>(bits: usize) -> Result<Key<P>, CryptoError> {
    KeyMaterial::system().key(bits)
}

/// Generate a CBC IV from the system source.
pub fn generate_iv() -> Result<Iv, CryptoError> {
    KeyMaterial::system().iv()
}

/// Generate a GCM nonce from the system source.
pub fn generate_nonce() -> Result<Nonce, CryptoError> {
    KeyMaterial::system().nonce()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{DeterministicRandom, MockRandomSource};
    use std::collections::HashSet;

    #[test]
    fn generated_lengths() {
        assert_eq!(generate_key::<purpose::Gcm>(256).unwrap().len(), 32);
        assert_eq!(generate_key::<purpose::Cbc>(128).unwrap().len(), 16);
        assert_eq!(generate_key::<purpose::Mac>(8).unwrap().len(), 1);
        assert_eq!(generate_iv().unwrap().as_bytes().len(), 16);
        assert_eq!(generate_nonce().unwrap().as_bytes().len(), 12);
    }

    #[test]
    fn rejects_sizes_that_are_not_whole_bytes() {
        for bits in [0, 1, 7, 255] {
            let err = generate_key::<purpose::Cbc>(bits).unwrap_err();
            assert!(matches!(err, CryptoError::InvalidKeySize { bits: b } if b == bits));
        }
    }

    #[test]
    fn odd_but_byte_aligned_sizes_are_allowed() {
        // AES validation happens in the engines, not here.
        assert_eq!(generate_key::<purpose::Cbc>(40).unwrap().len(), 5);
    }

    #[test]
    fn ivs_and_nonces_are_distinct() {
        let ivs: HashSet<_> = (0..1000).map(|_| generate_iv().unwrap()).collect();
        assert_eq!(ivs.len(), 1000);
        let nonces: HashSet<_> = (0..1000).map(|_| generate_nonce().unwrap().to_bytes()).collect();
        assert_eq!(nonces.len(), 1000);
    }

    #[test]
    fn injected_source_drives_output() {
        let a = DeterministicRandom::from_seed(42);
        let b = DeterministicRandom::from_seed(42);
        let ka: GcmKey = KeyMaterial::new(&a).key(256).unwrap();
        let kb: GcmKey = KeyMaterial::new(&b).key(256).unwrap();
        assert_eq!(ka.as_bytes(), kb.as_bytes());
        assert_eq!(KeyMaterial::new(&a).nonce().unwrap(), KeyMaterial::new(&b).nonce().unwrap());
    }

    #[test]
    fn invalid_size_consumes_no_entropy() {
        let mut mock = MockRandomSource::new();
        mock.expect_fill().never();
        assert!(KeyMaterial::new(&mock).key::<purpose::Mac>(12).is_err());
    }

    #[test]
    fn entropy_failure_surfaces() {
        let mut mock = MockRandomSource::new();
        mock.expect_fill()
            .returning(|_| Err(CryptoError::EntropyUnavailable("starved".into())));
        let material = KeyMaterial::new(&mock);
        assert!(matches!(material.iv(), Err(CryptoError::EntropyUnavailable(_))));
        assert!(matches!(material.nonce(), Err(CryptoError::EntropyUnavailable(_))));
        assert!(matches!(
            material.key::<purpose::Cbc>(128),
            Err(CryptoError::EntropyUnavailable(_))
        ));
    }
}
