//! [`Toolkit`]: the generate → seal → verify → open sequence in one place.

use std::fmt;
use std::sync::Arc;

use sealkit_common::CryptoError;
use tracing::debug;

use crate::config::Settings;
use crate::crypto::mac::{self, MacTag};
use crate::crypto::{cbc, gcm};
use crate::envelope::{CbcEnvelope, GcmEnvelope};
use crate::keys::{CbcKey, GcmKey, KeyMaterial, MacKey};
use crate::random::{RandomSource, SystemRandom};

/// Key generation and sealing over one shared random source.
///
/// Cheap to clone; clones share the source. Holds no keys.
#[derive(Clone)]
pub struct Toolkit {
    source: Arc<dyn RandomSource>,
    key_bits: usize,
    mac_key_bits: usize,
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("key_bits", &self.key_bits)
            .field("mac_key_bits", &self.mac_key_bits)
            .finish_non_exhaustive()
    }
}

impl Toolkit {
    /// Toolkit over the OS random source.
    pub fn new(settings: &Settings) -> Self {
        Self::with_source(settings, Arc::new(SystemRandom))
    }

    /// Toolkit over an injected random source.
    pub fn with_source(settings: &Settings, source: Arc<dyn RandomSource>) -> Self {
        Self {
            source,
            key_bits: settings.key_bits,
            mac_key_bits: settings.mac_key_bits,
        }
    }

    fn material(&self) -> KeyMaterial<'_> {
        KeyMaterial::new(self.source.as_ref())
    }

    /// New AES-CBC key of the configured size.
    pub fn cbc_key(&self) -> Result<CbcKey, CryptoError> {
        self.material().key(self.key_bits)
    }

    /// New AES-GCM key of the configured size.
    pub fn gcm_key(&self) -> Result<GcmKey, CryptoError> {
        self.material().key(self.key_bits)
    }

    /// New HMAC-SHA256 key of the configured size.
    pub fn mac_key(&self) -> Result<MacKey, CryptoError> {
        self.material().key(self.mac_key_bits)
    }

    /// Encrypt with AES-CBC, then tag the encoded envelope with HMAC-SHA256.
    ///
    /// `key` and `mac_key` must be independent keys.
    pub fn seal_cbc(
        &self,
        plaintext: &[u8],
        key: &CbcKey,
        mac_key: &MacKey,
    ) -> Result<(CbcEnvelope, MacTag), CryptoError> {
        let envelope = cbc::encrypt_with(self.source.as_ref(), plaintext, key)?;
        let tag = mac::tag_envelope(&envelope, mac_key)?;
        debug!(ciphertext_len = envelope.ciphertext().len(), "sealed cbc envelope");
        Ok((envelope, tag))
    }

    /// Verify the tag, then decrypt. See [`cbc::decrypt_verified`].
    pub fn open_cbc(
        &self,
        envelope: CbcEnvelope,
        tag: &[u8],
        key: &CbcKey,
        mac_key: &MacKey,
    ) -> Result<Vec<u8>, CryptoError> {
        cbc::decrypt_verified(envelope, tag, key, mac_key)
    }

    /// Encrypt with AES-GCM under a fresh nonce.
    pub fn seal_gcm(&self, plaintext: &[u8], key: &GcmKey) -> Result<GcmEnvelope, CryptoError> {
        gcm::encrypt_with(self.source.as_ref(), plaintext, key)
    }

    /// Verify and decrypt an AES-GCM envelope.
    pub fn open_gcm(&self, envelope: GcmEnvelope, key: &GcmKey) -> Result<Vec<u8>, CryptoError> {
        gcm::decrypt(envelope, key)
    }
}
