//! HMAC-SHA256 tags and constant-time comparison.
//!
//! CBC gives no integrity on its own. The sender tags the encoded envelope
//! (`iv || ciphertext`) with [`tag_envelope`]; the receiver checks it with
//! [`verify_envelope`] **before** calling [`super::cbc::decrypt`].

use hmac::{Hmac, Mac};
use sealkit_common::CryptoError;
use sha2::Sha256;
use tracing::debug;

use super::MAC_TAG_LEN;
use crate::envelope::CbcEnvelope;
use crate::keys::MacKey;

type HmacSha256 = Hmac<Sha256>;

/// A 256-bit HMAC-SHA256 tag. Equality is constant-time.
#[derive(Debug, Clone, Copy)]
pub struct MacTag([u8; MAC_TAG_LEN]);

impl MacTag {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; MAC_TAG_LEN] {
        self.0
    }

    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidFormat`] unless `bytes` is exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; MAC_TAG_LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidFormat)?;
        Ok(Self(arr))
    }
}

impl PartialEq for MacTag {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl Eq for MacTag {}

/// Compute HMAC-SHA256 over `data`.
///
/// Any key length is accepted, including empty; short keys weaken the tag.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] if the HMAC implementation
/// refuses the key (HMAC-SHA256 accepts every length, so this is unreachable
/// in practice).
pub fn compute_tag(data: &[u8], key: &MacKey) -> Result<MacTag, CryptoError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|_| CryptoError::InvalidKeyLength { bits: key.bits() })?;
    mac.update(data);
    let mut out = [0u8; MAC_TAG_LEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(MacTag(out))
}

/// Recompute the tag over `data` and compare it with `expected` in constant time.
pub fn verify_tag(data: &[u8], key: &MacKey, expected: &[u8]) -> bool {
    let computed = match compute_tag(data, key) {
        Ok(tag) => tag,
        Err(_) => return false,
    };
    let ok = constant_time_eq(computed.as_bytes(), expected);
    if !ok {
        debug!(data_len = data.len(), "MAC verification failed");
    }
    ok
}

/// Tag the encoded form (`iv || ciphertext`) of a CBC envelope.
pub fn tag_envelope(envelope: &CbcEnvelope, key: &MacKey) -> Result<MacTag, CryptoError> {
    compute_tag(&envelope.to_bytes(), key)
}

/// Check a tag produced by [`tag_envelope`].
pub fn verify_envelope(envelope: &CbcEnvelope, key: &MacKey, expected: &[u8]) -> bool {
    verify_tag(&envelope.to_bytes(), key, expected)
}

/// Compare two byte strings without data-dependent branches.
///
/// XOR differences are OR-ed into one accumulator across the whole common
/// length with no early exit. Unequal lengths yield `false`, but only after
/// the loop has run. Only the returned boolean depends on the contents.
#[inline(never)]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    let diff = core::hint::black_box(diff);
    (a.len() == b.len()) & (diff == 0)
}
