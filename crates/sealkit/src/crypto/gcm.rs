//! AES-GCM authenticated encryption.
//!
//! The 128-bit tag is appended to the ciphertext. Decryption and tag
//! verification are a single step: on any mismatch no plaintext is returned.
//!
//! **Never reuse a (key, nonce) pair.** GCM nonce reuse leaks the
//! authentication key and breaks confidentiality. Every encrypt call here draws
//! a fresh random 96-bit nonce; key rotation well before 2^32 messages per key
//! is the caller's responsibility.

use aes::Aes192;
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use sealkit_common::CryptoError;
use tracing::{debug, warn};

use super::ensure_aes_key_len;
use crate::envelope::{Envelope, GcmEnvelope};
use crate::keys::{GcmKey, KeyMaterial, Nonce};
use crate::random::{RandomSource, SystemRandom};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Encrypt `plaintext` under a fresh random nonce.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] unless the key is 128, 192 or
/// 256 bits, and [`CryptoError::EntropyUnavailable`] if no nonce can be drawn.
pub fn encrypt(plaintext: &[u8], key: &GcmKey) -> Result<GcmEnvelope, CryptoError> {
    encrypt_aad_with(SystemRandom::shared(), plaintext, &[], key)
}

/// [`encrypt`] with the nonce drawn from `source`.
pub fn encrypt_with(
    source: &dyn RandomSource,
    plaintext: &[u8],
    key: &GcmKey,
) -> Result<GcmEnvelope, CryptoError> {
    encrypt_aad_with(source, plaintext, &[], key)
}

/// Encrypt and bind `aad` into the tag. `aad` is not stored in the envelope;
/// the same bytes must be supplied to [`decrypt_aad`].
pub fn encrypt_aad(plaintext: &[u8], aad: &[u8], key: &GcmKey) -> Result<GcmEnvelope, CryptoError> {
    encrypt_aad_with(SystemRandom::shared(), plaintext, aad, key)
}

/// [`encrypt_aad`] with the nonce drawn from `source`.
pub fn encrypt_aad_with(
    source: &dyn RandomSource,
    plaintext: &[u8],
    aad: &[u8],
    key: &GcmKey,
) -> Result<GcmEnvelope, CryptoError> {
    ensure_aes_key_len(key.len())?;
    let nonce = KeyMaterial::new(source).nonce()?;
    let ciphertext = seal(&nonce, plaintext, aad, key)?;
    debug!(
        key_bits = key.bits(),
        plaintext_len = plaintext.len(),
        aad_len = aad.len(),
        "gcm encrypt"
    );
    Ok(Envelope::from_parts(nonce, ciphertext))
}

/// Verify and decrypt a GCM envelope.
///
/// # Errors
///
/// Returns [`CryptoError::AuthenticationFailure`] if the tag does not verify
/// (tampering, wrong key, wrong nonce, truncated input) and
/// [`CryptoError::InvalidKeyLength`] for unsupported key sizes.
pub fn decrypt(envelope: GcmEnvelope, key: &GcmKey) -> Result<Vec<u8>, CryptoError> {
    decrypt_aad(envelope, &[], key)
}

/// [`decrypt`] for envelopes sealed with [`encrypt_aad`].
pub fn decrypt_aad(envelope: GcmEnvelope, aad: &[u8], key: &GcmKey) -> Result<Vec<u8>, CryptoError> {
    let (nonce, ciphertext) = envelope.into_parts();
    let payload = Payload {
        msg: &ciphertext,
        aad,
    };
    let k = key.as_bytes();
    let result = match k.len() {
        16 => open_with::<Aes128Gcm>(k, &nonce, payload),
        24 => open_with::<Aes192Gcm>(k, &nonce, payload),
        32 => open_with::<Aes256Gcm>(k, &nonce, payload),
        _ => return Err(CryptoError::InvalidKeyLength { bits: key.bits() }),
    };
    if result.is_err() {
        warn!(ciphertext_len = ciphertext.len(), "gcm authentication failed");
    }
    result
}

pub(crate) fn seal(
    nonce: &Nonce,
    plaintext: &[u8],
    aad: &[u8],
    key: &GcmKey,
) -> Result<Vec<u8>, CryptoError> {
    let payload = Payload {
        msg: plaintext,
        aad,
    };
    let k = key.as_bytes();
    match k.len() {
        16 => seal_with::<Aes128Gcm>(k, nonce, payload),
        24 => seal_with::<Aes192Gcm>(k, nonce, payload),
        32 => seal_with::<Aes256Gcm>(k, nonce, payload),
        _ => Err(CryptoError::InvalidKeyLength { bits: key.bits() }),
    }
}

fn seal_with<C>(key: &[u8], nonce: &Nonce, payload: Payload<'_, '_>) -> Result<Vec<u8>, CryptoError>
where
    C: Aead + AeadCore<NonceSize = U12> + KeyInit,
{
    let cipher = C::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
        bits: key.len() * 8,
    })?;
    cipher
        .encrypt(&GenericArray::from(nonce.to_bytes()), payload)
        .map_err(|_| CryptoError::MessageTooLong)
}

fn open_with<C>(key: &[u8], nonce: &Nonce, payload: Payload<'_, '_>) -> Result<Vec<u8>, CryptoError>
where
    C: Aead + AeadCore<NonceSize = U12> + KeyInit,
{
    let cipher = C::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
        bits: key.len() * 8,
    })?;
    cipher
        .decrypt(&GenericArray::from(nonce.to_bytes()), payload)
        .map_err(|_| CryptoError::AuthenticationFailure)
}
