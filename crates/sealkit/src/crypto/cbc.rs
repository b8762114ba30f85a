//! AES-CBC encryption with PKCS#7 padding.
//!
//! **CBC has no integrity.** A caller MUST verify the HMAC over
//! `iv || ciphertext` (see [`super::mac::verify_envelope`]) before calling
//! [`decrypt`]; otherwise padding failures become an oracle. The core does not
//! enforce that ordering in [`decrypt`]; [`decrypt_verified`] does.

use ::cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use sealkit_common::CryptoError;
use tracing::{debug, warn};

use super::{ensure_aes_key_len, mac};
use crate::envelope::{CbcEnvelope, Envelope};
use crate::keys::{CbcKey, Iv, KeyMaterial, MacKey, MessageVector};
use crate::random::{RandomSource, SystemRandom};

/// Encrypt `plaintext` under a fresh random IV.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] unless the key is 128, 192 or
/// 256 bits, and [`CryptoError::EntropyUnavailable`] if no IV can be drawn.
pub fn encrypt(plaintext: &[u8], key: &CbcKey) -> Result<CbcEnvelope, CryptoError> {
    encrypt_with(SystemRandom::shared(), plaintext, key)
}

/// [`encrypt`] with the IV drawn from `source`.
pub fn encrypt_with(
    source: &dyn RandomSource,
    plaintext: &[u8],
    key: &CbcKey,
) -> Result<CbcEnvelope, CryptoError> {
    ensure_aes_key_len(key.len())?;
    let iv = KeyMaterial::new(source).iv()?;
    let ciphertext = encrypt_with_iv(&iv, plaintext, key)?;
    debug!(
        key_bits = key.bits(),
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "cbc encrypt"
    );
    Ok(Envelope::from_parts(iv, ciphertext))
}

pub(crate) fn encrypt_with_iv(
    iv: &Iv,
    plaintext: &[u8],
    key: &CbcKey,
) -> Result<Vec<u8>, CryptoError> {
    let k = key.as_bytes();
    let iv = iv.as_bytes();
    let invalid = || CryptoError::InvalidKeyLength { bits: key.bits() };
    let ciphertext = match k.len() {
        16 => ::cbc::Encryptor::<Aes128>::new_from_slices(k, iv)
            .map_err(|_| invalid())?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => ::cbc::Encryptor::<Aes192>::new_from_slices(k, iv)
            .map_err(|_| invalid())?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        32 => ::cbc::Encryptor::<Aes256>::new_from_slices(k, iv)
            .map_err(|_| invalid())?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        _ => return Err(invalid()),
    };
    Ok(ciphertext)
}

/// Decrypt a CBC envelope and strip its padding.
///
/// **Precondition:** the envelope's HMAC has already been checked with
/// [`super::mac::verify_envelope`]. Use [`decrypt_verified`] to do both.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] for unsupported key sizes and
/// [`CryptoError::PaddingError`] if the ciphertext is not block aligned or
/// the recovered padding is malformed. Report the latter to untrusted parties
/// only through [`CryptoError::public_message`].
pub fn decrypt(envelope: CbcEnvelope, key: &CbcKey) -> Result<Vec<u8>, CryptoError> {
    let (iv, ciphertext) = envelope.into_parts();
    let k = key.as_bytes();
    let iv = iv.as_bytes();
    let invalid = || CryptoError::InvalidKeyLength { bits: key.bits() };
    let plaintext = match k.len() {
        16 => ::cbc::Decryptor::<Aes128>::new_from_slices(k, iv)
            .map_err(|_| invalid())?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext),
        24 => ::cbc::Decryptor::<Aes192>::new_from_slices(k, iv)
            .map_err(|_| invalid())?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext),
        32 => ::cbc::Decryptor::<Aes256>::new_from_slices(k, iv)
            .map_err(|_| invalid())?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext),
        _ => return Err(invalid()),
    };
    plaintext.map_err(|_| {
        debug!(ciphertext_len = ciphertext.len(), "cbc padding rejected");
        CryptoError::PaddingError
    })
}

/// Verify `tag` over the envelope, then decrypt.
///
/// The cipher is never touched when the tag does not match.
///
/// # Errors
///
/// Returns [`CryptoError::AuthenticationFailure`] on a tag mismatch, otherwise
/// whatever [`decrypt`] returns.
pub fn decrypt_verified(
    envelope: CbcEnvelope,
    tag: &[u8],
    key: &CbcKey,
    mac_key: &MacKey,
) -> Result<Vec<u8>, CryptoError> {
    if !mac::verify_envelope(&envelope, mac_key, tag) {
        warn!("cbc envelope failed MAC verification");
        return Err(CryptoError::AuthenticationFailure);
    }
    decrypt(envelope, key)
}
