//! AES-CBC + HMAC-SHA256 and AES-GCM primitives.
//!
//! This module is free of configuration and logging setup. It provides the
//! low-level operations; [`crate::Toolkit`] composes them.
//!
//! # Ciphertext layouts
//!
//! ```text
//! CBC: iv (16) | AES-CBC(PKCS#7(plaintext))          tag = HMAC-SHA256(iv | ciphertext)
//! GCM: nonce (12) | AES-GCM(plaintext) | tag (16)
//! ```
//!
//! The leading IV or nonce lives in the [`crate::Envelope`], not in the
//! ciphertext bytes.

pub mod cbc;
pub mod gcm;
pub mod mac;

use sealkit_common::CryptoError;

/// Byte length of a CBC IV (one AES block).
pub const IV_LEN: usize = 16;

/// Byte length of a GCM nonce (96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag appended to the ciphertext.
pub const GCM_TAG_LEN: usize = 16;

/// Byte length of an HMAC-SHA256 tag.
pub const MAC_TAG_LEN: usize = 32;

/// Byte lengths accepted as AES keys (128, 192, 256 bits).
pub const AES_KEY_LENS: [usize; 3] = [16, 24, 32];

/// Reject key lengths AES cannot take, before any entropy is spent.
pub(crate) fn ensure_aes_key_len(len: usize) -> Result<(), CryptoError> {
    if AES_KEY_LENS.contains(&len) {
        Ok(())
    } else {
        Err(CryptoError::InvalidKeyLength { bits: len * 8 })
    }
}
