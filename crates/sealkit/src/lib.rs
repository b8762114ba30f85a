//! `sealkit`: authenticated encryption without the foot-guns.
//!
//! - [`random`]: the only source of key, IV and nonce bytes.
//! - [`keys`]: purpose-typed keys plus IV and nonce generation.
//! - [`crypto::mac`]: HMAC-SHA256 with constant-time verification.
//! - [`crypto::cbc`]: AES-CBC/PKCS#7; pair it with a MAC.
//! - [`crypto::gcm`]: AES-GCM.
//! - [`Envelope`]: ciphertext plus the IV or nonce that produced it.
//!
//! Typical CBC flow:
//!
//! ```text
//! key, mac_key = generate
//! envelope     = cbc::encrypt(plaintext, key)
//! tag          = mac::tag_envelope(envelope, mac_key)        -- send both
//! ...
//! mac::verify_envelope(envelope, mac_key, tag) or reject    -- constant time
//! plaintext    = cbc::decrypt(envelope, key)
//! ```
//!
//! All operations are synchronous and thread-safe; nothing is retried.

pub mod config;
pub mod crypto;
pub mod envelope;
pub mod keys;
pub mod random;
pub mod telemetry;
pub mod toolkit;

pub use crate::config::Settings;
pub use crypto::mac::{compute_tag, constant_time_eq, verify_tag, MacTag};
pub use envelope::{CbcEnvelope, Envelope, GcmEnvelope};
pub use keys::{
    generate_iv, generate_key, generate_nonce, purpose, CbcKey, GcmKey, Iv, Key, KeyMaterial,
    MacKey, Nonce,
};
pub use random::{DeterministicRandom, RandomSource, SystemRandom};
pub use sealkit_common::{CryptoError, Scheme, SealedMessage};
pub use toolkit::Toolkit;
