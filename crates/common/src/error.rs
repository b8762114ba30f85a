//! Error taxonomy shared by every `sealkit` operation.

use thiserror::Error;

/// Generic text handed to callers for any rejected message.
///
/// Padding, authentication and framing failures all collapse to this string
/// so that no reporting layer can act as a padding or MAC oracle.
pub const REJECTION_MESSAGE: &str = "message rejected";

/// Errors produced by the cryptographic core.
///
/// The variants are distinct for diagnostics. Anything surfaced to an
/// untrusted party should go through [`CryptoError::public_message`].
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The key length is not supported by the cipher (AES takes 128, 192 or 256 bits).
    #[error("invalid key length: {bits} bits is not supported by the cipher")]
    InvalidKeyLength { bits: usize },

    /// Key generation was asked for a size that is not a positive multiple of 8 bits.
    #[error("invalid key size: {bits} bits is not a positive multiple of 8")]
    InvalidKeySize { bits: usize },

    /// CBC decryption produced malformed padding, or the ciphertext is not block aligned.
    #[error("invalid padding")]
    PaddingError,

    /// An authentication tag did not match (GCM tag, or MAC checked by a fused entry point).
    #[error("authentication failed")]
    AuthenticationFailure,

    /// The random source could not produce output. Callers must treat this as fatal.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// The plaintext exceeds what the cipher can encrypt under one nonce.
    #[error("message too long for the cipher")]
    MessageTooLong,

    /// Framed bytes or a sealed message could not be decoded.
    #[error("invalid message format")]
    InvalidFormat,
}

impl CryptoError {
    /// Returns `true` for failures caused by the message itself rather than
    /// by the caller's parameters or the environment.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CryptoError::PaddingError
                | CryptoError::AuthenticationFailure
                | CryptoError::InvalidFormat
        )
    }

    /// Text that is safe to show to whoever supplied the message.
    pub fn public_message(&self) -> String {
        if self.is_rejection() {
            REJECTION_MESSAGE.to_owned()
        } else {
            self.to_string()
        }
    }
}
