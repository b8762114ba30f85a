//! [`Envelope`]: ciphertext bound to the IV or nonce that produced it.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sealkit_common::{CryptoError, SealedMessage, MESSAGE_VERSION};

use crate::crypto::mac::MacTag;
use crate::keys::{Iv, MessageVector, Nonce};

/// Output of an encrypt call and sole input of the matching decrypt call.
///
/// Immutable once built. Decrypt operations take it by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<V> {
    vector: V,
    ciphertext: Vec<u8>,
}

/// Envelope produced by [`crate::crypto::cbc`].
pub type CbcEnvelope = Envelope<Iv>;

/// Envelope produced by [`crate::crypto::gcm`]; the GCM tag trails the ciphertext.
pub type GcmEnvelope = Envelope<Nonce>;

impl<V: MessageVector> Envelope<V> {
    /// Rebuild an envelope from parts received over a transport.
    pub fn from_parts(vector: V, ciphertext: Vec<u8>) -> Self {
        Self { vector, ciphertext }
    }

    pub fn vector(&self) -> &V {
        &self.vector
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn into_parts(self) -> (V, Vec<u8>) {
        (self.vector, self.ciphertext)
    }

    /// Encoded form `vector || ciphertext`. This is the input to the CBC MAC.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(V::LEN + self.ciphertext.len());
        out.extend_from_slice(self.vector.as_bytes());
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split `vector || ciphertext` back into an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidFormat`] if `bytes` is shorter than the vector.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < V::LEN {
            return Err(CryptoError::InvalidFormat);
        }
        let (vector, ciphertext) = bytes.split_at(V::LEN);
        Ok(Self {
            vector: V::from_slice(vector)?,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Build the transport record, attaching `tag` if given.
    pub fn to_message(&self, tag: Option<&MacTag>) -> SealedMessage {
        SealedMessage {
            version: MESSAGE_VERSION,
            scheme: V::SCHEME,
            vector: STANDARD.encode(self.vector.as_bytes()),
            ciphertext: STANDARD.encode(&self.ciphertext),
            tag: tag.map(|t| STANDARD.encode(t.as_bytes())),
        }
    }

    /// Decode a transport record into an envelope and its optional tag.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidFormat`] for an unknown version, a
    /// record sealed with the other scheme, bad base64, or wrong lengths.
    pub fn from_message(msg: &SealedMessage) -> Result<(Self, Option<MacTag>), CryptoError> {
        if msg.version != MESSAGE_VERSION || msg.scheme != V::SCHEME {
            return Err(CryptoError::InvalidFormat);
        }
        let vector = V::from_slice(&decode(&msg.vector)?)?;
        let ciphertext = decode(&msg.ciphertext)?;
        let tag = msg
            .tag
            .as_deref()
            .map(|t| decode(t).and_then(|bytes| MacTag::from_slice(&bytes)))
            .transpose()?;
        Ok((Self { vector, ciphertext }, tag))
    }
}

impl Envelope<Iv> {
    pub fn iv(&self) -> &Iv {
        &self.vector
    }
}

impl Envelope<Nonce> {
    pub fn nonce(&self) -> &Nonce {
        &self.vector
    }
}

fn decode(s: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD.decode(s).map_err(|_| CryptoError::InvalidFormat)
}
