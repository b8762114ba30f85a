//! Transport record for sealed data.
//!
//! The core never frames envelopes on its own. [`SealedMessage`] is offered to
//! the storage or transport layer as a ready-made JSON shape:
//!
//! ```text
//! {"version":1,"scheme":"aes-gcm","vector":"<base64>","ciphertext":"<base64>"}
//! ```
//!
//! CBC records additionally carry the HMAC-SHA256 `tag`.

use serde::{Deserialize, Serialize};

/// Current record version. Decoders reject anything else.
pub const MESSAGE_VERSION: u8 = 1;

/// Which construction produced a [`SealedMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheme {
    /// AES-CBC with PKCS#7 padding, integrity from a separate HMAC-SHA256 tag.
    #[serde(rename = "aes-cbc-hmac-sha256")]
    AesCbcHmacSha256,
    /// AES-GCM with the 128-bit tag appended to the ciphertext.
    #[serde(rename = "aes-gcm")]
    AesGcm,
}

/// Serialisable form of an envelope and, for CBC, its MAC tag.
///
/// Binary fields are standard padded base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedMessage {
    /// Record version, see [`MESSAGE_VERSION`].
    pub version: u8,
    /// Construction used to seal the payload.
    pub scheme: Scheme,
    /// IV (CBC) or nonce (GCM).
    pub vector: String,
    /// Ciphertext; for GCM this includes the trailing tag.
    pub ciphertext: String,
    /// HMAC-SHA256 tag over `vector || ciphertext` (CBC only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl SealedMessage {
    /// Serialise to a compact JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a JSON string produced by [`SealedMessage::to_json`].
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
