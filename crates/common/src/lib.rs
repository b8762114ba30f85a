//! Shared error taxonomy and transport record types for the `sealkit` crates.

pub mod error;
pub mod protocol;

pub use error::CryptoError;
pub use protocol::{Scheme, SealedMessage, MESSAGE_VERSION};
