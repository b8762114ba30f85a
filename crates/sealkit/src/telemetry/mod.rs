//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext, IV, nonce or tag bytes** may appear in any
//!   log field. Operations log sizes and key bit-lengths only.
//! - Log level is configurable via [`crate::Settings::log_level`]; `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init_logging;
