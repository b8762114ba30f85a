//! Cryptographically secure byte generation.
//!
//! Every IV, nonce and generated key in this crate comes from a
//! [`RandomSource`]. Production code uses [`SystemRandom`], which reads the OS
//! CSPRNG. Tests may inject [`DeterministicRandom`] or a mock.

use std::sync::Mutex;

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use sealkit_common::CryptoError;
use tracing::error;

/// A source of cryptographically unpredictable bytes.
///
/// Implementations must be safe to share between threads and must never hand
/// the same output to two concurrent callers.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EntropyUnavailable`] if no entropy can be
    /// obtained. This is fatal: callers must not retry or fall back.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// Return `n` fresh bytes from `source`.
pub fn next_bytes(source: &dyn RandomSource, n: usize) -> Result<Vec<u8>, CryptoError> {
    let mut buf = vec![0u8; n];
    source.fill(&mut buf)?;
    Ok(buf)
}

/// The process-wide random source.
static SYSTEM: SystemRandom = SystemRandom;

/// OS-backed CSPRNG (`getrandom` under the hood).
///
/// Stateless on our side; the kernel owns and serialises the entropy pool,
/// which is initialised lazily on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl SystemRandom {
    /// Shared handle to the process-wide source.
    pub fn shared() -> &'static SystemRandom {
        &SYSTEM
    }
}

impl RandomSource for SystemRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            error!(error = %e, "OS random source failed");
            CryptoError::EntropyUnavailable(e.to_string())
        })
    }
}

/// Seeded, reproducible source for tests.
///
/// **Never use this for real keys.** Its whole output is determined by a
/// 64-bit seed.
#[derive(Debug)]
pub struct DeterministicRandom {
    rng: Mutex<StdRng>,
}

impl DeterministicRandom {
    /// Create a source whose output stream is fixed by `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for DeterministicRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| CryptoError::EntropyUnavailable("deterministic source poisoned".into()))?;
        rng.fill_bytes(dest);
        Ok(())
    }
}
