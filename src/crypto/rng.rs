// src/crypto/rng.rs
//! Cryptographically secure random bytes for salts and IVs.
//!
//! Thin wrapper over the OS entropy source. Unlike most `rand` call sites we
//! surface the fallible API: an unavailable OS source is a reportable error,
//! not a panic.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::CryptoniteError;

/// Fill a freshly allocated buffer of `count` bytes from the OS source.
pub fn generate(count: usize) -> Result<Vec<u8>, CryptoniteError> {
    let mut bytes = vec![0u8; count];
    fill(&mut bytes)?;
    Ok(bytes)
}

/// Generate a fixed-size random array (salts, fixed-width IVs).
pub fn generate_array<const N: usize>() -> Result<[u8; N], CryptoniteError> {
    let mut bytes = [0u8; N];
    fill(&mut bytes)?;
    Ok(bytes)
}

#[inline]
fn fill(dest: &mut [u8]) -> Result<(), CryptoniteError> {
    OsRng
        .try_fill_bytes(dest)
        .map_err(|e| CryptoniteError::Crypto(format!("OS random source unavailable: {e}")))
}
