//! src/crypto/kdf.rs
//!
//! PBKDF2 key derivation with a selectable HMAC pseudo-random family.
//!
//! Derivation is deterministic: identical (password, salt, key length,
//! rounds, PRF) inputs always produce the identical key — decrypt depends on
//! reconstructing the exact key the encrypt side derived.

use std::time::Instant;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::consts::SALT_SIZE;
use crate::error::CryptoniteError;

/// HMAC hash family driving PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prf {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl Default for Prf {
    fn default() -> Self {
        Prf::Sha512
    }
}

/// Derive a symmetric key of `key_len` bytes from a password and salt.
///
/// Calls the PBKDF2 primitive exactly once. The returned buffer zeroes
/// itself on drop.
pub fn derive_key(
    password: &str,
    salt: &[u8],
    key_len: usize,
    rounds: u32,
    prf: Prf,
) -> Result<Zeroizing<Vec<u8>>, CryptoniteError> {
    if rounds == 0 {
        return Err(CryptoniteError::Crypto(
            "PBKDF2 rounds must be ≥1".to_string(),
        ));
    }
    if key_len == 0 {
        return Err(CryptoniteError::Crypto(
            "derived key length must be nonzero".to_string(),
        ));
    }

    let mut key = Zeroizing::new(vec![0u8; key_len]);
    let pw = password.as_bytes();
    match prf {
        Prf::Sha1 => pbkdf2::<Hmac<Sha1>>(pw, salt, rounds, &mut key),
        Prf::Sha224 => pbkdf2::<Hmac<Sha224>>(pw, salt, rounds, &mut key),
        Prf::Sha256 => pbkdf2::<Hmac<Sha256>>(pw, salt, rounds, &mut key),
        Prf::Sha384 => pbkdf2::<Hmac<Sha384>>(pw, salt, rounds, &mut key),
        Prf::Sha512 => pbkdf2::<Hmac<Sha512>>(pw, salt, rounds, &mut key),
    }
    .map_err(|e| CryptoniteError::Crypto(format!("PBKDF2 failed: {e}")))?;

    Ok(key)
}

/// Round count used to probe derivation speed during [`calibrate`].
const PROBE_ROUNDS: u32 = 10_000;

/// Estimate the round count that makes one derivation cost roughly
/// `target_ms` of wall-clock time on this machine.
///
/// Tuning helper only — the result is never stored in the envelope, and
/// both sides of a container must still agree on a fixed round count.
pub fn calibrate(prf: Prf, key_len: usize, target_ms: u32) -> Result<u32, CryptoniteError> {
    let salt = [0u8; SALT_SIZE];
    let start = Instant::now();
    derive_key("calibration probe", &salt, key_len, PROBE_ROUNDS, prf)?;
    // Floor at 1µs so a fast machine cannot divide by zero.
    let elapsed_ms = (start.elapsed().as_secs_f64() * 1_000.0).max(0.001);

    let rounds = (f64::from(PROBE_ROUNDS) * f64::from(target_ms) / elapsed_ms).round();
    Ok(rounds.clamp(1.0, f64::from(u32::MAX)) as u32)
}
