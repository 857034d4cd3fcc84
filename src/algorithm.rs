//! # Algorithm Descriptors
//!
//! Closed set of supported block-cipher variants. Each variant carries its
//! semantic parameters (block size, key size or accepted key-size range);
//! the matching primitive is resolved once, when a
//! [`CipherEngine`](crate::engine::CipherEngine) is constructed.

use std::ops::RangeInclusive;

use crate::error::CryptoniteError;

/// A block-cipher variant.
///
/// AES, DES and Triple-DES have fixed key sizes; Blowfish takes a
/// caller-chosen key size validated against its accepted range (8–56 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Aes128,
    Aes192,
    Aes256,
    Des,
    TripleDes,
    Blowfish { key_size: usize },
}

impl Algorithm {
    /// Cipher block size in bytes (also the envelope IV length).
    pub fn block_size(&self) -> usize {
        match self {
            Algorithm::Aes128 | Algorithm::Aes192 | Algorithm::Aes256 => 16,
            Algorithm::Des | Algorithm::TripleDes | Algorithm::Blowfish { .. } => 8,
        }
    }

    /// Key size in bytes the key-derivation step must produce.
    pub fn key_size(&self) -> usize {
        match self {
            Algorithm::Aes128 => 16,
            Algorithm::Aes192 => 24,
            Algorithm::Aes256 => 32,
            Algorithm::Des => 8,
            Algorithm::TripleDes => 24,
            Algorithm::Blowfish { key_size } => *key_size,
        }
    }

    fn valid_key_sizes(&self) -> RangeInclusive<usize> {
        match self {
            // Variable-key algorithm: any declared size in range is accepted.
            Algorithm::Blowfish { .. } => 8..=56,
            _ => self.key_size()..=self.key_size(),
        }
    }

    pub(crate) fn validate_key(&self, key: &[u8]) -> Result<(), CryptoniteError> {
        // The key must match the declared size exactly; for Blowfish the
        // declared size must itself lie in the accepted range.
        if key.len() != self.key_size() || !self.valid_key_sizes().contains(&key.len()) {
            return Err(CryptoniteError::InvalidSize(format!(
                "{} byte key not accepted by {self:?}",
                key.len()
            )));
        }
        Ok(())
    }

    pub(crate) fn validate_iv(&self, iv: &[u8]) -> Result<(), CryptoniteError> {
        if iv.len() != self.block_size() {
            return Err(CryptoniteError::InvalidSize(format!(
                "IV must be {} bytes for {self:?}, got {}",
                self.block_size(),
                iv.len()
            )));
        }
        Ok(())
    }
}
