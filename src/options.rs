//! # Cipher Options
//!
//! Block mode and padding selection for a single engine instance.

/// Chaining mode for the block transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockMode {
    /// Cipher block chaining. An absent IV is treated as all-zero
    /// internally; it is never written into the envelope implicitly.
    Cbc { iv: Option<Vec<u8>> },
    /// Electronic codebook — no chaining, no IV.
    Ecb,
}

/// Padding scheme applied at `finalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    Pkcs7,
    None,
}

/// Per-engine cipher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherOptions {
    pub block_mode: BlockMode,
    pub padding: Padding,
}

impl CipherOptions {
    pub fn new(block_mode: BlockMode, padding: Padding) -> Self {
        Self {
            block_mode,
            padding,
        }
    }

    /// CBC with the given IV and PKCS#7 padding — the envelope default.
    pub fn cbc(iv: impl Into<Vec<u8>>) -> Self {
        Self::new(
            BlockMode::Cbc {
                iv: Some(iv.into()),
            },
            Padding::Pkcs7,
        )
    }

    /// ECB with PKCS#7 padding.
    pub fn ecb() -> Self {
        Self::new(BlockMode::Ecb, Padding::Pkcs7)
    }

    /// The configured IV, if the mode carries one.
    pub fn iv(&self) -> Option<&[u8]> {
        match &self.block_mode {
            BlockMode::Cbc { iv } => iv.as_deref(),
            BlockMode::Ecb => None,
        }
    }
}
