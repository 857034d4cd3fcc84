//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All operations return [`Result<T, CryptoniteError>`](CryptoniteError).

use thiserror::Error;

/// The error type for all container operations.
///
/// The set is deliberately flat: a failure either names the exact contract it
/// violated (`InvalidPassword`, `InvalidSize`, …) or carries the underlying
/// primitive/OS failure as a human-readable message.
#[derive(Error, Debug)]
pub enum CryptoniteError {
    /// The envelope sentinel was not all-zero, or the ciphertext body did
    /// not decode under the derived key.
    ///
    /// There is no MAC: this detects a wrong password with overwhelming
    /// (but not cryptographic) probability.
    #[error("invalid password")]
    InvalidPassword,

    /// Wrong container extension, or wrong source count for the operation.
    #[error("invalid file format: {0}")]
    InvalidFileFormat(String),

    /// A read on the underlying input stream failed.
    #[error("stream can't read file: {0}")]
    UnreadableStream(#[source] std::io::Error),

    /// A write on the underlying output stream failed.
    #[error("stream can't write file: {0}")]
    UnwritableStream(#[source] std::io::Error),

    /// Key or IV length outside the algorithm's accepted range.
    #[error("invalid size: {0}")]
    InvalidSize(String),

    /// Malformed textual data (e.g. a hint record that is not valid UTF-8).
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Failure reported by a cryptographic primitive (KDF, cipher, RNG),
    /// or an illegal engine-state transition.
    ///
    /// Padding failures on decrypt land here too — without a MAC they are
    /// indistinguishable from a wrong key and are not given their own kind.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Zip archiving/unarchiving failure during container staging.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Filesystem-management I/O failure (staging, copying, directory setup).
    ///
    /// Stream-level reads and writes map to [`Self::UnreadableStream`] /
    /// [`Self::UnwritableStream`] instead.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<&'static str> for CryptoniteError {
    fn from(msg: &'static str) -> Self {
        CryptoniteError::Crypto(msg.to_string())
    }
}
