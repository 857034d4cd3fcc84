//! # Constants
//!
//! Fixed parameters of the container format and the default KDF policy.

/// Length of the all-zero sentinel at the front of every envelope.
///
/// On decrypt these ten bytes must come back as zero; anything else means
/// the password (and therefore the derived key) is wrong.
pub const SENTINEL_SIZE: usize = 10;

/// Length of the random salt stored in the envelope.
pub const SALT_SIZE: usize = 32;

/// Default PBKDF2 round count.
///
/// The round count is NOT stored in the envelope — encrypt and decrypt must
/// agree on it out-of-band, or derivation silently produces the wrong key
/// and the sentinel check fails.
pub const DEFAULT_KDF_ROUNDS: u32 = 10_000;

/// Default chunk size for the streaming transform loop.
pub const DEFAULT_CHUNK_SIZE: usize = 50_000;

/// Largest block size of any supported algorithm (AES).
pub const MAX_BLOCK_SIZE: usize = 16;

/// Extension carried by encrypted container files.
pub const FILE_EXTENSION: &str = "cryptonite";

/// Marker that introduces the optional trailing hint record.
pub const HINT_KEYWORD: &[u8] = b"HINT=";
