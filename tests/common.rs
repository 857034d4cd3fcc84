//! tests/common.rs
//! Shared constants and helpers for the integration tests.

/// Fast KDF round count — derivation speed is a bench concern, not a test one.
pub const TEST_ROUNDS: u32 = 5;

/// Standard password used across test files.
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "Hello";

/// Deterministic non-repeating byte pattern of the given length.
#[allow(dead_code)]
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
