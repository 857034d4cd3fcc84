//! Low-level crypto primitives (KDF, RNG).
//!
//! Sub-modules for primitives; see crate root for re-exports
//! (e.g., `derive_key`, `calibrate`).

pub mod kdf;
pub mod rng;
