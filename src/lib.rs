// src/lib.rs

//! Password-based file encryption with a durable on-disk envelope format.
//!
//! A container is `sentinel | salt | iv | ciphertext`, optionally followed
//! by a `HINT=` record. Keys come from PBKDF2 over the password and the
//! envelope salt; content streams through a block cipher in CBC mode with
//! PKCS#7 padding, in bounded chunks. There is no MAC: the zero sentinel
//! and the padding check are the only (deliberately weak) wrong-password
//! signals, and the format is preserved as such.

pub mod algorithm;
pub mod archive;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod hint;
pub mod options;
pub mod pipeline;
pub mod stream;
pub mod worker;

// High-level API — this is what most users import
pub use error::CryptoniteError;
pub use pipeline::Pipeline;
pub use worker::{Job, Worker};

// Stream-level facades for callers that manage their own files
pub use decryptor::decrypt;
pub use encryptor::encrypt;

// Hint query never decrypts and never mutates the container
pub use hint::hint_for;

// Cipher surface for custom flows
pub use algorithm::Algorithm;
pub use engine::{decrypt_once, encrypt_once, CipherEngine, Operation};
pub use options::{BlockMode, CipherOptions, Padding};

// Low-level KDF — public at the root for callers deriving keys themselves
pub use crypto::kdf::{calibrate, derive_key, Prf};
