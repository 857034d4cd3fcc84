//! src/decryptor.rs
//! Stream-level decryption facade — the exact mirror of `encryptor`.

use std::io::{Read, Write};

use crate::algorithm::Algorithm;
use crate::consts::{DEFAULT_CHUNK_SIZE, SALT_SIZE};
use crate::crypto::kdf;
use crate::engine::{CipherEngine, Operation};
use crate::envelope;
use crate::error::CryptoniteError;
use crate::options::CipherOptions;
use crate::stream;

/// Decrypt one container stream back into its plaintext stream.
///
/// Parses the envelope header first: a non-zero sentinel fails with
/// [`CryptoniteError::InvalidPassword`] before any bulk work. The caller
/// must have stripped a trailing hint record beforehand — ciphertext
/// length is not stored, so the transform reads until EOF.
pub fn decrypt<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    password: &str,
    algorithm: Algorithm,
    rounds: u32,
) -> Result<(), CryptoniteError> {
    let (salt, iv) = envelope::read_header(input, SALT_SIZE, algorithm.block_size())?;

    let key = kdf::derive_key(
        password,
        &salt,
        algorithm.key_size(),
        rounds,
        kdf::Prf::default(),
    )?;
    let mut engine = CipherEngine::new(
        Operation::Decrypt,
        algorithm,
        CipherOptions::cbc(iv),
        &key,
    )?;

    stream::transform(&mut engine, input, output, DEFAULT_CHUNK_SIZE)
}
