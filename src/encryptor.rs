//! src/encryptor.rs
//! Stream-level encryption facade: envelope header + KDF + engine + pump.

use std::io::{Read, Write};

use crate::algorithm::Algorithm;
use crate::consts::{DEFAULT_CHUNK_SIZE, SALT_SIZE};
use crate::crypto::{kdf, rng};
use crate::engine::{CipherEngine, Operation};
use crate::envelope;
use crate::error::CryptoniteError;
use crate::options::CipherOptions;
use crate::stream;

/// Encrypt one plaintext stream into one container stream.
///
/// Generates a fresh 32-byte salt and a block-sized IV from the OS random
/// source, writes the envelope header, derives the key with
/// PBKDF2-HMAC-SHA512 at `rounds`, then streams the plaintext through
/// AES/DES/Blowfish-CBC with PKCS#7 padding in bounded chunks.
///
/// `rounds` is not recorded in the output; decrypt must use the same value.
pub fn encrypt<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    password: &str,
    algorithm: Algorithm,
    rounds: u32,
) -> Result<(), CryptoniteError> {
    let salt: [u8; SALT_SIZE] = rng::generate_array()?;
    let iv = rng::generate(algorithm.block_size())?;

    envelope::write_header(output, &salt, &iv)?;

    let key = kdf::derive_key(
        password,
        &salt,
        algorithm.key_size(),
        rounds,
        kdf::Prf::default(),
    )?;
    let mut engine = CipherEngine::new(
        Operation::Encrypt,
        algorithm,
        CipherOptions::cbc(iv),
        &key,
    )?;

    stream::transform(&mut engine, input, output, DEFAULT_CHUNK_SIZE)
}
