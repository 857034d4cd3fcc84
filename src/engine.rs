//! # Cipher Engine
//!
//! Incremental block-cipher driver: `new → update* → finalize`, with
//! `reset` restoring a finished engine for another independent stream.
//!
//! The engine owns the chaining state and the partial-block carry buffer.
//! On decrypt with PKCS#7 padding it additionally holds back the most
//! recent complete block until `finalize`, because only then is it known
//! whether that block is the padding block. Chaining is driven by hand over
//! the raw block primitive so that all modes share one buffering path.

use std::fmt;

use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use zeroize::Zeroize;

use crate::algorithm::Algorithm;
use crate::consts::MAX_BLOCK_SIZE;
use crate::error::CryptoniteError;
use crate::options::{BlockMode, CipherOptions, Padding};

/// Direction of the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

/// Resolved block-cipher primitive, one variant per [`Algorithm`].
enum Primitive {
    Aes128(aes::Aes128),
    Aes192(aes::Aes192),
    Aes256(aes::Aes256),
    Des(des::Des),
    TripleDes(des::TdesEde3),
    // Boxed: the key schedule holds the full S-box tables (~4 KiB).
    Blowfish(Box<blowfish::Blowfish>),
}

impl Primitive {
    fn new(algorithm: Algorithm, key: &[u8]) -> Result<Self, CryptoniteError> {
        let invalid =
            |_| CryptoniteError::InvalidSize("key length rejected by cipher primitive".to_string());
        Ok(match algorithm {
            Algorithm::Aes128 => Primitive::Aes128(aes::Aes128::new_from_slice(key).map_err(invalid)?),
            Algorithm::Aes192 => Primitive::Aes192(aes::Aes192::new_from_slice(key).map_err(invalid)?),
            Algorithm::Aes256 => Primitive::Aes256(aes::Aes256::new_from_slice(key).map_err(invalid)?),
            Algorithm::Des => Primitive::Des(des::Des::new_from_slice(key).map_err(invalid)?),
            Algorithm::TripleDes => {
                Primitive::TripleDes(des::TdesEde3::new_from_slice(key).map_err(invalid)?)
            }
            Algorithm::Blowfish { .. } => Primitive::Blowfish(Box::new(
                blowfish::Blowfish::new_from_slice(key).map_err(invalid)?,
            )),
        })
    }

    /// Encrypt one block in place. `block` must be exactly the block size.
    fn encrypt_block(&self, block: &mut [u8]) {
        match self {
            Primitive::Aes128(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::Aes192(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::Aes256(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::Des(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::TripleDes(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::Blowfish(c) => c.encrypt_block(GenericArray::from_mut_slice(block)),
        }
    }

    /// Decrypt one block in place. `block` must be exactly the block size.
    fn decrypt_block(&self, block: &mut [u8]) {
        match self {
            Primitive::Aes128(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::Aes192(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::Aes256(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::Des(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::TripleDes(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
            Primitive::Blowfish(c) => c.decrypt_block(GenericArray::from_mut_slice(block)),
        }
    }
}

/// Incremental cipher transform over one stream.
///
/// State machine: construction validates sizes and lands in `Active`;
/// `finalize` moves to `Finalized`; after that only [`Self::reset`] is
/// legal. One instance serves exactly one stream at a time.
pub struct CipherEngine {
    operation: Operation,
    algorithm: Algorithm,
    padding: Padding,
    ecb: bool,
    primitive: Primitive,
    block_size: usize,
    /// CBC chaining value: IV, then the previous ciphertext block.
    chain: [u8; MAX_BLOCK_SIZE],
    /// Partial input block awaiting completion.
    carry: [u8; MAX_BLOCK_SIZE],
    carry_len: usize,
    /// Complete block withheld on decrypt+PKCS#7 until finality is known.
    held: [u8; MAX_BLOCK_SIZE],
    held_full: bool,
    finalized: bool,
}

impl CipherEngine {
    /// Build an engine for one stream.
    ///
    /// Fails with [`CryptoniteError::InvalidSize`] if the key length is
    /// outside the algorithm's accepted range, or if a CBC IV does not
    /// equal the block size. An absent CBC IV defaults to all-zero.
    pub fn new(
        operation: Operation,
        algorithm: Algorithm,
        options: CipherOptions,
        key: &[u8],
    ) -> Result<Self, CryptoniteError> {
        algorithm.validate_key(key)?;

        let mut chain = [0u8; MAX_BLOCK_SIZE];
        let ecb = match &options.block_mode {
            BlockMode::Ecb => true,
            BlockMode::Cbc { iv: None } => false,
            BlockMode::Cbc { iv: Some(iv) } => {
                algorithm.validate_iv(iv)?;
                chain[..iv.len()].copy_from_slice(iv);
                false
            }
        };

        let primitive = Primitive::new(algorithm, key)?;
        Ok(Self {
            operation,
            algorithm,
            padding: options.padding,
            ecb,
            primitive,
            block_size: algorithm.block_size(),
            chain,
            carry: [0u8; MAX_BLOCK_SIZE],
            carry_len: 0,
            held: [0u8; MAX_BLOCK_SIZE],
            held_full: false,
            finalized: false,
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Upper bound on the output of a single call feeding `input_len` bytes,
    /// given whether that call is `finalize`. Block-size slack covers the
    /// padding block.
    pub fn output_len(&self, input_len: usize, is_final: bool) -> usize {
        let held = if self.held_full { self.block_size } else { 0 };
        let total = held + self.carry_len + input_len;
        if is_final {
            total + self.block_size
        } else {
            total - total % self.block_size
        }
    }

    /// Feed a chunk through the transform, returning the bytes that became
    /// available. May return empty output while the engine is buffering.
    pub fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptoniteError> {
        self.ensure_active()?;
        let mut out = Vec::with_capacity(self.output_len(input.len(), false));
        let block_size = self.block_size;

        let mut rest = input;
        while !rest.is_empty() {
            if self.carry_len == block_size {
                self.flush_carry(&mut out);
            }
            let take = (block_size - self.carry_len).min(rest.len());
            self.carry[self.carry_len..self.carry_len + take].copy_from_slice(&rest[..take]);
            self.carry_len += take;
            rest = &rest[take..];
        }
        Ok(out)
    }

    /// Finish the stream: emit the padding block on encrypt, or validate
    /// and strip padding on decrypt. The engine moves to `Finalized`.
    pub fn finalize(&mut self) -> Result<Vec<u8>, CryptoniteError> {
        self.ensure_active()?;
        self.finalized = true;
        let block_size = self.block_size;
        let mut out = Vec::with_capacity(self.output_len(0, true));

        if self.carry_len == block_size {
            self.flush_carry(&mut out);
        }

        match (self.operation, self.padding) {
            (Operation::Encrypt, Padding::Pkcs7) => {
                // Always emits a block: a full final block pads to a whole
                // extra block of `block_size` bytes.
                let pad = (block_size - self.carry_len) as u8;
                for slot in &mut self.carry[self.carry_len..block_size] {
                    *slot = pad;
                }
                self.carry_len = block_size;
                let mut block = [0u8; MAX_BLOCK_SIZE];
                block[..block_size].copy_from_slice(&self.carry[..block_size]);
                self.transform_block(&mut block[..block_size]);
                out.extend_from_slice(&block[..block_size]);
                self.carry_len = 0;
            }
            (Operation::Decrypt, Padding::Pkcs7) => {
                if self.carry_len != 0 {
                    return Err(CryptoniteError::Crypto(
                        "input size was not aligned properly".to_string(),
                    ));
                }
                if !self.held_full {
                    return Err(CryptoniteError::Crypto(
                        "input data did not decode or decrypt properly".to_string(),
                    ));
                }
                let mut block = [0u8; MAX_BLOCK_SIZE];
                block[..block_size].copy_from_slice(&self.held[..block_size]);
                self.held_full = false;
                self.transform_block(&mut block[..block_size]);

                let pad = block[block_size - 1] as usize;
                let valid = pad >= 1
                    && pad <= block_size
                    && block[block_size - pad..block_size].iter().all(|&b| b == pad as u8);
                if !valid {
                    return Err(CryptoniteError::Crypto(
                        "input data did not decode or decrypt properly".to_string(),
                    ));
                }
                out.extend_from_slice(&block[..block_size - pad]);
            }
            (_, Padding::None) => {
                if self.carry_len != 0 {
                    return Err(CryptoniteError::Crypto(
                        "input size was not aligned properly".to_string(),
                    ));
                }
            }
        }
        Ok(out)
    }

    /// Return a finished (or mid-stream) engine to `Active` with a fresh IV
    /// and zeroed internal buffers, without re-deriving the key schedule.
    ///
    /// `None` resets the chaining value to all-zero.
    pub fn reset(&mut self, iv: Option<&[u8]>) -> Result<(), CryptoniteError> {
        self.chain.zeroize();
        if let Some(iv) = iv {
            self.algorithm.validate_iv(iv)?;
            self.chain[..iv.len()].copy_from_slice(iv);
        }
        self.carry.zeroize();
        self.carry_len = 0;
        self.held.zeroize();
        self.held_full = false;
        self.finalized = false;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), CryptoniteError> {
        if self.finalized {
            return Err(CryptoniteError::Crypto(
                "cipher engine already finalized; call reset to reuse it".to_string(),
            ));
        }
        Ok(())
    }

    /// Move the full carry block onward: straight through the transform, or
    /// into the held slot (displacing its occupant) when decrypt+PKCS#7
    /// must withhold the potential padding block.
    fn flush_carry(&mut self, out: &mut Vec<u8>) {
        debug_assert_eq!(self.carry_len, self.block_size);
        let block_size = self.block_size;

        if self.operation == Operation::Decrypt && self.padding == Padding::Pkcs7 {
            if self.held_full {
                let mut block = [0u8; MAX_BLOCK_SIZE];
                block[..block_size].copy_from_slice(&self.held[..block_size]);
                self.transform_block(&mut block[..block_size]);
                out.extend_from_slice(&block[..block_size]);
            }
            self.held[..block_size].copy_from_slice(&self.carry[..block_size]);
            self.held_full = true;
        } else {
            let mut block = [0u8; MAX_BLOCK_SIZE];
            block[..block_size].copy_from_slice(&self.carry[..block_size]);
            self.transform_block(&mut block[..block_size]);
            out.extend_from_slice(&block[..block_size]);
        }
        self.carry_len = 0;
    }

    /// Apply the mode-aware transform to one exact block in place.
    fn transform_block(&mut self, block: &mut [u8]) {
        let block_size = self.block_size;
        match (self.operation, self.ecb) {
            (Operation::Encrypt, true) => self.primitive.encrypt_block(block),
            (Operation::Decrypt, true) => self.primitive.decrypt_block(block),
            (Operation::Encrypt, false) => {
                xor_in_place(block, &self.chain[..block_size]);
                self.primitive.encrypt_block(block);
                self.chain[..block_size].copy_from_slice(block);
            }
            (Operation::Decrypt, false) => {
                let mut ciphertext = [0u8; MAX_BLOCK_SIZE];
                ciphertext[..block_size].copy_from_slice(block);
                self.primitive.decrypt_block(block);
                xor_in_place(block, &self.chain[..block_size]);
                self.chain[..block_size].copy_from_slice(&ciphertext[..block_size]);
            }
        }
    }
}

// Manual impl: chain/carry/held hold key-adjacent bytes and must never
// leak through debug formatting.
impl fmt::Debug for CipherEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherEngine")
            .field("operation", &self.operation)
            .field("algorithm", &self.algorithm)
            .field("padding", &self.padding)
            .field("ecb", &self.ecb)
            .field("block_size", &self.block_size)
            .field("carry_len", &self.carry_len)
            .field("held_full", &self.held_full)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

impl Drop for CipherEngine {
    fn drop(&mut self) {
        // chain/carry/held may hold plaintext or key-adjacent material.
        self.chain.zeroize();
        self.carry.zeroize();
        self.held.zeroize();
    }
}

/// One-shot encrypt over an in-memory buffer.
pub fn encrypt_once(
    algorithm: Algorithm,
    options: CipherOptions,
    key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, CryptoniteError> {
    crypt_once(Operation::Encrypt, algorithm, options, key, data)
}

/// One-shot decrypt over an in-memory buffer.
pub fn decrypt_once(
    algorithm: Algorithm,
    options: CipherOptions,
    key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, CryptoniteError> {
    crypt_once(Operation::Decrypt, algorithm, options, key, data)
}

fn crypt_once(
    operation: Operation,
    algorithm: Algorithm,
    options: CipherOptions,
    key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, CryptoniteError> {
    let mut engine = CipherEngine::new(operation, algorithm, options, key)?;
    let mut out = engine.update(data)?;
    out.extend(engine.finalize()?);
    Ok(out)
}

#[inline]
fn xor_in_place(dst: &mut [u8], other: &[u8]) {
    for (d, o) in dst.iter_mut().zip(other) {
        *d ^= *o;
    }
}
