//! # Stream Transformer
//!
//! Pumps an input stream through a [`CipherEngine`] in bounded chunks.
//! Memory use is one chunk plus one block of cipher output regardless of
//! stream length; containers may be arbitrarily large.

use std::io::{Read, Write};

use crate::engine::CipherEngine;
use crate::error::CryptoniteError;

/// Drive `engine` over `input`, writing transformed bytes to `output`.
///
/// Reads up to `chunk_size` bytes at a time; a zero-byte read means end of
/// stream and triggers `finalize`. Read failures surface as
/// [`CryptoniteError::UnreadableStream`], write failures as
/// [`CryptoniteError::UnwritableStream`]. Streams are dropped (closed) on
/// every exit path by scope.
pub fn transform<R: Read, W: Write>(
    engine: &mut CipherEngine,
    input: &mut R,
    output: &mut W,
    chunk_size: usize,
) -> Result<(), CryptoniteError> {
    let mut buf = vec![0u8; chunk_size.max(1)];
    loop {
        let n = input
            .read(&mut buf)
            .map_err(CryptoniteError::UnreadableStream)?;

        if n == 0 {
            let tail = engine.finalize()?;
            output
                .write_all(&tail)
                .map_err(CryptoniteError::UnwritableStream)?;
            return Ok(());
        }

        let transformed = engine.update(&buf[..n])?;
        output
            .write_all(&transformed)
            .map_err(CryptoniteError::UnwritableStream)?;
    }
}
