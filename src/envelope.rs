//! # Envelope Codec
//!
//! On-disk container header, all fields fixed-size, in this exact order:
//!
//! | offset      | size        | field      |
//! |-------------|-------------|------------|
//! | 0           | 10          | sentinel   |
//! | 10          | 32          | salt       |
//! | 42          | block size  | iv         |
//! | 42 + ivlen  | remainder   | ciphertext |
//!
//! The sentinel is written and checked as raw bytes, outside the cipher
//! transform. A nonzero sentinel means the file is not a container at all
//! (or was damaged), and is rejected before any bulk work. The format is
//! not self-describing: algorithm, key length and round count are
//! out-of-band agreements.

use std::io::{Read, Write};

use crate::consts::{SALT_SIZE, SENTINEL_SIZE};
use crate::error::CryptoniteError;

/// Write the envelope prefix: all-zero sentinel, salt, then IV.
pub fn write_header<W: Write>(
    output: &mut W,
    salt: &[u8; SALT_SIZE],
    iv: &[u8],
) -> Result<(), CryptoniteError> {
    let sentinel = [0u8; SENTINEL_SIZE];
    output
        .write_all(&sentinel)
        .and_then(|_| output.write_all(salt))
        .and_then(|_| output.write_all(iv))
        .map_err(CryptoniteError::UnwritableStream)
}

/// Read back exactly `SENTINEL_SIZE + salt_size + iv_size` bytes.
///
/// The envelope format fixes the salt at [`SALT_SIZE`] bytes; the
/// parameter exists so callers state the expectation explicitly.
///
/// Fails with [`CryptoniteError::InvalidPassword`] if the sentinel bytes
/// are not all zero, before any bulk decryption work happens; short reads
/// fail with [`CryptoniteError::UnreadableStream`].
pub fn read_header<R: Read>(
    input: &mut R,
    salt_size: usize,
    iv_size: usize,
) -> Result<(Vec<u8>, Vec<u8>), CryptoniteError> {
    let mut sentinel = [0u8; SENTINEL_SIZE];
    input
        .read_exact(&mut sentinel)
        .map_err(CryptoniteError::UnreadableStream)?;
    if sentinel.iter().any(|&b| b != 0) {
        return Err(CryptoniteError::InvalidPassword);
    }

    let mut salt = vec![0u8; salt_size];
    input
        .read_exact(&mut salt)
        .map_err(CryptoniteError::UnreadableStream)?;

    let mut iv = vec![0u8; iv_size];
    input
        .read_exact(&mut iv)
        .map_err(CryptoniteError::UnreadableStream)?;

    Ok((salt, iv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_layout_is_exact() {
        let salt = [0xabu8; SALT_SIZE];
        let iv = [0xcdu8; 16];
        let mut buf = Vec::new();
        write_header(&mut buf, &salt, &iv).unwrap();

        assert_eq!(buf.len(), SENTINEL_SIZE + SALT_SIZE + 16);
        assert!(buf[..SENTINEL_SIZE].iter().all(|&b| b == 0));
        assert_eq!(&buf[SENTINEL_SIZE..SENTINEL_SIZE + SALT_SIZE], &salt);
        assert_eq!(&buf[SENTINEL_SIZE + SALT_SIZE..], &iv);

        let (rsalt, riv) = read_header(&mut Cursor::new(&buf), SALT_SIZE, 16).unwrap();
        assert_eq!(rsalt, salt);
        assert_eq!(riv, iv);
    }

    #[test]
    fn salt_size_parameter_governs_the_split() {
        // A reader asking for a shorter salt shifts the IV boundary.
        let mut buf = vec![0u8; SENTINEL_SIZE];
        buf.extend_from_slice(&[0x01u8; 16]);
        buf.extend_from_slice(&[0x02u8; 8]);

        let (salt, iv) = read_header(&mut Cursor::new(&buf), 16, 8).unwrap();
        assert_eq!(salt, vec![0x01u8; 16]);
        assert_eq!(iv, vec![0x02u8; 8]);
    }

    #[test]
    fn nonzero_sentinel_is_invalid_password() {
        let mut buf = vec![0u8; SENTINEL_SIZE + SALT_SIZE + 16];
        buf[3] = 0x42;
        let err = read_header(&mut Cursor::new(&buf), SALT_SIZE, 16).unwrap_err();
        assert!(matches!(err, CryptoniteError::InvalidPassword));
    }

    #[test]
    fn short_header_is_unreadable() {
        let buf = vec![0u8; 20];
        let err = read_header(&mut Cursor::new(&buf), SALT_SIZE, 16).unwrap_err();
        assert!(matches!(err, CryptoniteError::UnreadableStream(_)));
    }
}
