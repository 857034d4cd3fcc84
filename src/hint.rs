//! # Hint Store
//!
//! Optional trailing `"HINT=" + utf8(hint)` record appended after the full
//! envelope, with no length prefix or terminator. It is located by scanning
//! for the keyword and removed by truncating the file at the keyword's
//! offset. A well-formed container carries at most one hint, starting
//! immediately after the ciphertext.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::consts::HINT_KEYWORD;
use crate::error::CryptoniteError;

const SCAN_CHUNK: usize = 64 * 1024;

/// Append a hint record to `file`.
pub fn append_hint(file: &Path, hint: &str) -> Result<(), CryptoniteError> {
    let mut handle = OpenOptions::new().append(true).open(file)?;
    handle
        .write_all(HINT_KEYWORD)
        .and_then(|_| handle.write_all(hint.as_bytes()))
        .map_err(CryptoniteError::UnwritableStream)
}

/// Scan `file` for the hint keyword and return the raw bytes after it,
/// without decrypting anything. `None` if no hint record exists.
pub fn find_hint(file: &Path) -> Result<Option<Vec<u8>>, CryptoniteError> {
    let mut handle = File::open(file)?;
    let Some(offset) = locate_keyword(&mut handle)? else {
        return Ok(None);
    };

    handle
        .seek(SeekFrom::Start(offset + HINT_KEYWORD.len() as u64))
        .map_err(CryptoniteError::UnreadableStream)?;
    let mut hint = Vec::new();
    handle
        .read_to_end(&mut hint)
        .map_err(CryptoniteError::UnreadableStream)?;
    Ok(Some(hint))
}

/// Remove the hint record from `file`, restoring it to exactly the
/// envelope bytes. A no-op when no keyword is found; idempotent.
///
/// Must run on a container before header parsing on decrypt: ciphertext
/// length is not stored, so a leftover hint would otherwise be consumed as
/// ciphertext by the read-until-EOF transform loop.
pub fn truncate_hint(file: &Path) -> Result<(), CryptoniteError> {
    let mut handle = OpenOptions::new().read(true).write(true).open(file)?;
    if let Some(offset) = locate_keyword(&mut handle)? {
        handle.set_len(offset)?;
    }
    Ok(())
}

/// Public hint query: the UTF-8 hint for a container, or `None`.
///
/// Opens the file read-only and never mutates it. Bytes after the keyword
/// that are not valid UTF-8 fail with [`CryptoniteError::InvalidData`].
pub fn hint_for(container: &Path) -> Result<Option<String>, CryptoniteError> {
    match find_hint(container)? {
        None => Ok(None),
        Some(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| CryptoniteError::InvalidData("hint is not valid UTF-8".to_string())),
    }
}

/// Chunked forward scan for the first keyword occurrence. Keeps
/// `keyword-1` bytes of overlap between reads so a match straddling a
/// chunk boundary is still found.
fn locate_keyword<R: Read>(reader: &mut R) -> Result<Option<u64>, CryptoniteError> {
    let keyword = HINT_KEYWORD;
    let overlap = keyword.len() - 1;
    let mut buf = vec![0u8; SCAN_CHUNK + overlap];
    let mut carried = 0usize;
    // File offset of buf[0].
    let mut base = 0u64;

    loop {
        let n = reader
            .read(&mut buf[carried..])
            .map_err(CryptoniteError::UnreadableStream)?;
        if n == 0 {
            return Ok(None);
        }
        let window = &buf[..carried + n];
        if window.len() >= keyword.len() {
            if let Some(pos) = window.windows(keyword.len()).position(|w| w == keyword) {
                return Ok(Some(base + pos as u64));
            }
        }

        let keep = window.len().min(overlap);
        let start = window.len() - keep;
        base += start as u64;
        buf.copy_within(start..start + keep, 0);
        carried = keep;
    }
}
