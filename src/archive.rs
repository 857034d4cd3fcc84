//! # Archiver
//!
//! Packs source files into the single plaintext blob the cipher consumes,
//! and unpacks a recovered blob back into files. The pipeline treats this
//! as an opaque capability; [`ZipArchiver`] is the stock implementation.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::CryptoniteError;

/// Pack/unpack capability used by the pipeline for staging.
pub trait Archiver {
    /// Pack `sources` (files or directories) into a single archive file.
    fn pack(&self, sources: &[PathBuf], destination: &Path) -> Result<(), CryptoniteError>;

    /// Unpack `archive` into `destination`, returning the produced paths.
    fn unpack(&self, archive: &Path, destination: &Path)
        -> Result<Vec<PathBuf>, CryptoniteError>;
}

/// Deflate-compressed zip archiving.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn pack(&self, sources: &[PathBuf], destination: &Path) -> Result<(), CryptoniteError> {
        let file = File::create(destination)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for source in sources {
            if source.is_dir() {
                let root_name = entry_name(source)?;
                for entry in WalkDir::new(source) {
                    let entry = entry.map_err(|e| {
                        CryptoniteError::Io(io::Error::other(e.to_string()))
                    })?;
                    if !entry.path().is_file() {
                        continue;
                    }
                    let relative = entry
                        .path()
                        .strip_prefix(source)
                        .map_err(|_| CryptoniteError::Io(io::Error::other("path escapes source")))?;
                    let name = format!("{root_name}/{}", slashed(relative));
                    zip.start_file(name, options)?;
                    io::copy(&mut File::open(entry.path())?, &mut zip)?;
                }
            } else {
                zip.start_file(entry_name(source)?, options)?;
                io::copy(&mut File::open(source)?, &mut zip)?;
            }
        }

        zip.finish()?;
        debug!(archive = %destination.display(), count = sources.len(), "packed sources");
        Ok(())
    }

    fn unpack(
        &self,
        archive: &Path,
        destination: &Path,
    ) -> Result<Vec<PathBuf>, CryptoniteError> {
        let mut zip = ZipArchive::new(File::open(archive)?)?;
        fs::create_dir_all(destination)?;

        let mut produced = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let entry = zip.by_index(index)?;
            if entry.is_file() {
                if let Some(relative) = entry.enclosed_name() {
                    produced.push(destination.join(relative));
                }
            }
        }
        zip.extract(destination)?;
        debug!(archive = %archive.display(), count = produced.len(), "unpacked archive");
        Ok(produced)
    }
}

fn entry_name(path: &Path) -> Result<String, CryptoniteError> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CryptoniteError::InvalidData(format!("unusable path: {}", path.display())))
}

fn slashed(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
