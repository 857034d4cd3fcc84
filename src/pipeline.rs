//! # Encryption Pipeline
//!
//! File-level orchestration: staging through the archiver, envelope and
//! cipher plumbing via the stream facades, hint handling, and sequential
//! batch processing. A [`Pipeline`] is an explicit object holding its own
//! scratch-directory handle — construct one per caller or per invocation;
//! there is no process-wide singleton.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::algorithm::Algorithm;
use crate::archive::{Archiver, ZipArchiver};
use crate::consts::{DEFAULT_KDF_ROUNDS, FILE_EXTENSION};
use crate::decryptor;
use crate::encryptor;
use crate::error::CryptoniteError;
use crate::hint;

/// Name of a multi-source container, matching the single-source stem rule.
const MULTI_SOURCE_STEM: &str = "Archive";

/// One plaintext→container / container→plaintext orchestrator.
///
/// The scratch directory is owned exclusively by the pipeline for the
/// duration of each call and is cleared at the start of every run — give
/// it a directory of its own.
pub struct Pipeline {
    scratch_dir: PathBuf,
    algorithm: Algorithm,
    rounds: u32,
    archiver: Box<dyn Archiver + Send>,
}

impl Pipeline {
    /// Pipeline with the default policy: AES-256, 10 000 KDF rounds,
    /// zip archiving.
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            algorithm: Algorithm::Aes256,
            rounds: DEFAULT_KDF_ROUNDS,
            archiver: Box::new(ZipArchiver),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Override the KDF round count. Containers written with one round
    /// count can only be opened with the same one — the value is not
    /// stored in the envelope.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_archiver(mut self, archiver: Box<dyn Archiver + Send>) -> Self {
        self.archiver = archiver;
        self
    }

    /// Encrypt `sources` into a single container in `output_dir`,
    /// optionally tagging it with a password hint.
    ///
    /// All sources are packed into one archive first (even a single one),
    /// so the container always decrypts back through [`Archiver::unpack`].
    pub fn encrypt(
        &self,
        password: &str,
        hint: Option<&str>,
        sources: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, CryptoniteError> {
        self.clear_scratch()?;
        info!(count = sources.len(), algorithm = ?self.algorithm, "encrypting");

        let container = self.encrypt_one(password, sources)?;

        fs::create_dir_all(output_dir)?;
        let file_name = container
            .file_name()
            .ok_or_else(|| CryptoniteError::InvalidData("container has no file name".to_string()))?;
        let destination = output_dir.join(file_name);
        fs::copy(&container, &destination)?;

        if let Some(hint) = hint.filter(|h| !h.is_empty()) {
            hint::append_hint(&destination, hint)?;
        }

        info!(container = %destination.display(), "encrypted");
        Ok(vec![destination])
    }

    /// Encrypt each source into its own container, strictly sequentially.
    /// The first failure aborts the remaining sources.
    pub fn encrypt_batch(
        &self,
        password: &str,
        hint: Option<&str>,
        sources: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, CryptoniteError> {
        let mut containers = Vec::with_capacity(sources.len());
        for source in sources {
            containers.extend(self.encrypt(password, hint, std::slice::from_ref(source), output_dir)?);
        }
        Ok(containers)
    }

    /// Decrypt a single container into `output_dir`, returning the
    /// unpacked plaintext paths.
    pub fn decrypt(
        &self,
        password: &str,
        sources: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, CryptoniteError> {
        self.clear_scratch()?;

        let [source] = sources else {
            return Err(CryptoniteError::InvalidFileFormat(format!(
                "expected exactly one container, got {}",
                sources.len()
            )));
        };
        if source.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
            return Err(CryptoniteError::InvalidFileFormat(format!(
                "not a .{FILE_EXTENSION} file: {}",
                source.display()
            )));
        }
        info!(container = %source.display(), "decrypting");

        let staging = self.staging_dir();
        let stem = file_stem(source)?;

        // Work on a copy: hint truncation mutates the container, and a
        // leftover hint would otherwise be consumed as ciphertext.
        let staged = staging.join(format!("{stem}.{FILE_EXTENSION}"));
        fs::copy(source, &staged)?;
        hint::truncate_hint(&staged)?;

        let archive_path = staging.join(format!("{stem}.zip"));
        {
            let mut input = File::open(&staged).map_err(CryptoniteError::UnreadableStream)?;
            let mut output =
                File::create(&archive_path).map_err(CryptoniteError::UnwritableStream)?;
            match decryptor::decrypt(&mut input, &mut output, password, self.algorithm, self.rounds)
            {
                Ok(()) => {}
                // A body that fails to decode under the derived key means a
                // wrong password in every practical case; without a MAC
                // there is nothing more precise to report.
                Err(CryptoniteError::Crypto(reason)) => {
                    debug!(%reason, "ciphertext did not decode");
                    return Err(CryptoniteError::InvalidPassword);
                }
                Err(e) => return Err(e),
            }
        }

        let produced = self.archiver.unpack(&archive_path, output_dir)?;
        info!(count = produced.len(), "decrypted");
        Ok(produced)
    }

    /// Decrypt each container in order; the first failure aborts the rest.
    pub fn decrypt_batch(
        &self,
        password: &str,
        sources: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, CryptoniteError> {
        let mut produced = Vec::new();
        for source in sources {
            produced.extend(self.decrypt(password, std::slice::from_ref(source), output_dir)?);
        }
        Ok(produced)
    }

    fn encrypt_one(
        &self,
        password: &str,
        sources: &[PathBuf],
    ) -> Result<PathBuf, CryptoniteError> {
        if sources.is_empty() {
            return Err(CryptoniteError::InvalidFileFormat(
                "no sources to encrypt".to_string(),
            ));
        }

        let staging = self.staging_dir();
        let stem = if sources.len() > 1 {
            MULTI_SOURCE_STEM.to_string()
        } else {
            file_stem(&sources[0])?
        };

        let archive_path = staging.join(format!("{stem}.zip"));
        self.archiver.pack(sources, &archive_path)?;

        let container = staging.join(format!("{stem}.{FILE_EXTENSION}"));
        {
            let mut input = File::open(&archive_path).map_err(CryptoniteError::UnreadableStream)?;
            let mut output = File::create(&container).map_err(CryptoniteError::UnwritableStream)?;
            encryptor::encrypt(&mut input, &mut output, password, self.algorithm, self.rounds)?;
        }
        Ok(container)
    }

    /// Clear and recreate the staging area. Runs at the start of every
    /// encrypt/decrypt call; batch items reuse the same directory.
    fn clear_scratch(&self) -> Result<(), CryptoniteError> {
        let staging = self.staging_dir();
        match fs::remove_dir_all(&staging) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&staging)?;
        Ok(())
    }

    fn staging_dir(&self) -> PathBuf {
        self.scratch_dir.join("input")
    }
}

fn file_stem(path: &Path) -> Result<String, CryptoniteError> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CryptoniteError::InvalidFileFormat(format!("unusable path: {}", path.display()))
        })
}
