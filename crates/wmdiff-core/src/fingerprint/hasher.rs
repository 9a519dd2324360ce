//! SHA-256 hashing of files and directory subtrees

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use walkdir::WalkDir;

/// Read chunk size; files are never loaded whole
const CHUNK_SIZE: usize = 4096;

/// Errors that can occur while fingerprinting a path
#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("not a regular file or directory: {0}")]
    Unsupported(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("not a SHA-256 hex digest: {0}")]
    InvalidDigest(String),
}

impl FingerprintError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Lowercase hex SHA-256 digest of an asset's content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    fn from_hasher(hasher: Sha256) -> Self {
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Parse a previously computed digest (64 hex characters)
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        (hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()))
            .then(|| Self(hex.to_ascii_lowercase()))
    }

    /// The hex digest
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` hex characters, for display
    #[must_use]
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        Self::from_hex(&hex).ok_or(FingerprintError::InvalidDigest(hex))
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint a file or a directory subtree
///
/// # Errors
/// Returns an error if the path does not exist, cannot be read, or is
/// neither a regular file nor a directory.
pub fn fingerprint(path: &Path) -> Result<Fingerprint, FingerprintError> {
    let metadata = path
        .metadata()
        .map_err(|e| FingerprintError::io(path, e))?;

    if metadata.is_file() {
        fingerprint_file(path)
    } else if metadata.is_dir() {
        fingerprint_dir(path)
    } else {
        Err(FingerprintError::Unsupported(path.to_path_buf()))
    }
}

/// Fingerprint a single file by streaming its bytes
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, FingerprintError> {
    let mut hasher = Sha256::new();
    hash_file_content(path, &mut hasher)?;
    Ok(Fingerprint::from_hasher(hasher))
}

/// Fingerprint every non-hidden regular file below `dir`
///
/// Files are visited in relative-path order. For each file the digest is
/// fed the file name, then its content. Symlinks to files count with the
/// content of their target; symlinked directories are not descended into.
///
/// # Errors
/// Returns an error if `dir` is missing or any included file cannot be read.
pub fn fingerprint_dir(dir: &Path) -> Result<Fingerprint, FingerprintError> {
    if !dir.is_dir() {
        return Err(if dir.exists() {
            FingerprintError::Unsupported(dir.to_path_buf())
        } else {
            FingerprintError::NotFound(dir.to_path_buf())
        });
    }

    let mut files = collect_files(dir)?;
    // Path ordering is component-wise, independent of readdir order
    files.sort();

    let mut hasher = Sha256::new();
    for relative in &files {
        let name = relative
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        hasher.update(name.as_bytes());
        hash_file_content(&dir.join(relative), &mut hasher)?;
    }
    Ok(Fingerprint::from_hasher(hasher))
}

fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, FingerprintError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|source| FingerprintError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        // `Path::is_file` follows symlinks, `DirEntry::file_type` does not
        if !entry.path().is_file() || is_hidden(entry.file_name()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(dir) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(files)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn hash_file_content(path: &Path, hasher: &mut Sha256) -> Result<(), FingerprintError> {
    let mut file = File::open(path).map_err(|e| FingerprintError::io(path, e))?;
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FingerprintError::io(path, e)),
        };
        hasher.update(&buffer[..read]);
    }
    Ok(())
}
