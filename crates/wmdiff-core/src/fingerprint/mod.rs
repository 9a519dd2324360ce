//! Fingerprint module: Content hashing for files and directory trees
//!
//! A fingerprint is a SHA-256 digest of an asset's bytes. Directory
//! fingerprints visit files in sorted relative-path order so that two trees
//! with the same names and contents hash identically on any filesystem.

mod hasher;

pub use hasher::{fingerprint, fingerprint_dir, fingerprint_file, Fingerprint, FingerprintError};
