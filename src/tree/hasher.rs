//! Fixity generation for file entries

use crate::error::CatalogueError;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Read size used when streaming file content into a digest
pub const HASH_BUFFER_SIZE: usize = 4096;

/// Supported fixity algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FixityAlgorithm {
    Md5,
    #[default]
    Sha1,
    Sha256,
    Sha512,
    Blake3,
}

impl FixityAlgorithm {
    /// Name written to the algorithm column
    pub fn label(&self) -> &'static str {
        match self {
            FixityAlgorithm::Md5 => "MD5",
            FixityAlgorithm::Sha1 => "SHA-1",
            FixityAlgorithm::Sha256 => "SHA-256",
            FixityAlgorithm::Sha512 => "SHA-512",
            FixityAlgorithm::Blake3 => "BLAKE3",
        }
    }
}

impl fmt::Display for FixityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FixityAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MD5" => Ok(FixityAlgorithm::Md5),
            "SHA-1" | "SHA1" => Ok(FixityAlgorithm::Sha1),
            "SHA-256" | "SHA256" => Ok(FixityAlgorithm::Sha256),
            "SHA-512" | "SHA512" => Ok(FixityAlgorithm::Sha512),
            "BLAKE3" => Ok(FixityAlgorithm::Blake3),
            other => Err(format!(
                "unknown fixity algorithm '{}' (expected MD5, SHA-1, SHA-256, SHA-512 or BLAKE3)",
                other
            )),
        }
    }
}

/// Computes a content digest for a file.
pub trait HashProvider {
    /// Uppercase hex digest of the file at `path`.
    fn digest(&self, path: &Path, algorithm: FixityAlgorithm) -> Result<String, CatalogueError>;
}

/// Default provider: streams the file through the selected algorithm in fixed-size chunks.
#[derive(Debug, Clone)]
pub struct StreamingHasher {
    buffer_size: usize,
}

impl Default for StreamingHasher {
    fn default() -> Self {
        Self {
            buffer_size: HASH_BUFFER_SIZE,
        }
    }
}

enum DigestState {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
    Blake3(Box<blake3::Hasher>),
}

impl DigestState {
    fn new(algorithm: FixityAlgorithm) -> Self {
        match algorithm {
            FixityAlgorithm::Md5 => DigestState::Md5(Md5::new()),
            FixityAlgorithm::Sha1 => DigestState::Sha1(Sha1::new()),
            FixityAlgorithm::Sha256 => DigestState::Sha256(Sha256::new()),
            FixityAlgorithm::Sha512 => DigestState::Sha512(Sha512::new()),
            FixityAlgorithm::Blake3 => DigestState::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            DigestState::Md5(h) => Digest::update(h, chunk),
            DigestState::Sha1(h) => Digest::update(h, chunk),
            DigestState::Sha256(h) => Digest::update(h, chunk),
            DigestState::Sha512(h) => Digest::update(h, chunk),
            DigestState::Blake3(h) => {
                h.update(chunk);
            }
        }
    }

    fn finalize_upper_hex(self) -> String {
        match self {
            DigestState::Md5(h) => hex::encode_upper(h.finalize()),
            DigestState::Sha1(h) => hex::encode_upper(h.finalize()),
            DigestState::Sha256(h) => hex::encode_upper(h.finalize()),
            DigestState::Sha512(h) => hex::encode_upper(h.finalize()),
            DigestState::Blake3(h) => hex::encode_upper(h.finalize().as_bytes()),
        }
    }
}

impl HashProvider for StreamingHasher {
    fn digest(&self, path: &Path, algorithm: FixityAlgorithm) -> Result<String, CatalogueError> {
        debug!(path = %path.display(), algorithm = %algorithm, "Generating fixity");
        let mut file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CatalogueError::FileNotFound(path.to_path_buf()),
            _ => CatalogueError::Hash {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let mut state = DigestState::new(algorithm);
        let mut buffer = vec![0u8; self.buffer_size.max(1)];
        loop {
            let read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(CatalogueError::Hash {
                        path: path.to_path_buf(),
                        source: e,
                    })
                }
            };
            state.update(&buffer[..read]);
        }

        let digest = state.finalize_upper_hex();
        debug!(path = %path.display(), digest = %digest, "Generated fixity");
        Ok(digest)
    }
}
