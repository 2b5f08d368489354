//! Content digests.
//!
//! A [`HashFactory`] hands every file its own fresh [`HashState`], so workers
//! never share hash state. Digests are rendered as lowercase hex.

use std::{
    fmt::{self, Write as _},
    io::{self, BufReader, Write},
    path::Path,
    str::FromStr,
    sync::Arc,
};

use sha2::{Sha256, Sha512};
use thiserror::Error;

use crate::{config::READ_BUFFER_SIZE, error::ScanError, source::Source};

/// Incremental hash computation over a byte stream.
pub trait HashState: Send {
    fn update(&mut self, data: &[u8]);

    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Produces an independent [`HashState`] per call.
pub type HashFactory = Arc<dyn Fn() -> Box<dyn HashState> + Send + Sync>;

macro_rules! impl_sha2_state {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HashState for $ty {
                fn update(&mut self, data: &[u8]) {
                    sha2::Digest::update(self, data);
                }

                fn finalize(self: Box<Self>) -> Vec<u8> {
                    sha2::Digest::finalize(*self).to_vec()
                }
            }
        )*
    };
}

impl_sha2_state!(Sha256, Sha512);

impl HashState for blake3::Hasher {
    fn update(&mut self, data: &[u8]) {
        blake3::Hasher::update(self, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        blake3::Hasher::finalize(&self).as_bytes().to_vec()
    }
}

impl HashState for crc32fast::Hasher {
    fn update(&mut self, data: &[u8]) {
        crc32fast::Hasher::update(self, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        crc32fast::Hasher::finalize(*self).to_be_bytes().to_vec()
    }
}

/// Built-in algorithms selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
    Blake3,
    Crc32,
}

#[derive(Debug, Error)]
#[error("unknown hash algorithm `{0}` (expected sha256, sha512, blake3 or crc32)")]
pub struct UnknownAlgorithm(pub String);

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Blake3,
        HashAlgorithm::Crc32,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Crc32 => "crc32",
        }
    }

    pub fn new_state(self) -> Box<dyn HashState> {
        match self {
            HashAlgorithm::Sha256 => Box::new(<Sha256 as sha2::Digest>::new()),
            HashAlgorithm::Sha512 => Box::new(<Sha512 as sha2::Digest>::new()),
            HashAlgorithm::Blake3 => Box::new(blake3::Hasher::new()),
            HashAlgorithm::Crc32 => Box::new(crc32fast::Hasher::new()),
        }
    }

    pub fn factory(self) -> HashFactory {
        Arc::new(move || self.new_state())
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}

/// Adapts a [`HashState`] to `io::Write` so file contents can be copied in.
struct HashWriter(Box<dyn HashState>);

impl Write for HashWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Writing into a String cannot fail.
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Stream the whole file at `path` through a fresh hash state.
pub fn compute_digest(
    source: &dyn Source,
    path: &Path,
    factory: &HashFactory,
) -> Result<String, ScanError> {
    let file = source
        .open_file(path)
        .map_err(|e| ScanError::open(path, e))?;
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

    let mut writer = HashWriter(factory());
    io::copy(&mut reader, &mut writer).map_err(|e| ScanError::read(path, e))?;

    Ok(to_hex(&writer.0.finalize()))
}

#[cfg(test)]
#[path = "digest_tests.rs"]
mod tests;
