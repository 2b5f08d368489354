use std::{
    fs::Metadata,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize, Serializer};

/// Snapshot of an entry's metadata, taken when its directory was listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// File name
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Permission bits
    pub mode: u32,
    /// Last modification time, unix seconds
    pub mtime_secs: u64,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl FileMeta {
    /// Describe an entry from metadata that did not follow symlinks.
    pub fn from_metadata(name: String, md: &Metadata) -> Self {
        let file_type = md.file_type();

        FileMeta {
            name,
            size: md.len(),
            mode: permission_bits(md),
            mtime_secs: to_unix_secs(md.modified().ok()),
            is_dir: file_type.is_dir(),
            is_symlink: file_type.is_symlink(),
        }
    }
}

/// Serializes flat: the metadata fields sit next to the paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(flatten)]
    pub meta: FileMeta,
    /// Scan root joined with every segment down to the file.
    #[serde(serialize_with = "lossy_path")]
    pub absolute_path: PathBuf,
    /// Containing directory relative to the scan root; empty for files
    /// directly under the root.
    #[serde(serialize_with = "lossy_path")]
    pub relative_path: PathBuf,
    /// Lowercase hex digest, only when hashing was requested and succeeded.
    pub digest: Option<String>,
}

impl FileRecord {
    /// Path of the file itself relative to the scan root.
    ///
    /// Uses the raw name from `absolute_path`, since `meta.name` is lossy for
    /// names that are not valid UTF-8.
    pub fn relative_file_path(&self) -> PathBuf {
        match self.absolute_path.file_name() {
            Some(name) => self.relative_path.join(name),
            None => self.relative_path.join(&self.meta.name),
        }
    }
}

/// Paths that are not valid UTF-8 serialize with replacement characters
/// instead of failing.
fn lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

#[cfg(unix)]
fn permission_bits(md: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;

    md.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(md: &Metadata) -> u32 {
    if md.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

pub(crate) fn to_unix_secs(t: Option<SystemTime>) -> u64 {
    t.and_then(|tt| tt.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
