use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, Read},
    path::Path,
};

use crate::record::FileMeta;

/// One entry of a directory listing.
#[derive(Debug, Clone)]
pub struct DirItem {
    pub name: OsString,
    pub meta: FileMeta,
}

pub type DirItems = Box<dyn Iterator<Item = io::Result<DirItem>>>;

/// Where a scan reads directories and file contents from.
///
/// Entries must be described without following symlinks so a link to a
/// directory is never descended into.
pub trait Source: Send + Sync {
    /// Open a directory for listing. Errors from the returned iterator are
    /// failures to read entries, not to open the directory.
    fn open_dir(&self, path: &Path) -> io::Result<DirItems>;

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;
}

/// The local filesystem via `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Source for LocalFs {
    fn open_dir(&self, path: &Path) -> io::Result<DirItems> {
        let rd = fs::read_dir(path)?;

        Ok(Box::new(rd.map(|entry_res| {
            let entry = entry_res?;
            // DirEntry::metadata does not traverse symlinks.
            let md = entry.metadata()?;
            let name = entry.file_name();
            let meta = FileMeta::from_metadata(name.to_string_lossy().into_owned(), &md);
            Ok(DirItem { name, meta })
        })))
    }

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(path)?))
    }
}
