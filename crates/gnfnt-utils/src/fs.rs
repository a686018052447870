use std::{fs, path::Path};

use crate::error::{FileSystemError, FileSystemResult};

pub trait FileSystemProvider {
    /// Creates a directory structure if it doesn't exist.
    ///
    /// # Errors
    ///
    /// * [`FileSystemError::Directory`] if the directory could not be created.
    /// * [`FileSystemError::NotADirectory`] if the path exists but is not a directory.
    fn ensure_dir_exists<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<()>;

    /// Moves `from` to `to`.
    ///
    /// A plain rename is attempted first. When that fails (typically because source and
    /// destination live on different filesystems) the file is copied and the source removed.
    fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> FileSystemResult<()>;
}

#[derive(Default, Clone)]
pub struct StandardFileSystemProvider;

impl FileSystemProvider for StandardFileSystemProvider {
    fn ensure_dir_exists<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).map_err(|err| FileSystemError::Directory {
                path: path.to_path_buf(),
                action: "create",
                source: err,
            })?;
        } else if !path.is_dir() {
            return Err(FileSystemError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }

    fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> FileSystemResult<()> {
        let (from, to) = (from.as_ref(), to.as_ref());

        if fs::rename(from, to).is_ok() {
            return Ok(());
        }

        fs::copy(from, to).map_err(|err| FileSystemError::File {
            path: from.to_path_buf(),
            action: "copy",
            source: err,
        })?;
        fs::remove_file(from).map_err(|err| FileSystemError::File {
            path: from.to_path_buf(),
            action: "remove",
            source: err,
        })
    }
}

/// Creates a directory structure if it doesn't exist.
///
/// See [`FileSystemProvider::ensure_dir_exists`].
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    StandardFileSystemProvider.ensure_dir_exists(path)
}

/// Moves a file, falling back to copy + remove across filesystems.
///
/// See [`FileSystemProvider::move_file`].
pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> FileSystemResult<()> {
    StandardFileSystemProvider.move_file(from, to)
}
