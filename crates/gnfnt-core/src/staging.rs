use std::path::{Path, PathBuf};

use gnfnt_utils::fs::ensure_dir_exists;
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::{
    constants::STAGING_PREFIX,
    error::ErrorContext,
    GnfntResult,
};

/// Private scratch directory for a single install.
///
/// Created with a unique name under the temp root and removed with everything inside it when
/// the guard goes out of scope, on success, early return and unwinding alike.
pub struct StagingDir {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl StagingDir {
    pub fn create(temp_root: &Path) -> GnfntResult<Self> {
        ensure_dir_exists(temp_root)?;

        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(temp_root)
            .with_context(|| format!("creating staging directory in {}", temp_root.display()))?;
        let path = dir.path().to_path_buf();
        debug!("Created staging directory {}", path.display());

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the downloaded archive for `file_name` is written.
    pub fn file(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Directory archives are unpacked into.
    pub fn extract_dir(&self) -> PathBuf {
        self.path.join("extract")
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => debug!("Removed staging directory {}", self.path.display()),
                Err(err) => {
                    warn!(
                        "Failed to remove staging directory {}: {}",
                        self.path.display(),
                        err
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_staging_dir_removed_on_drop() {
        let root = tempdir().unwrap();
        let temp_root = root.path().join("tmp");

        let staging = StagingDir::create(&temp_root).unwrap();
        let path = staging.path().to_path_buf();
        assert!(path.starts_with(&temp_root));
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(STAGING_PREFIX));

        std::fs::create_dir_all(staging.extract_dir().join("nested")).unwrap();
        std::fs::write(staging.file("Hack.zip"), b"zip").unwrap();

        drop(staging);
        assert!(!path.exists());
    }

    #[test]
    fn test_staging_dirs_are_unique() {
        let root = tempdir().unwrap();

        let first = StagingDir::create(root.path()).unwrap();
        let second = StagingDir::create(root.path()).unwrap();
        assert_ne!(first.path(), second.path());
    }

    #[test]
    fn test_staging_dir_removed_on_early_return() {
        fn failing_step(temp_root: &Path, seen: &mut Option<PathBuf>) -> GnfntResult<()> {
            let staging = StagingDir::create(temp_root)?;
            *seen = Some(staging.path().to_path_buf());
            Err(crate::error::GnfntError::Custom("boom".into()))
        }

        let root = tempdir().unwrap();
        let mut seen = None;
        assert!(failing_step(root.path(), &mut seen).is_err());
        assert!(!seen.unwrap().exists());
    }
}
