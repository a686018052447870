use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::trace;

use crate::constants::FONT_EXTENSIONS;

/// Source of the file names present in a directory.
pub trait DirectoryListing {
    /// Names of the regular files directly inside `dir`. A missing or unreadable directory
    /// lists as empty.
    fn file_names(&self, dir: &Path) -> Vec<String>;
}

/// Lists directories from the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsListing;

impl DirectoryListing for FsListing {
    fn file_names(&self, dir: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            trace!("{} is not readable, treating as empty", dir.display());
            return Vec::new();
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }
}

/// Whether any of `file_names` matches `<name>*.ttf` or `<name>*.otf`.
///
/// The match is a case-sensitive prefix on the package name plus one of the font suffixes.
/// Packages whose files are not prefixed by the package name read as not installed, and a
/// package whose name prefixes another's reads as installed once the longer one is.
///
/// # Examples
///
/// ```
/// use gnfnt_core::state::is_installed_in;
///
/// let files = ["FiraCodeNerdFont-Regular.ttf", "notes.txt"];
/// assert!(is_installed_in("FiraCode", files));
/// assert!(!is_installed_in("Hack", files));
/// ```
pub fn is_installed_in<I, S>(name: &str, file_names: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    file_names.into_iter().any(|file| {
        let file = file.as_ref();
        file.len() >= name.len() + 4
            && file.starts_with(name)
            && FONT_EXTENSIONS
                .iter()
                .any(|ext| file.ends_with(&format!(".{ext}")))
    })
}

/// Answers "is this package installed" from the contents of the font directory.
///
/// Nothing is cached; every query lists the directory again.
pub struct InstallationState {
    font_dir: PathBuf,
    listing: Box<dyn DirectoryListing + Send + Sync>,
}

impl InstallationState {
    pub fn new(font_dir: impl Into<PathBuf>) -> Self {
        Self::with_listing(font_dir, FsListing)
    }

    pub fn with_listing<L>(font_dir: impl Into<PathBuf>, listing: L) -> Self
    where
        L: DirectoryListing + Send + Sync + 'static,
    {
        Self {
            font_dir: font_dir.into(),
            listing: Box::new(listing),
        }
    }

    pub fn is_installed(&self, name: &str) -> bool {
        is_installed_in(name, self.listing.file_names(&self.font_dir))
    }

    pub fn font_dir(&self) -> &Path {
        &self.font_dir
    }
}
