use std::{env, path::PathBuf};

use crate::error::{PathError, PathResult};

pub trait PathResolver {
    /// Resolves a user supplied path string to an absolute path.
    ///
    /// A leading `~` is replaced with the user's home directory and relative paths are joined
    /// onto the current working directory.
    ///
    /// # Errors
    ///
    /// * [`PathError::Empty`] if the path is empty
    /// * [`PathError::NoHome`] if the path starts with `~` and no home directory is known
    /// * [`PathError::CurrentDir`] if the current directory cannot be determined
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gnfnt_utils::path::{PathResolver, SystemPathResolver};
    ///
    /// let fonts = SystemPathResolver.resolve_path("~/fonts").unwrap();
    /// assert!(fonts.is_absolute());
    /// ```
    fn resolve_path(&self, path: &str) -> PathResult<PathBuf>;

    /// Returns the user's home directory.
    ///
    /// `HOME` is consulted first, then `USERPROFILE` (set on Windows).
    fn home_dir(&self) -> PathResult<PathBuf>;

    /// Returns `$XDG_DATA_HOME`, defaulting to `$HOME/.local/share`.
    fn xdg_data_home(&self) -> PathResult<PathBuf>;
}

/// The default [`PathResolver`] backed by process environment variables.
pub struct SystemPathResolver;

impl PathResolver for SystemPathResolver {
    fn resolve_path(&self, path: &str) -> PathResult<PathBuf> {
        let path = path.trim();

        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let path_buf = if path == "~" {
            self.home_dir()?
        } else if let Some(rest) = path.strip_prefix("~/") {
            self.home_dir()?.join(rest)
        } else {
            PathBuf::from(path)
        };

        if path_buf.is_absolute() {
            Ok(path_buf)
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(path_buf))
                .map_err(|err| PathError::CurrentDir { source: err })
        }
    }

    fn home_dir(&self) -> PathResult<PathBuf> {
        env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .ok_or(PathError::NoHome)
    }

    fn xdg_data_home(&self) -> PathResult<PathBuf> {
        match env::var_os("XDG_DATA_HOME").filter(|dir| !dir.is_empty()) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Ok(self.home_dir()?.join(".local/share")),
        }
    }
}

/// Resolves a path string using the [`SystemPathResolver`].
pub fn resolve_path(path: &str) -> PathResult<PathBuf> {
    SystemPathResolver.resolve_path(path)
}

/// Returns the user's home directory using the [`SystemPathResolver`].
pub fn home_dir() -> PathResult<PathBuf> {
    SystemPathResolver.home_dir()
}

/// Returns the user's data directory using the [`SystemPathResolver`].
pub fn xdg_data_home() -> PathResult<PathBuf> {
    SystemPathResolver.xdg_data_home()
}
