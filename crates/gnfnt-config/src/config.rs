use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use gnfnt_utils::{
    error::PathResult,
    path::{home_dir, resolve_path, xdg_data_home},
    system::Os,
};

use crate::error::Result;

/// Feed seeded into the registry when no usable registry file exists.
pub const DEFAULT_FEED: &str = "https://api.github.com/repos/ryanoasis/nerd-fonts/releases/latest";

/// Location package archives are downloaded from, as `<base><name>.zip`.
pub const DEFAULT_DOWNLOAD_BASE: &str =
    "https://github.com/ryanoasis/nerd-fonts/releases/latest/download/";

pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(10);

const REGISTRY_FILE: &str = "repositories.json";

/// Paths and endpoints used by every component.
///
/// Built once per process and passed down explicitly, so tests can point the whole
/// installer at throwaway directories.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory fonts are installed into.
    pub font_dir: PathBuf,

    /// Per-user hidden directory holding the registry file and the temp root.
    pub home_dir: PathBuf,

    /// JSON file listing the registered feeds.
    pub registry_path: PathBuf,

    /// Parent of the per-install staging directories.
    pub temp_root: PathBuf,

    /// Base URL archives are fetched from.
    pub download_base: String,

    /// Upper bound for a single feed query.
    pub feed_timeout: Duration,

    pub os: Os,
}

impl Config {
    /// Builds the configuration for the current platform.
    ///
    /// Environment overrides:
    /// - `GNFNT_FONT_DIR`: font directory
    /// - `GNFNT_HOME`: directory holding the registry and staging area
    /// - `GNFNT_DOWNLOAD_BASE`: archive download base URL
    pub fn load() -> Result<Self> {
        Self::for_os(Os::current())
    }

    pub fn for_os(os: Os) -> Result<Self> {
        let font_dir = match std::env::var("GNFNT_FONT_DIR") {
            Ok(dir) => resolve_path(&dir)?,
            Err(_) => default_font_dir(os)?,
        };

        let home_dir = match std::env::var("GNFNT_HOME") {
            Ok(dir) => resolve_path(&dir)?,
            Err(_) => home_dir()?.join(".gnfnt"),
        };

        let download_base = std::env::var("GNFNT_DOWNLOAD_BASE")
            .unwrap_or_else(|_| DEFAULT_DOWNLOAD_BASE.to_string());

        Ok(Self::assemble(os, font_dir, home_dir, download_base))
    }

    /// Configuration rooted entirely under `root`, ignoring the environment.
    pub fn isolated(root: &Path) -> Self {
        Self::assemble(
            Os::current(),
            root.join("fonts"),
            root.join(".gnfnt"),
            DEFAULT_DOWNLOAD_BASE.to_string(),
        )
    }

    fn assemble(os: Os, font_dir: PathBuf, home_dir: PathBuf, download_base: String) -> Self {
        Self {
            font_dir,
            registry_path: home_dir.join(REGISTRY_FILE),
            temp_root: home_dir.join("tmp"),
            home_dir,
            download_base,
            feed_timeout: DEFAULT_FEED_TIMEOUT,
            os,
        }
    }

    pub fn with_font_dir(mut self, font_dir: impl Into<PathBuf>) -> Self {
        self.font_dir = font_dir.into();
        self
    }

    pub fn with_download_base(mut self, base: impl Into<String>) -> Self {
        self.download_base = base.into();
        self
    }
}

/// Platform font directory used when no override is given.
pub fn default_font_dir(os: Os) -> PathResult<PathBuf> {
    Ok(match os {
        Os::Windows => home_dir()?.join("AppData/Local/Microsoft/Windows/Fonts"),
        Os::MacOs => home_dir()?.join("Library/Fonts"),
        Os::Unix => xdg_data_home()?.join("fonts/NerdFonts"),
    })
}
