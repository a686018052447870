use std::{
    fs,
    path::{Path, PathBuf},
};

use gnfnt_utils::fs::ensure_dir_exists;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::DEFAULT_FEED,
    error::{ConfigError, Result},
};

/// On-disk shape of the registry file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    repositories: Vec<String>,
}

/// Ordered set of feed URLs, persisted as `{"repositories": [...]}`.
///
/// The file is only created on the first explicit write; a missing or unreadable file
/// yields the built-in default feed without touching disk.
#[derive(Debug, Clone)]
pub struct RepositoryRegistry {
    path: PathBuf,
    repositories: Vec<String>,
}

impl RepositoryRegistry {
    /// Loads the registry at `path`. Never fails.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let repositories = match Self::read(&path) {
            Ok(repositories) => repositories,
            Err(ConfigError::IoError(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No registry at {}, using default feed", path.display());
                vec![DEFAULT_FEED.to_string()]
            }
            Err(err) => {
                warn!(
                    "Could not read registry {} ({}), falling back to the default feed",
                    path.display(),
                    err
                );
                vec![DEFAULT_FEED.to_string()]
            }
        };

        Self {
            path,
            repositories,
        }
    }

    /// Reads and decodes the registry file without any fallback.
    pub fn read(path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path)?;
        let file: RegistryFile = serde_json::from_str(&content)?;

        let mut repositories: Vec<String> = Vec::with_capacity(file.repositories.len());
        for url in file.repositories {
            if !repositories.contains(&url) {
                repositories.push(url);
            }
        }
        Ok(repositories)
    }

    /// Writes the full list back to disk, creating parent directories as needed.
    ///
    /// This overwrites the file in place; two concurrent invocations can still race here.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir_exists(parent)?;
        }

        let file = RegistryFile {
            repositories: self.repositories.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        debug!("Registry saved to {}", self.path.display());
        Ok(())
    }

    /// Registers `url`. Returns `false` without writing if it is already present.
    pub fn add(&mut self, url: &str) -> Result<bool> {
        let url = validate_url(url)?;

        if self.contains(&url) {
            return Ok(false);
        }

        self.repositories.push(url);
        self.save()?;
        Ok(true)
    }

    /// Unregisters `url`. Returns `false` without writing if it was not registered.
    pub fn remove(&mut self, url: &str) -> Result<bool> {
        let url = url.trim();
        let before = self.repositories.len();
        self.repositories.retain(|repo| repo != url);

        if self.repositories.len() == before {
            return Ok(false);
        }

        self.save()?;
        Ok(true)
    }

    /// Drops every feed in `invalid` and persists once.
    ///
    /// Returns the URLs that were actually removed.
    pub fn prune(&mut self, invalid: &[String]) -> Result<Vec<String>> {
        let removed: Vec<String> = self
            .repositories
            .iter()
            .filter(|repo| invalid.contains(repo))
            .cloned()
            .collect();

        if removed.is_empty() {
            return Ok(removed);
        }

        self.repositories.retain(|repo| !invalid.contains(repo));
        self.save()?;
        Ok(removed)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.repositories.iter().any(|repo| repo == url)
    }

    pub fn list(&self) -> &[String] {
        &self.repositories
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn validate_url(url: &str) -> Result<String> {
    let url = url.trim();
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
            Ok(url.to_string())
        }
        _ => Err(ConfigError::InvalidRepositoryUrl(url.to_string())),
    }
}
