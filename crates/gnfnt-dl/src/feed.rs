use std::time::Duration;

use serde::Deserialize;
use tracing::trace;

use crate::{archive::ARCHIVE_SUFFIX, error::Result, http::Http};

/// Release document returned by a feed endpoint.
///
/// Only the asset names are read; every other field of the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRelease {
    pub assets: Vec<FeedAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedAsset {
    pub name: String,
}

impl FeedRelease {
    /// Queries a feed endpoint.
    ///
    /// # Errors
    ///
    /// * `DownloadError::Network` / `DownloadError::HttpError` when the feed is unreachable
    ///   or answers with a non-success status
    /// * `DownloadError::EmptyResponse` / `DownloadError::InvalidResponse` when the body is
    ///   blank or is not a release document
    pub fn fetch(url: &str, timeout: Option<Duration>) -> Result<Self> {
        let release: Self = Http::json(url, timeout)?;
        trace!("{} advertised {} assets", url, release.assets.len());
        Ok(release)
    }

    /// Package names advertised by this release: asset names ending in the archive suffix,
    /// with the suffix stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use gnfnt_dl::feed::{FeedAsset, FeedRelease};
    ///
    /// let release = FeedRelease {
    ///     assets: vec![
    ///         FeedAsset { name: "FiraCode.zip".into() },
    ///         FeedAsset { name: "readme.txt".into() },
    ///     ],
    /// };
    /// assert_eq!(release.package_names().collect::<Vec<_>>(), vec!["FiraCode"]);
    /// ```
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.assets
            .iter()
            .filter_map(|asset| asset.name.strip_suffix(ARCHIVE_SUFFIX))
            .filter(|name| !name.is_empty())
    }
}
