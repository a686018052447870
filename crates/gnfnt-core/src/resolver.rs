use std::{collections::HashSet, time::Duration};

use gnfnt_config::registry::RepositoryRegistry;
use gnfnt_dl::{error::DownloadError, feed::FeedRelease};
use tracing::{debug, info, warn};

use crate::GnfntResult;

/// Anything that can list the package names a feed advertises.
pub trait FeedSource {
    fn package_names(&self, url: &str) -> Result<Vec<String>, DownloadError>;
}

/// Queries feeds over HTTP with a bounded timeout.
#[derive(Debug, Clone, Copy)]
pub struct HttpFeedSource {
    timeout: Duration,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
        }
    }
}

impl FeedSource for HttpFeedSource {
    fn package_names(&self, url: &str) -> Result<Vec<String>, DownloadError> {
        let release = FeedRelease::fetch(url, Some(self.timeout))?;
        Ok(release.package_names().map(String::from).collect())
    }
}

/// Outcome of querying every registered feed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Union of the package names of every valid feed.
    pub packages: HashSet<String>,
    /// Feeds that were unreachable, answered with an error status, or sent an unusable body.
    pub invalid_feeds: Vec<String>,
    /// How many feeds were queried.
    pub queried: usize,
}

impl Resolution {
    /// Package names in display order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.packages.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// True when there were feeds to ask and every one of them was invalid.
    ///
    /// An empty registry, or reachable feeds that simply advertise nothing, is not a failure.
    pub fn all_feeds_failed(&self) -> bool {
        self.queried > 0 && self.invalid_feeds.len() == self.queried
    }
}

/// Merges the package lists of several feeds.
pub struct FeedResolver<S = HttpFeedSource> {
    source: S,
}

impl<S: FeedSource> FeedResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
        }
    }

    /// Queries every feed in `feeds`. Never fails: a bad feed is recorded in
    /// [`Resolution::invalid_feeds`] and the rest are still queried.
    pub fn resolve(&self, feeds: &[String]) -> Resolution {
        let mut resolution = Resolution {
            queried: feeds.len(),
            ..Default::default()
        };

        for feed in feeds {
            match self.source.package_names(feed) {
                Ok(names) => {
                    debug!("{} advertises {} packages", feed, names.len());
                    resolution.packages.extend(names);
                }
                Err(err) => {
                    if err.is_network() {
                        warn!("Repository {} is unreachable: {}", feed, err);
                    } else {
                        warn!("Repository {} sent an invalid response: {}", feed, err);
                    }
                    resolution.invalid_feeds.push(feed.clone());
                }
            }
        }

        resolution
    }

    /// Resolves the feeds of `registry` and, when `prune` is set, unregisters the invalid ones.
    pub fn resolve_registry(
        &self,
        registry: &mut RepositoryRegistry,
        prune: bool,
    ) -> GnfntResult<Resolution> {
        let resolution = self.resolve(registry.list());

        if prune && !resolution.invalid_feeds.is_empty() {
            for removed in registry.prune(&resolution.invalid_feeds)? {
                info!("Removed invalid repository: {}", removed);
            }
        }

        Ok(resolution)
    }
}
