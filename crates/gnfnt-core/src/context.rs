use gnfnt_config::{config::Config, registry::RepositoryRegistry};

use crate::{
    cache::{self, CacheRefresher},
    events::EventSinkHandle,
    install::PackageInstaller,
    local::LocalInstaller,
    resolver::{FeedResolver, HttpFeedSource, Resolution},
    state::InstallationState,
    GnfntResult,
};

/// Wires the configuration and an event sink into the components of one invocation.
pub struct GnfntContext {
    config: Config,
    events: EventSinkHandle,
}

impl GnfntContext {
    pub fn new(config: Config, events: EventSinkHandle) -> Self {
        Self {
            config,
            events,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> RepositoryRegistry {
        RepositoryRegistry::load(&self.config.registry_path)
    }

    pub fn resolver(&self) -> FeedResolver<HttpFeedSource> {
        FeedResolver::new(HttpFeedSource::new(self.config.feed_timeout))
    }

    /// Resolves the packages of every registered feed, unregistering invalid feeds when
    /// `prune` is set.
    pub fn resolve_available(&self, prune: bool) -> GnfntResult<Resolution> {
        let mut registry = self.registry();
        self.resolver().resolve_registry(&mut registry, prune)
    }

    pub fn installation_state(&self) -> InstallationState {
        InstallationState::new(&self.config.font_dir)
    }

    pub fn package_installer(&self) -> PackageInstaller {
        PackageInstaller::new(&self.config, self.events.clone())
    }

    pub fn local_installer(&self) -> LocalInstaller {
        LocalInstaller::new(&self.config, self.cache_refresher(), self.events.clone())
    }

    pub fn cache_refresher(&self) -> Box<dyn CacheRefresher + Send + Sync> {
        cache::for_os(self.config.os)
    }
}
