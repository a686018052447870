use gnfnt_config::error::ConfigError;
use gnfnt_core::{context::GnfntContext, GnfntResult};
use nu_ansi_term::Color::{Cyan, Green, Red, Yellow};
use tracing::{error, info};

use crate::utils::{Colored, Icons};

pub fn list_repos(ctx: &GnfntContext) {
    let registry = ctx.registry();

    if registry.list().is_empty() {
        info!("No repositories registered");
        return;
    }

    info!("Registered repositories:");
    for url in registry.list() {
        info!("  {}", Colored(Cyan, url));
    }
}

/// Registers `url`. A malformed URL is reported and ignored; only a failed write is an error.
pub fn add_repo(ctx: &GnfntContext, url: &str) -> GnfntResult<()> {
    let mut registry = ctx.registry();

    match registry.add(url) {
        Ok(true) => info!("{} Added repository: {}", Colored(Green, Icons::CHECK), url),
        Ok(false) => info!(
            "{} Repository already exists: {}",
            Colored(Yellow, Icons::WARNING),
            url
        ),
        Err(err @ ConfigError::InvalidRepositoryUrl(_)) => {
            error!("{} {}", Colored(Red, Icons::CROSS), err);
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub fn remove_repo(ctx: &GnfntContext, url: &str) -> GnfntResult<()> {
    let mut registry = ctx.registry();

    if registry.remove(url)? {
        info!("{} Removed repository: {}", Colored(Green, Icons::CHECK), url);
    } else {
        info!(
            "{} Repository not found: {}",
            Colored(Yellow, Icons::WARNING),
            url
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gnfnt_config::config::Config;
    use gnfnt_core::events::NullSink;
    use tempfile::tempdir;

    use super::*;

    fn context(root: &std::path::Path) -> GnfntContext {
        GnfntContext::new(Config::isolated(root), Arc::new(NullSink))
    }

    #[test]
    fn test_add_and_remove_repo() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());

        add_repo(&ctx, "https://example.com/releases/latest").unwrap();
        add_repo(&ctx, "https://example.com/releases/latest").unwrap();
        let registry = ctx.registry();
        assert_eq!(registry.list().len(), 2);
        assert!(registry.contains("https://example.com/releases/latest"));

        remove_repo(&ctx, "https://example.com/releases/latest").unwrap();
        remove_repo(&ctx, "https://example.com/releases/latest").unwrap();
        assert!(!ctx.registry().contains("https://example.com/releases/latest"));
        list_repos(&ctx);
    }

    #[test]
    fn test_add_rejects_invalid_url() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());

        add_repo(&ctx, "not a url").unwrap();
        add_repo(&ctx, "ftp://example.com/feed").unwrap();

        assert!(!ctx.config().registry_path.exists());
        assert!(!ctx.registry().contains("not a url"));
    }
}
