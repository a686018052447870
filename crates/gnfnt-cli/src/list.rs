use gnfnt_core::{
    context::GnfntContext, error::GnfntError, resolver::Resolution, state::InstallationState,
    GnfntResult,
};
use nu_ansi_term::Color::{Cyan, Green};
use tracing::info;

use crate::utils::{Colored, Icons};

/// Sorted package names paired with their installed state.
pub fn listing<'a>(resolution: &'a Resolution, state: &InstallationState) -> Vec<(&'a str, bool)> {
    resolution
        .sorted()
        .into_iter()
        .map(|name| (name, state.is_installed(name)))
        .collect()
}

pub fn list_fonts(ctx: &GnfntContext, keep_invalid: bool) -> GnfntResult<()> {
    let resolution = ctx.resolve_available(!keep_invalid)?;
    if resolution.all_feeds_failed() {
        return Err(GnfntError::NoReachableFeed);
    }

    let entries = listing(&resolution, &ctx.installation_state());
    let installed_count = entries.iter().filter(|(_, installed)| *installed).count();

    for (name, installed) in &entries {
        if *installed {
            info!("{} {}", Colored(Green, Icons::INSTALLED), name);
        } else {
            info!("{} {}", Icons::NOT_INSTALLED, name);
        }
    }

    info!(
        "{} fonts available, {} installed",
        Colored(Cyan, entries.len()),
        Colored(Green, installed_count)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gnfnt_config::config::Config;
    use gnfnt_core::events::NullSink;
    use gnfnt_dl::test_utils::{serve, Route};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_listing_is_sorted_and_marked() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("HackNerdFont-Regular.ttf"), b"").unwrap();

        let resolution = Resolution {
            packages: ["Meslo", "Hack", "FiraCode"]
                .into_iter()
                .map(String::from)
                .collect(),
            invalid_feeds: vec![],
            queried: 1,
        };
        let state = InstallationState::new(dir.path());

        assert_eq!(
            listing(&resolution, &state),
            vec![("FiraCode", false), ("Hack", true), ("Meslo", false)]
        );
    }

    #[test]
    fn test_feed_without_archives_lists_nothing() {
        let dir = tempdir().unwrap();
        let ctx = GnfntContext::new(Config::isolated(dir.path()), Arc::new(NullSink));
        let base = serve(vec![("/latest", Route::ok(r#"{"assets":[]}"#))]);
        let feed = format!("{base}/latest");

        let mut registry = ctx.registry();
        let default_feed = registry.list()[0].clone();
        registry.remove(&default_feed).unwrap();
        registry.add(&feed).unwrap();

        list_fonts(&ctx, false).unwrap();
        assert!(ctx.registry().contains(&feed));
    }

    #[test]
    fn test_empty_registry_lists_nothing() {
        let dir = tempdir().unwrap();
        let ctx = GnfntContext::new(Config::isolated(dir.path()), Arc::new(NullSink));

        let mut registry = ctx.registry();
        let default_feed = registry.list()[0].clone();
        registry.remove(&default_feed).unwrap();

        list_fonts(&ctx, false).unwrap();
    }
}
