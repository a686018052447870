use std::path::PathBuf;

use gnfnt_core::{
    cache::RefreshOutcome,
    local::{LocalInstaller, LocalOutcome},
};
use nu_ansi_term::Color::{Green, Red};
use tracing::{error, info, warn};

use crate::utils::{Colored, Icons};

/// Installs fonts from local paths and reports each one. Returns how many paths failed.
pub fn install_local(installer: &LocalInstaller, paths: &[PathBuf]) -> usize {
    let report = installer.install_from_paths(paths);
    let mut failed = 0;

    for (path, outcome) in &report.results {
        let path = path.display();
        match outcome {
            Ok(LocalOutcome::Installed(payload)) => {
                info!(
                    "{} {}: {} installed, {} skipped",
                    Colored(Green, Icons::CHECK),
                    path,
                    payload.installed.len(),
                    payload.skipped.len()
                );
            }
            Ok(LocalOutcome::NotFound) => {
                error!("{} File not found: {}", Colored(Red, Icons::CROSS), path);
                failed += 1;
            }
            Ok(LocalOutcome::Unsupported) => {
                warn!("Unsupported file type, skipping: {}", path);
                failed += 1;
            }
            Ok(LocalOutcome::NoValidFiles) => {
                warn!("No valid font files found in {}", path);
                failed += 1;
            }
            Ok(LocalOutcome::ExtractFailed(reason)) => {
                error!(
                    "{} Failed to extract {}: {}",
                    Colored(Red, Icons::CROSS),
                    path,
                    reason
                );
                failed += 1;
            }
            Err(err) => {
                error!("{} Failed to install {}: {}", Colored(Red, Icons::CROSS), path, err);
                failed += 1;
            }
        }
    }

    match report.refresh {
        RefreshOutcome::Refreshed => info!("{} Font cache updated", Colored(Green, Icons::CHECK)),
        RefreshOutcome::RestartRequired => {}
        RefreshOutcome::Failed(_) => warn!("Font cache refresh failed; new fonts may need a restart"),
    }

    failed
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gnfnt_config::config::Config;
    use gnfnt_core::{cache::RestartNotice, events::NullSink};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_install_local_counts_failures() {
        let dir = tempdir().unwrap();
        let config = Config::isolated(dir.path());
        let installer = LocalInstaller::new(&config, Box::new(RestartNotice), Arc::new(NullSink));

        let good = dir.path().join("good.otf");
        std::fs::write(&good, b"otf").unwrap();
        let missing = dir.path().join("missing.ttf");

        let failed = install_local(&installer, &[missing, good]);

        assert_eq!(failed, 1);
        assert!(config.font_dir.join("good.otf").exists());
    }
}
