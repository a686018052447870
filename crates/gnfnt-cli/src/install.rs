use gnfnt_core::{
    context::GnfntContext,
    error::GnfntError,
    install::{InstallOutcome, PackageInstaller},
    GnfntResult,
};
use nu_ansi_term::Color::{Green, Red, Yellow};
use tracing::{error, info, warn};

use crate::utils::{Colored, Icons};

const BULK_WARNING: &str = "You are about to install all of the Nerd Fonts content. This is not \
                            recommended on systems with small storage sizes. Continue?";

/// Tally of one install run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstallSummary {
    pub installed: usize,
    pub already_installed: usize,
    pub failed: usize,
}

impl InstallSummary {
    fn record(&mut self, name: &str, outcome: GnfntResult<InstallOutcome>) {
        match outcome {
            Ok(InstallOutcome::Installed(report)) => {
                info!(
                    "{} {} installed ({} files, {} skipped)",
                    Colored(Green, Icons::CHECK),
                    name,
                    report.installed.len(),
                    report.skipped.len()
                );
                self.installed += 1;
            }
            Ok(InstallOutcome::AlreadyInstalled) => {
                info!(
                    "{} {} is already installed, skipping download",
                    Colored(Green, Icons::CHECK),
                    name
                );
                self.already_installed += 1;
            }
            Ok(InstallOutcome::NoValidFiles) => {
                warn!(
                    "No valid font files found in {}. The font may not exist.",
                    name
                );
                self.failed += 1;
            }
            Ok(InstallOutcome::DownloadFailed(reason)) => {
                error!(
                    "{} Failed to download {}: {}. Check the font name and try again.",
                    Colored(Red, Icons::CROSS),
                    name,
                    reason
                );
                self.failed += 1;
            }
            Ok(InstallOutcome::ExtractFailed(reason)) => {
                error!(
                    "{} Failed to extract {}: {}",
                    Colored(Red, Icons::CROSS),
                    name,
                    reason
                );
                self.failed += 1;
            }
            Ok(InstallOutcome::InvalidName) => {
                error!(
                    "{} {} is not a valid font name",
                    Colored(Red, Icons::CROSS),
                    name
                );
                self.failed += 1;
            }
            Err(err) => {
                error!("{} Failed to install {}: {}", Colored(Red, Icons::CROSS), name, err);
                self.failed += 1;
            }
        }
    }

    fn report(&self) {
        let failed = if self.failed > 0 {
            Colored(Red, self.failed).to_string()
        } else {
            self.failed.to_string()
        };
        info!(
            "Done: {} installed, {} already installed, {} failed",
            Colored(Green, self.installed),
            Colored(Yellow, self.already_installed),
            failed
        );
    }
}

/// Installs `names` strictly in order. A failing package never stops the rest.
pub fn run_installs(installer: &PackageInstaller, names: &[String]) -> InstallSummary {
    let mut summary = InstallSummary::default();
    let total = names.len();

    for (index, name) in names.iter().enumerate() {
        let outcome = installer.install_package(name, index + 1, total);
        summary.record(name, outcome);
    }

    summary
}

/// Installs the named fonts, then refreshes the font cache once.
pub fn install_fonts(ctx: &GnfntContext, names: &[String]) -> GnfntResult<()> {
    let summary = run_installs(&ctx.package_installer(), names);
    ctx.cache_refresher().refresh();
    summary.report();
    Ok(())
}

/// Installs every font the registered feeds advertise after `confirm` agrees.
///
/// Nothing touches the network when the confirmation is declined.
pub fn install_all<F>(ctx: &GnfntContext, keep_invalid: bool, confirm: F) -> GnfntResult<()>
where
    F: FnOnce(&str) -> GnfntResult<bool>,
{
    if !confirm(BULK_WARNING)? {
        info!("{} Installation aborted.", Colored(Red, Icons::CROSS));
        return Ok(());
    }

    let resolution = ctx.resolve_available(!keep_invalid)?;
    if resolution.all_feeds_failed() {
        return Err(GnfntError::NoReachableFeed);
    }
    if resolution.is_empty() {
        info!("No fonts available from the registered repositories");
        return Ok(());
    }

    let names: Vec<String> = resolution.sorted().into_iter().map(String::from).collect();
    info!("Installing {} fonts", names.len());

    install_fonts(ctx, &names)
}
