use std::path::{Path, PathBuf};

use gnfnt_config::config::Config;
use gnfnt_dl::archive::extract_archive;
use tracing::{debug, warn};

use crate::{
    cache::{CacheRefresher, RefreshOutcome},
    constants::ARCHIVE_EXTENSION,
    events::{EventSinkHandle, InstallEvent},
    payload::{collect_font_files, install_fonts, is_font_file, PayloadReport, Transfer},
    staging::StagingDir,
    GnfntResult,
};

/// Result of installing from one local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOutcome {
    Installed(PayloadReport),
    NotFound,
    /// Neither a font file nor a zip archive.
    Unsupported,
    NoValidFiles,
    ExtractFailed(String),
}

/// Per-path results of a local install, plus the single cache refresh that followed.
#[derive(Debug)]
pub struct LocalReport {
    pub results: Vec<(PathBuf, GnfntResult<LocalOutcome>)>,
    pub refresh: RefreshOutcome,
}

/// Installs fonts from files on disk, bypassing the feeds.
pub struct LocalInstaller {
    font_dir: PathBuf,
    temp_root: PathBuf,
    refresher: Box<dyn CacheRefresher + Send + Sync>,
    events: EventSinkHandle,
}

impl LocalInstaller {
    pub fn new(
        config: &Config,
        refresher: Box<dyn CacheRefresher + Send + Sync>,
        events: EventSinkHandle,
    ) -> Self {
        Self {
            font_dir: config.font_dir.clone(),
            temp_root: config.temp_root.clone(),
            refresher,
            events,
        }
    }

    /// Installs every path in order, never stopping early, then refreshes the font cache
    /// exactly once.
    ///
    /// Font files are copied and left in place. Zip archives are unpacked into their own
    /// staging directory, which is removed before the next path is handled.
    pub fn install_from_paths(&self, paths: &[PathBuf]) -> LocalReport {
        let results = paths
            .iter()
            .map(|path| {
                let outcome = self.install_path(path);
                if let Err(ref err) = outcome {
                    warn!("Failed to install {}: {}", path.display(), err);
                }
                (path.clone(), outcome)
            })
            .collect();

        let refresh = self.refresher.refresh();

        LocalReport {
            results,
            refresh,
        }
    }

    fn install_path(&self, path: &Path) -> GnfntResult<LocalOutcome> {
        if !path.exists() {
            return Ok(LocalOutcome::NotFound);
        }

        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if is_font_file(path) {
            let report = install_fonts(
                &[path.to_path_buf()],
                &self.font_dir,
                Transfer::Copy,
                &label,
                &self.events,
            )?;
            return Ok(LocalOutcome::Installed(report));
        }

        let is_archive = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION));
        if !is_archive {
            debug!("{} is not a font or archive", path.display());
            return Ok(LocalOutcome::Unsupported);
        }

        let staging = StagingDir::create(&self.temp_root)?;
        let extract_dir = staging.extract_dir();

        self.events.emit(InstallEvent::Extracting {
            package: label.clone(),
        });
        if let Err(err) = extract_archive(path, &extract_dir) {
            return Ok(LocalOutcome::ExtractFailed(err.to_string()));
        }

        let fonts = collect_font_files(&extract_dir)?;
        if fonts.is_empty() {
            return Ok(LocalOutcome::NoValidFiles);
        }

        let report = install_fonts(&fonts, &self.font_dir, Transfer::Move, &label, &self.events)?;
        Ok(LocalOutcome::Installed(report))
    }
}
