use std::path::{Path, PathBuf};

use gnfnt_config::config::Config;
use gnfnt_dl::{
    archive::extract_archive, download::Download, error::DownloadError, types::Progress,
};
use tracing::{debug, warn};

use crate::{
    constants::ARCHIVE_SUFFIX,
    events::{progress_bridge, EventSinkHandle, InstallEvent},
    payload::{collect_font_files, install_fonts, PayloadReport, Transfer},
    staging::StagingDir,
    state::InstallationState,
    GnfntResult,
};

pub type ProgressCallback = Box<dyn Fn(Progress) + Send + Sync>;

/// Fetches a package archive to a local file.
pub trait ArchiveFetcher {
    fn fetch(&self, url: &str, dest: &Path, on_progress: ProgressCallback)
        -> Result<u64, DownloadError>;
}

/// Streams archives over HTTP with the shared agent.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpArchiveFetcher;

impl ArchiveFetcher for HttpArchiveFetcher {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
        on_progress: ProgressCallback,
    ) -> Result<u64, DownloadError> {
        Download::new(url, dest).progress(on_progress).execute()
    }
}

/// Result of installing one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(PayloadReport),
    AlreadyInstalled,
    /// The archive held no `.ttf`/`.otf` file.
    NoValidFiles,
    DownloadFailed(String),
    ExtractFailed(String),
    /// The name would leave the staging directory or change the download path.
    InvalidName,
}

/// Package names are single path components: no separators and no `..`.
pub fn is_valid_package_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

/// Downloads, unpacks and installs packages one at a time.
pub struct PackageInstaller {
    font_dir: PathBuf,
    temp_root: PathBuf,
    download_base: String,
    state: InstallationState,
    fetcher: Box<dyn ArchiveFetcher + Send + Sync>,
    events: EventSinkHandle,
}

impl PackageInstaller {
    pub fn new(config: &Config, events: EventSinkHandle) -> Self {
        Self {
            font_dir: config.font_dir.clone(),
            temp_root: config.temp_root.clone(),
            download_base: config.download_base.clone(),
            state: InstallationState::new(&config.font_dir),
            fetcher: Box::new(HttpArchiveFetcher),
            events,
        }
    }

    pub fn with_fetcher<F>(mut self, fetcher: F) -> Self
    where
        F: ArchiveFetcher + Send + Sync + 'static,
    {
        self.fetcher = Box::new(fetcher);
        self
    }

    /// Archive URL for `name`: `<download_base><name>.zip`.
    pub fn download_url(&self, name: &str) -> String {
        let base = self.download_base.trim_end_matches('/');
        format!("{base}/{name}{ARCHIVE_SUFFIX}")
    }

    /// Installs `name`, which is package `index` (1-based) of `total` in the current batch.
    ///
    /// Download and extraction problems are reported through the outcome so the caller can
    /// carry on with the next package. The staging directory is gone by the time this
    /// returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Fails only when the staging directory cannot be created or a font cannot be placed.
    pub fn install_package(
        &self,
        name: &str,
        index: usize,
        total: usize,
    ) -> GnfntResult<InstallOutcome> {
        if !is_valid_package_name(name) {
            warn!("Refusing to install {:?}: not a valid package name", name);
            return Ok(InstallOutcome::InvalidName);
        }

        if self.state.is_installed(name) {
            debug!("{} is already installed", name);
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        let staging = StagingDir::create(&self.temp_root)?;
        let archive = staging.file(&format!("{name}{ARCHIVE_SUFFIX}"));
        let url = self.download_url(name);

        debug!("Downloading {} to {}", url, archive.display());
        let on_progress = progress_bridge(self.events.clone(), name.to_string(), index, total);
        if let Err(err) = self.fetcher.fetch(&url, &archive, on_progress) {
            warn!("Failed to download {}: {}", name, err);
            return Ok(InstallOutcome::DownloadFailed(err.to_string()));
        }

        self.events.emit(InstallEvent::Extracting {
            package: name.to_string(),
        });
        let extract_dir = staging.extract_dir();
        if let Err(err) = extract_archive(&archive, &extract_dir) {
            warn!("Failed to extract {}: {}", name, err);
            return Ok(InstallOutcome::ExtractFailed(err.to_string()));
        }

        let fonts = collect_font_files(&extract_dir)?;
        if fonts.is_empty() {
            return Ok(InstallOutcome::NoValidFiles);
        }

        let report = install_fonts(&fonts, &self.font_dir, Transfer::Move, name, &self.events)?;
        Ok(InstallOutcome::Installed(report))
    }
}
