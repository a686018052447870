use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
    time::Duration,
};

use gnfnt_core::events::{EventSink, InstallEvent};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use nu_ansi_term::Color::{Cyan, Green, Yellow};
use tracing::info;

use crate::utils::{progress_enabled, Colored, Icons};

/// Shared MultiProgress instance for suspend/stop from other modules.
static MULTI: LazyLock<MultiProgress> = LazyLock::new(MultiProgress::new);

/// Pause progress display, run the closure, then resume.
pub fn suspend<F: FnOnce()>(f: F) {
    MULTI.suspend(f);
}

/// Stop and clear all progress bars.
pub fn stop() {
    MULTI.clear().ok();
}

fn download_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix}  {wide_bar:.cyan/dim}  {bytes}/{total_bytes}  {bytes_per_sec}  {eta}",
    )
    .unwrap()
    .progress_chars("━━─")
}

/// Used when the server does not announce a size.
fn unsized_download_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix}  {bytes}  {bytes_per_sec}").unwrap()
}

fn create_download_job(prefix: String, total: Option<u64>) -> ProgressBar {
    let pb = if !progress_enabled() {
        ProgressBar::hidden()
    } else if let Some(total) = total {
        let pb = ProgressBar::new(total);
        pb.set_style(download_style());
        pb
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(unsized_download_style());
        pb
    };

    let pb = MULTI.add(pb);
    pb.set_prefix(prefix);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Renders install events as progress bars and log lines.
///
/// One bar per package download, keyed by package name, cleared once the download finishes.
#[derive(Default)]
pub struct ProgressSink {
    jobs: Mutex<HashMap<String, ProgressBar>>,
}

impl ProgressSink {
    fn with_jobs<R>(&self, f: impl FnOnce(&mut HashMap<String, ProgressBar>) -> R) -> R {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut jobs)
    }
}

impl EventSink for ProgressSink {
    fn emit(&self, event: InstallEvent) {
        match event {
            InstallEvent::DownloadStarting {
                package,
                index,
                count,
                total,
            } => {
                info!("Downloading {} [{}/{}]", Colored(Cyan, &package), index, count);
                let pb = create_download_job(format!("{}", Colored(Cyan, &package)), total);
                self.with_jobs(|jobs| jobs.insert(package, pb));
            }
            InstallEvent::DownloadProgress {
                package,
                current,
                ..
            } => {
                self.with_jobs(|jobs| {
                    if let Some(pb) = jobs.get(&package) {
                        pb.set_position(current);
                    }
                });
            }
            InstallEvent::DownloadComplete {
                package, ..
            } => {
                if let Some(pb) = self.with_jobs(|jobs| jobs.remove(&package)) {
                    pb.finish_and_clear();
                }
            }
            InstallEvent::Extracting {
                package,
            } => {
                info!("Extracting {}...", package);
            }
            InstallEvent::FontInstalled {
                file, ..
            } => {
                info!("{} Installed {}", Colored(Green, Icons::CHECK), file);
            }
            InstallEvent::FontSkipped {
                file, ..
            } => {
                info!(
                    "{} {} already exists, skipping",
                    Colored(Yellow, Icons::WARNING),
                    file
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_job_lifecycle() {
        let sink = ProgressSink::default();
        sink.emit(InstallEvent::DownloadStarting {
            package: "Hack".into(),
            index: 1,
            count: 1,
            total: None,
        });
        assert_eq!(sink.with_jobs(|jobs| jobs.len()), 1);

        sink.emit(InstallEvent::DownloadProgress {
            package: "Hack".into(),
            current: 42,
            total: None,
        });
        assert_eq!(
            sink.with_jobs(|jobs| jobs.get("Hack").map(|pb| pb.position())),
            Some(42)
        );

        sink.emit(InstallEvent::DownloadComplete {
            package: "Hack".into(),
            total: 42,
        });
        assert_eq!(sink.with_jobs(|jobs| jobs.len()), 0);
        stop();
    }
}
