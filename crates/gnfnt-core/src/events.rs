use std::sync::{Arc, Mutex};

use gnfnt_dl::types::Progress;

/// Events emitted while packages are fetched and installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    /// Archive download is starting. `total` is unknown when the server sends no size.
    DownloadStarting {
        package: String,
        index: usize,
        count: usize,
        total: Option<u64>,
    },
    DownloadProgress {
        package: String,
        current: u64,
        total: Option<u64>,
    },
    DownloadComplete {
        package: String,
        total: u64,
    },
    /// Archive is being unpacked into the staging directory.
    Extracting { package: String },
    /// A font file was placed in the font directory.
    FontInstalled { package: String, file: String },
    /// A font file was left alone because the destination already exists.
    FontSkipped { package: String, file: String },
}

/// Trait for consuming events.
///
/// Each frontend provides its own implementation.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: InstallEvent);
}

/// Shared handle to an event sink.
pub type EventSinkHandle = Arc<dyn EventSink>;

/// No-op event sink for headless operation.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: InstallEvent) {}
}

/// Collector sink that stores all events for inspection.
#[derive(Default)]
pub struct CollectorSink {
    events: Mutex<Vec<InstallEvent>>,
}

impl CollectorSink {
    pub fn events(&self) -> Vec<InstallEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<InstallEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for CollectorSink {
    fn emit(&self, event: InstallEvent) {
        self.lock().push(event);
    }
}

/// Creates a download progress callback that forwards to `events`.
///
/// `index` and `count` only describe the package's position in the current batch.
pub fn progress_bridge(
    events: EventSinkHandle,
    package: String,
    index: usize,
    count: usize,
) -> Box<dyn Fn(Progress) + Send + Sync> {
    Box::new(move |progress| {
        let event = match progress {
            Progress::Starting {
                total,
            } => {
                InstallEvent::DownloadStarting {
                    package: package.clone(),
                    index,
                    count,
                    total,
                }
            }
            Progress::Chunk {
                current,
                total,
            } => {
                InstallEvent::DownloadProgress {
                    package: package.clone(),
                    current,
                    total,
                }
            }
            Progress::Complete {
                total,
            } => {
                InstallEvent::DownloadComplete {
                    package: package.clone(),
                    total,
                }
            }
        };
        events.emit(event);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink() {
        let sink = NullSink;
        sink.emit(InstallEvent::Extracting {
            package: "Hack".into(),
        });
    }

    #[test]
    fn test_collector_sink_through_handle() {
        let collector = Arc::new(CollectorSink::default());
        let sink: EventSinkHandle = collector.clone();
        assert!(collector.is_empty());

        sink.emit(InstallEvent::FontInstalled {
            package: "Hack".into(),
            file: "HackNerdFont-Regular.ttf".into(),
        });
        sink.emit(InstallEvent::FontSkipped {
            package: "Hack".into(),
            file: "HackNerdFont-Bold.ttf".into(),
        });

        assert_eq!(collector.len(), 2);
        assert!(matches!(
            &collector.events()[1],
            InstallEvent::FontSkipped { file, .. } if file == "HackNerdFont-Bold.ttf"
        ));
    }

    #[test]
    fn test_progress_bridge_maps_all_variants() {
        let collector = Arc::new(CollectorSink::default());
        let bridge = progress_bridge(collector.clone(), "FiraCode".into(), 2, 5);

        bridge(Progress::Starting {
            total: None,
        });
        bridge(Progress::Chunk {
            current: 10,
            total: None,
        });
        bridge(Progress::Complete {
            total: 10,
        });

        assert_eq!(
            collector.events(),
            vec![
                InstallEvent::DownloadStarting {
                    package: "FiraCode".into(),
                    index: 2,
                    count: 5,
                    total: None,
                },
                InstallEvent::DownloadProgress {
                    package: "FiraCode".into(),
                    current: 10,
                    total: None,
                },
                InstallEvent::DownloadComplete {
                    package: "FiraCode".into(),
                    total: 10,
                },
            ]
        );
    }

    #[test]
    fn test_event_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NullSink>();
        assert_send_sync::<CollectorSink>();
    }
}
