use std::{
    io::{Cursor, Write},
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::cache::{CacheRefresher, RefreshOutcome};

/// Builds an in-memory zip archive with stored entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    zip_with_symlinks(entries, &[])
}

/// Like [`zip_bytes`], followed by symlink entries given as `(name, target)`.
pub fn zip_with_symlinks(entries: &[(&str, &[u8])], links: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    for (name, target) in links {
        writer.add_symlink(*name, *target, options).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// True when no staging directory is left under `temp_root`.
pub fn staging_is_clean(temp_root: &Path) -> bool {
    match std::fs::read_dir(temp_root) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

/// Cache refresher that only counts invocations.
#[derive(Clone, Default)]
pub struct CountingRefresher(pub Arc<AtomicUsize>);

impl CountingRefresher {
    pub fn calls(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl CacheRefresher for CountingRefresher {
    fn refresh(&self) -> RefreshOutcome {
        self.0.fetch_add(1, Ordering::SeqCst);
        RefreshOutcome::Refreshed
    }
}
