use std::{
    fs,
    path::{Path, PathBuf},
};

use gnfnt_utils::fs::{ensure_dir_exists, move_file};
use tracing::{debug, trace};

use crate::{
    constants::FONT_EXTENSIONS,
    error::{ErrorContext, GnfntError},
    events::{EventSinkHandle, InstallEvent},
    GnfntResult,
};

/// How a payload file reaches the font directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Used for files unpacked into a staging directory.
    Move,
    /// Used for user-supplied files, which are left where they are.
    Copy,
}

/// Files placed by one install.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PayloadReport {
    /// Destination paths of newly placed files.
    pub installed: Vec<PathBuf>,
    /// Destination paths that already existed and were left alone.
    pub skipped: Vec<PathBuf>,
}

impl PayloadReport {
    /// True when no font file was found at all.
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty() && self.skipped.is_empty()
    }
}

/// Whether `path` has a font extension, ignoring ASCII case.
pub fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|font_ext| ext.eq_ignore_ascii_case(font_ext))
        })
}

/// Collects every font file below `root`, descending into sub-directories.
///
/// Symlinks are neither followed nor collected. The result is sorted so installs happen in a
/// stable order.
pub fn collect_font_files(root: &Path) -> GnfntResult<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries =
            fs::read_dir(&dir).with_context(|| format!("reading directory {}", dir.display()))?;

        for entry in entries {
            let entry = entry.with_context(|| format!("reading directory {}", dir.display()))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .with_context(|| format!("inspecting {}", path.display()))?;

            if file_type.is_symlink() {
                debug!("Ignoring symlink {}", path.display());
            } else if file_type.is_dir() {
                pending.push(path);
            } else if is_font_file(&path) {
                found.push(path);
            } else {
                trace!("Ignoring {}", path.display());
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Places a single font file into `font_dir`, keeping its file name.
///
/// An existing destination is never overwritten; `Ok(false)` reports the skip.
pub fn place_font(source: &Path, font_dir: &Path, transfer: Transfer) -> GnfntResult<bool> {
    let file_name = source.file_name().ok_or_else(|| {
        GnfntError::Custom(format!("{} has no file name", source.display()))
    })?;
    let target = font_dir.join(file_name);

    if target.exists() {
        debug!("{} already exists, skipping", target.display());
        return Ok(false);
    }

    ensure_dir_exists(font_dir)?;
    match transfer {
        Transfer::Move => move_file(source, &target)?,
        Transfer::Copy => {
            fs::copy(source, &target).with_context(|| {
                format!("copying {} to {}", source.display(), target.display())
            })?;
        }
    }

    trace!("Placed {}", target.display());
    Ok(true)
}

/// Places every font file in `sources` into `font_dir` and reports each one to `events`.
pub fn install_fonts(
    sources: &[PathBuf],
    font_dir: &Path,
    transfer: Transfer,
    package: &str,
    events: &EventSinkHandle,
) -> GnfntResult<PayloadReport> {
    let mut report = PayloadReport::default();

    for source in sources {
        let file = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = font_dir.join(&file);

        if place_font(source, font_dir, transfer)? {
            events.emit(InstallEvent::FontInstalled {
                package: package.to_string(),
                file,
            });
            report.installed.push(target);
        } else {
            events.emit(InstallEvent::FontSkipped {
                package: package.to_string(),
                file,
            });
            report.skipped.push(target);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::tempdir;

    use super::*;
    use crate::events::CollectorSink;

    #[test]
    fn test_is_font_file() {
        assert!(is_font_file(Path::new("a/Hack-Regular.ttf")));
        assert!(is_font_file(Path::new("Hack-Regular.OTF")));
        assert!(!is_font_file(Path::new("LICENSE.md")));
        assert!(!is_font_file(Path::new("ttf")));
        assert!(!is_font_file(Path::new("Hack.woff2")));
    }

    #[test]
    fn test_collect_font_files_recursive() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("static/mono")).unwrap();
        fs::write(root.join("b.ttf"), b"").unwrap();
        fs::write(root.join("static/a.otf"), b"").unwrap();
        fs::write(root.join("static/mono/c.TTF"), b"").unwrap();
        fs::write(root.join("README.md"), b"").unwrap();

        let found = collect_font_files(root).unwrap();
        assert_eq!(
            found,
            vec![
                root.join("b.ttf"),
                root.join("static/a.otf"),
                root.join("static/mono/c.TTF"),
            ]
        );
    }

    #[test]
    fn test_place_font_move_and_skip() {
        let dir = tempdir().unwrap();
        let font_dir = dir.path().join("fonts");
        let source = dir.path().join("Hack.ttf");
        fs::write(&source, b"new").unwrap();

        assert!(place_font(&source, &font_dir, Transfer::Move).unwrap());
        assert!(!source.exists());
        assert_eq!(fs::read(font_dir.join("Hack.ttf")).unwrap(), b"new");

        fs::write(&source, b"newer").unwrap();
        assert!(!place_font(&source, &font_dir, Transfer::Move).unwrap());
        assert_eq!(fs::read(font_dir.join("Hack.ttf")).unwrap(), b"new");
    }

    #[test]
    fn test_place_font_copy_keeps_source() {
        let dir = tempdir().unwrap();
        let font_dir = dir.path().join("fonts");
        let source = dir.path().join("good.otf");
        fs::write(&source, b"otf").unwrap();

        assert!(place_font(&source, &font_dir, Transfer::Copy).unwrap());
        assert!(source.exists());
        assert!(font_dir.join("good.otf").exists());
    }

    #[test]
    fn test_install_fonts_reports_events() {
        let dir = tempdir().unwrap();
        let font_dir = dir.path().join("fonts");
        fs::create_dir_all(&font_dir).unwrap();
        fs::write(font_dir.join("old.ttf"), b"kept").unwrap();

        let staged = dir.path().join("staged");
        fs::create_dir_all(&staged).unwrap();
        fs::write(staged.join("new.ttf"), b"").unwrap();
        fs::write(staged.join("old.ttf"), b"replacement").unwrap();

        let collector = Arc::new(CollectorSink::default());
        let events: EventSinkHandle = collector.clone();
        let sources = collect_font_files(&staged).unwrap();
        let report = install_fonts(&sources, &font_dir, Transfer::Move, "Pkg", &events).unwrap();

        assert_eq!(report.installed, vec![font_dir.join("new.ttf")]);
        assert_eq!(report.skipped, vec![font_dir.join("old.ttf")]);
        assert_eq!(fs::read(font_dir.join("old.ttf")).unwrap(), b"kept");
        assert_eq!(
            collector.events(),
            vec![
                InstallEvent::FontInstalled {
                    package: "Pkg".into(),
                    file: "new.ttf".into(),
                },
                InstallEvent::FontSkipped {
                    package: "Pkg".into(),
                    file: "old.ttf".into(),
                },
            ]
        );
    }

    #[test]
    fn test_report_empty() {
        assert!(PayloadReport::default().is_empty());

        let report = PayloadReport {
            installed: vec![],
            skipped: vec![PathBuf::from("a.ttf")],
        };
        assert!(!report.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_skips_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("Real.ttf"), b"").unwrap();
        symlink(".", root.join("loop")).unwrap();
        symlink("Real.ttf", root.join("Alias.ttf")).unwrap();

        assert_eq!(collect_font_files(root).unwrap(), vec![root.join("Real.ttf")]);
    }
}
