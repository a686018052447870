use std::{fs::File, path::Path};

use tracing::debug;
use zip::ZipArchive;

use crate::error::Result;

/// Suffix shared by every package archive published on a feed.
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Unpacks the zip archive at `archive` into `dest`, keeping the archive's inner layout.
///
/// `dest` is created if needed. Entries whose names would escape `dest` are rejected by the
/// zip reader.
///
/// # Errors
///
/// * `DownloadError::Io` if the archive cannot be opened
/// * `DownloadError::ExtractError` if it is not a valid zip or an entry fails to unpack
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(archive: P, dest: Q) -> Result<()> {
    let (archive, dest) = (archive.as_ref(), dest.as_ref());

    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file)?;
    debug!(
        "Extracting {} entries from {} into {}",
        zip.len(),
        archive.display(),
        dest.display()
    );

    std::fs::create_dir_all(dest)?;
    zip.extract(dest)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;
    use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

    use super::*;
    use crate::error::DownloadError;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_keeps_layout() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("Hack.zip");
        write_zip(
            &archive,
            &[
                ("HackNerdFont-Regular.ttf", b"regular"),
                ("static/HackNerdFont-Bold.ttf", b"bold"),
                ("LICENSE.md", b"mit"),
            ],
        );

        let dest = dir.path().join("out");
        extract_archive(&archive, &dest).unwrap();

        assert_eq!(
            std::fs::read(dest.join("HackNerdFont-Regular.ttf")).unwrap(),
            b"regular"
        );
        assert_eq!(
            std::fs::read(dest.join("static/HackNerdFont-Bold.ttf")).unwrap(),
            b"bold"
        );
        assert!(dest.join("LICENSE.md").is_file());
    }

    #[test]
    fn test_extract_corrupt_archive() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        std::fs::write(&archive, b"this is not a zip file").unwrap();

        let err = extract_archive(&archive, dir.path().join("out")).unwrap_err();
        assert!(matches!(err, DownloadError::ExtractError(_)));
    }

    #[test]
    fn test_extract_missing_archive() {
        let dir = tempdir().unwrap();

        let err = extract_archive(dir.path().join("absent.zip"), dir.path()).unwrap_err();
        assert!(matches!(err, DownloadError::Io(_)));
    }
}
