use std::{
    fs::File,
    io::{Read as _, Write as _},
    path::{Path, PathBuf},
};

use tracing::debug;
use ureq::{
    http::{header::CONTENT_LENGTH, Response},
    Body,
};

use crate::{error::Result, http::Http, types::Progress};

const CHUNK_SIZE: usize = 8192;

pub struct Download {
    pub url: String,
    pub output: PathBuf,
    pub on_progress: Option<Box<dyn Fn(Progress) + Send + Sync>>,
}

impl Download {
    /// Creates a download of `url` into the file at `output`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gnfnt_dl::download::Download;
    ///
    /// let bytes = Download::new("https://example.com/Hack.zip", "/tmp/Hack.zip")
    ///     .execute()
    ///     .unwrap();
    /// ```
    pub fn new(url: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            output: output.into(),
            on_progress: None,
        }
    }

    /// Registers a callback invoked with [`Progress`] events while the body streams in.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gnfnt_dl::{download::Download, types::Progress};
    ///
    /// let _dl = Download::new("https://example.com/Hack.zip", "Hack.zip")
    ///     .progress(|event: Progress| match event {
    ///         Progress::Starting { total } => eprintln!("starting, total={total:?}"),
    ///         Progress::Chunk { current, .. } => eprintln!("downloaded {current}"),
    ///         Progress::Complete { total } => eprintln!("complete, {total} bytes"),
    ///     });
    /// ```
    pub fn progress<F>(mut self, on_progress: F) -> Self
    where
        F: Fn(Progress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Box::new(on_progress));
        self
    }

    /// Streams the response body into the output file in fixed-size chunks.
    ///
    /// Returns the number of bytes written. A non-success status is reported as
    /// `DownloadError::HttpError` before the output file is created. Nothing is retried.
    pub fn execute(self) -> Result<u64> {
        let resp = Http::fetch(&self.url, None)?;

        if let Some(parent) = self.output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let written = self.write_body(resp, &self.output)?;
        debug!("Downloaded {} ({} bytes)", self.url, written);
        Ok(written)
    }

    fn write_body(&self, resp: Response<Body>, path: &Path) -> Result<u64> {
        let total = parse_content_length(&resp);
        self.emit(Progress::Starting {
            total,
        });

        let mut file = File::create(path)?;
        let mut reader = resp.into_body().into_reader();
        let mut buffer = [0u8; CHUNK_SIZE];
        let mut downloaded = 0u64;

        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }

            file.write_all(&buffer[..n])?;
            downloaded += n as u64;

            self.emit(Progress::Chunk {
                current: downloaded,
                total,
            });
        }
        file.flush()?;

        self.emit(Progress::Complete {
            total: downloaded,
        });

        Ok(downloaded)
    }

    fn emit(&self, event: Progress) {
        if let Some(ref cb) = self.on_progress {
            cb(event);
        }
    }
}

/// Size announced by the `Content-Length` header, if any.
fn parse_content_length(resp: &Response<Body>) -> Option<u64> {
    resp.headers()
        .get(CONTENT_LENGTH)
        .and_then(|h| h.to_str().ok())
        .and_then(|len| len.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tempfile::tempdir;

    use super::*;
    use crate::{
        error::DownloadError,
        test_utils::{serve, Route},
    };

    #[test]
    fn test_download_to_file_with_progress() {
        let payload = vec![7u8; CHUNK_SIZE * 2 + 100];
        let base = serve(vec![("/Hack.zip", Route::ok(payload.clone()))]);
        let dir = tempdir().unwrap();
        let output = dir.path().join("nested/Hack.zip");

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let written = Download::new(format!("{base}/Hack.zip"), &output)
            .progress(move |event| sink.lock().unwrap().push(event))
            .execute()
            .unwrap();

        assert_eq!(written, payload.len() as u64);
        assert_eq!(std::fs::read(&output).unwrap(), payload);

        let events = events.lock().unwrap();
        assert_eq!(
            events.first(),
            Some(&Progress::Starting {
                total: Some(payload.len() as u64)
            })
        );
        assert_eq!(
            events.last(),
            Some(&Progress::Complete {
                total: payload.len() as u64
            })
        );
        assert!(events.iter().any(|e| matches!(
            e,
            Progress::Chunk { current, .. } if *current == payload.len() as u64
        )));
    }

    #[test]
    fn test_download_without_length_is_indeterminate() {
        let base = serve(vec![("/Hack.zip", Route::ok("abc").without_length())]);
        let dir = tempdir().unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        Download::new(format!("{base}/Hack.zip"), dir.path().join("Hack.zip"))
            .progress(move |event| sink.lock().unwrap().push(event))
            .execute()
            .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.first(), Some(&Progress::Starting { total: None }));
    }

    #[test]
    fn test_download_http_error_creates_no_file() {
        let base = serve(vec![]);
        let dir = tempdir().unwrap();
        let output = dir.path().join("Missing.zip");

        let err = Download::new(format!("{base}/Missing.zip"), &output)
            .execute()
            .unwrap_err();

        assert!(matches!(err, DownloadError::HttpError { status: 404, .. }));
        assert!(!output.exists());
    }
}
