//! Error types for gnfnt-core.

use gnfnt_config::error::ConfigError;
use gnfnt_dl::error::DownloadError;
use gnfnt_utils::error::{FileSystemError, PathError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum GnfntError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FileSystemError(#[from] FileSystemError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PathError(#[from] PathError),

    #[error("Error while {action}")]
    #[diagnostic(code(gnfnt::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not fetch the font list from any registered repository")]
    #[diagnostic(
        code(gnfnt::no_reachable_feed),
        help("Check your internet connection, or list feeds with `gnfnt --repos` and add one with `gnfnt -a <url>`")
    )]
    NoReachableFeed,

    #[error("{0}")]
    #[diagnostic(code(gnfnt::error))]
    Custom(String),
}

/// Trait for adding context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, GnfntError>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, GnfntError>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            GnfntError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
