use gnfnt_utils::error::{FileSystemError, PathError, UtilsError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to parse registry file: {0}")]
    #[diagnostic(
        code(gnfnt_config::json),
        help("Fix or delete the registry file; the default feed is used until then")
    )]
    Json(#[from] serde_json::Error),

    #[error("Invalid repository URL: {0}")]
    #[diagnostic(
        code(gnfnt_config::invalid_repository_url),
        help("Repository URLs must be absolute http(s) URLs")
    )]
    InvalidRepositoryUrl(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(gnfnt_config::io))]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Utils(#[from] UtilsError),
}

impl From<PathError> for ConfigError {
    fn from(err: PathError) -> Self {
        Self::Utils(UtilsError::Path(err))
    }
}

impl From<FileSystemError> for ConfigError {
    fn from(err: FileSystemError) -> Self {
        Self::Utils(UtilsError::FileSystem(err))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
