use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PathError {
    #[error("Path is empty")]
    #[diagnostic(code(gnfnt_utils::path::empty))]
    Empty,

    #[error("Failed to get current directory: {source}")]
    #[diagnostic(code(gnfnt_utils::path::current_dir))]
    CurrentDir {
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the home directory")]
    #[diagnostic(
        code(gnfnt_utils::path::no_home),
        help("Set the HOME environment variable")
    )]
    NoHome,
}

#[derive(Error, Diagnostic, Debug)]
pub enum FileSystemError {
    #[error("Failed to {action} file `{}`: {source}", path.display())]
    #[diagnostic(
        code(gnfnt_utils::fs::file),
        help("Check file permissions and disk space")
    )]
    File {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to {action} directory `{}`: {source}", path.display())]
    #[diagnostic(
        code(gnfnt_utils::fs::directory),
        help("Check directory permissions")
    )]
    Directory {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` exists but is not a directory", path.display())]
    #[diagnostic(code(gnfnt_utils::fs::not_a_directory))]
    NotADirectory { path: PathBuf },
}

#[derive(Error, Diagnostic, Debug)]
pub enum UtilsError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FileSystem(#[from] FileSystemError),
}

pub type PathResult<T> = std::result::Result<T, PathError>;
pub type FileSystemResult<T> = std::result::Result<T, FileSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_display() {
        let err = FileSystemError::File {
            path: PathBuf::from("/tmp/font.ttf"),
            action: "copy",
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to copy file"));
        assert!(msg.contains("/tmp/font.ttf"));
    }

    #[test]
    fn test_not_a_directory_display() {
        let err = FileSystemError::NotADirectory {
            path: PathBuf::from("/tmp/file"),
        };
        assert_eq!(err.to_string(), "`/tmp/file` exists but is not a directory");
    }

    #[test]
    fn test_utils_error_from_path_error() {
        let err: UtilsError = PathError::Empty.into();
        assert!(matches!(err, UtilsError::Path(PathError::Empty)));
        assert_eq!(err.to_string(), "Path is empty");
    }
}
