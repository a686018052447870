use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DownloadError {
    #[error("Invalid URL: {url}")]
    #[diagnostic(code(gnfnt_dl::invalid_url))]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    #[diagnostic(
        code(gnfnt_dl::network),
        help("Check your internet connection or try again later")
    )]
    Network(#[from] Box<ureq::Error>),

    #[error("HTTP {status}: {url}")]
    #[diagnostic(code(gnfnt_dl::http_error))]
    HttpError { status: u16, url: String },

    #[error("Empty response from {url}")]
    #[diagnostic(code(gnfnt_dl::empty_response))]
    EmptyResponse { url: String },

    #[error("Invalid response from server")]
    #[diagnostic(code(gnfnt_dl::invalid_response))]
    InvalidResponse,

    #[error(transparent)]
    #[diagnostic(code(gnfnt_dl::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to extract archive: {0}")]
    #[diagnostic(
        code(gnfnt_dl::extract_error),
        help("The archive may be corrupt; try the download again")
    )]
    ExtractError(#[from] zip::result::ZipError),
}

impl DownloadError {
    /// Whether the error came from the transport or an HTTP status, as opposed to decoding.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpError { .. })
    }
}

impl From<ureq::Error> for DownloadError {
    fn from(e: ureq::Error) -> Self {
        Self::Network(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, DownloadError>;
