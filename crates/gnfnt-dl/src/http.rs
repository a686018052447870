use std::time::Duration;

use ureq::{http::Response, Body};

use crate::{
    error::{DownloadError, Result},
    http_client,
};

pub struct Http;

impl Http {
    /// Issues a GET and fails on a malformed URL or any non-success status.
    pub fn fetch(url: &str, timeout: Option<Duration>) -> Result<Response<Body>> {
        url::Url::parse(url).map_err(|source| DownloadError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let resp = http_client::get(url, timeout).call()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DownloadError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp)
    }

    /// Fetches `url` and decodes the body as JSON.
    ///
    /// A blank body is reported as [`DownloadError::EmptyResponse`], anything that does not
    /// decode into `T` as [`DownloadError::InvalidResponse`].
    pub fn json<T: serde::de::DeserializeOwned>(
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<T> {
        let mut resp = Self::fetch(url, timeout)?;
        let body = resp.body_mut().read_to_string()?;

        if body.trim().is_empty() {
            return Err(DownloadError::EmptyResponse {
                url: url.to_string(),
            });
        }

        serde_json::from_str(&body).map_err(|_| DownloadError::InvalidResponse)
    }
}
