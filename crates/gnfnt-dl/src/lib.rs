pub mod archive;
pub mod download;
pub mod error;
pub mod feed;
pub mod http;
pub mod http_client;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
