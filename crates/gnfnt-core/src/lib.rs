use error::GnfntError;

pub mod cache;
pub mod constants;
pub mod context;
pub mod error;
pub mod events;
pub mod install;
pub mod local;
pub mod payload;
pub mod resolver;
pub mod staging;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

pub type GnfntResult<T> = std::result::Result<T, GnfntError>;
