pub mod config;
pub mod error;
pub mod registry;

#[cfg(test)]
pub mod test_utils;
