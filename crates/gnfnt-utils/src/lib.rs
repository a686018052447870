pub mod error;
pub mod fs;
pub mod path;
pub mod system;
