pub use gnfnt_dl::archive::ARCHIVE_SUFFIX;

/// Extensions of payload files that are installed, compared without the dot.
pub const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// Extension of local archives accepted by `-f`.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Prefix of every per-install staging directory.
pub const STAGING_PREFIX: &str = "gnfnt-";
