use std::fmt;

/// Operating system family, as far as font handling is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOs,
    /// Linux and other UNIX-like systems.
    Unix,
}

impl Os {
    /// Identifies the platform the binary was built for.
    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    /// Maps a `std::env::consts::OS` style name to an [`Os`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::Unix,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Unix => "Unix",
        };
        f.write_str(name)
    }
}
