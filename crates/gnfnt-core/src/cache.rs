use std::process::{Command, Stdio};

use gnfnt_utils::system::Os;
use tracing::{debug, info, trace, warn};

/// Result of asking the platform to pick up new fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    /// The platform has no refresh command; new fonts show up after a restart.
    RestartRequired,
    /// The refresh command could not be run or exited unsuccessfully.
    Failed(String),
}

/// Makes newly installed fonts visible to the system.
pub trait CacheRefresher {
    fn refresh(&self) -> RefreshOutcome;
}

/// Tells the user to restart instead of running anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct RestartNotice;

impl CacheRefresher for RestartNotice {
    fn refresh(&self) -> RefreshOutcome {
        info!("Restart your system to start using the new fonts");
        RefreshOutcome::RestartRequired
    }
}

/// Runs an external font-cache command.
#[derive(Debug, Clone)]
pub struct CommandRefresher {
    program: String,
    args: Vec<String>,
}

impl CommandRefresher {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Clears the macOS font database. Needs elevated rights, so it goes through `sudo`.
    pub fn atsutil() -> Self {
        Self::new("sudo", ["atsutil", "databases", "-remove"])
    }

    /// Rebuilds the fontconfig cache.
    pub fn fc_cache() -> Self {
        Self::new("fc-cache", ["-fv"])
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl CacheRefresher for CommandRefresher {
    fn refresh(&self) -> RefreshOutcome {
        let command_line = self.command_line();
        info!("Refreshing font cache ({})", command_line);

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                trace!("{}", String::from_utf8_lossy(&output.stdout));
                debug!("Font cache refreshed");
                RefreshOutcome::Refreshed
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!(
                    "`{}` exited with {}: {}",
                    command_line,
                    output.status,
                    stderr.trim()
                );
                RefreshOutcome::Failed(output.status.to_string())
            }
            Err(err) => {
                warn!("Could not run `{}`: {}", command_line, err);
                RefreshOutcome::Failed(err.to_string())
            }
        }
    }
}

/// Picks the refresher for `os`.
pub fn for_os(os: Os) -> Box<dyn CacheRefresher + Send + Sync> {
    match os {
        Os::Windows => Box::new(RestartNotice),
        Os::MacOs => Box::new(CommandRefresher::atsutil()),
        Os::Unix => Box::new(CommandRefresher::fc_cache()),
    }
}
