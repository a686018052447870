use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, ValueHint};

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Install(Vec<String>),
    InstallAll,
    List,
    Repos,
    AddRepo(String),
    RemoveRepo(String),
    InstallLocal(Vec<PathBuf>),
}

#[derive(Parser)]
#[command(
    name = "gnfnt",
    author,
    version = concat!("version ", env!("CARGO_PKG_VERSION")),
    about = "Get Nerd Fonts: download and install Nerd Fonts from the command line",
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    disable_version_flag = true,
    group(ArgGroup::new("action").args(["fonts", "list", "repos", "add", "remove", "files"]))
)]
pub struct Args {
    /// Fonts to install, or `*` to install every available font
    #[arg(value_name = "FONT")]
    pub fonts: Vec<String>,

    /// List available fonts and whether they are installed
    #[arg(short, long)]
    pub list: bool,

    /// Show registered repositories
    #[arg(long)]
    pub repos: bool,

    /// Register a repository feed
    #[arg(short, long, value_name = "URL", value_hint = ValueHint::Url)]
    pub add: Option<String>,

    /// Unregister a repository feed
    #[arg(short, long, value_name = "URL", value_hint = ValueHint::Url)]
    pub remove: Option<String>,

    /// Install from local font files or zip archives
    #[arg(short = 'f', long = "file", value_name = "PATH", num_args = 1.., value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Set output verbosity
    #[arg(long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress bars
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Install into this directory instead of the platform font directory
    #[arg(long, value_name = "DIR", global = true, value_hint = ValueHint::DirPath)]
    pub font_dir: Option<String>,

    /// Keep repositories that could not be queried instead of unregistering them
    #[arg(long, global = true)]
    pub keep_invalid: bool,

    /// Set proxy
    #[arg(required = false, long, short = 'P', global = true)]
    pub proxy: Option<String>,

    /// Set request headers
    #[arg(required = false, long, short = 'H', global = true)]
    pub header: Option<Vec<String>>,

    /// Set user agent
    #[arg(required = false, long, short = 'A', global = true)]
    pub user_agent: Option<String>,
}

impl Args {
    /// The requested action, or `None` when nothing was asked for.
    pub fn action(&self) -> Option<Action> {
        if self.list {
            Some(Action::List)
        } else if self.repos {
            Some(Action::Repos)
        } else if let Some(url) = &self.add {
            Some(Action::AddRepo(url.clone()))
        } else if let Some(url) = &self.remove {
            Some(Action::RemoveRepo(url.clone()))
        } else if !self.files.is_empty() {
            Some(Action::InstallLocal(self.files.clone()))
        } else if self.fonts.first().is_some_and(|font| font == "*") {
            Some(Action::InstallAll)
        } else if !self.fonts.is_empty() {
            Some(Action::Install(self.fonts.clone()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gnfnt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_named_install() {
        let args = parse(&["FiraCode", "Hack"]);
        assert_eq!(
            args.action(),
            Some(Action::Install(vec!["FiraCode".into(), "Hack".into()]))
        );
    }

    #[test]
    fn test_install_all() {
        assert_eq!(parse(&["*"]).action(), Some(Action::InstallAll));
    }

    #[test]
    fn test_management_actions() {
        assert_eq!(parse(&["-l"]).action(), Some(Action::List));
        assert_eq!(parse(&["--repos"]).action(), Some(Action::Repos));
        assert_eq!(
            parse(&["-a", "https://example.com/feed"]).action(),
            Some(Action::AddRepo("https://example.com/feed".into()))
        );
        assert_eq!(
            parse(&["-r", "https://example.com/feed"]).action(),
            Some(Action::RemoveRepo("https://example.com/feed".into()))
        );
        assert_eq!(
            parse(&["-f", "a.ttf", "b.zip"]).action(),
            Some(Action::InstallLocal(vec!["a.ttf".into(), "b.zip".into()]))
        );
    }

    #[test]
    fn test_no_action() {
        let args = parse(&["--verbose", "--no-color"]);
        assert_eq!(args.action(), None);
        assert_eq!(args.verbose, 1);
    }

    #[test]
    fn test_actions_conflict() {
        let result = Args::try_parse_from(["gnfnt", "-l", "--repos"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_version_flag() {
        let err = Args::try_parse_from(["gnfnt", "-v"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        let version = <Args as clap::CommandFactory>::command().render_version();
        assert_eq!(
            version.trim_end(),
            format!("gnfnt version {}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_global_options() {
        let args = parse(&[
            "--font-dir",
            "/tmp/fonts",
            "--keep-invalid",
            "-H",
            "Accept: application/json",
            "Hack",
        ]);
        assert_eq!(args.font_dir.as_deref(), Some("/tmp/fonts"));
        assert!(args.keep_invalid);
        assert_eq!(args.header, Some(vec!["Accept: application/json".into()]));
    }
}
