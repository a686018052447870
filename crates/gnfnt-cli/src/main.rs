use std::{process::ExitCode, sync::Arc};

use clap::{CommandFactory, Parser};
use cli::{Action, Args};
use gnfnt_config::config::Config;
use gnfnt_core::{
    context::GnfntContext,
    error::{ErrorContext, GnfntError},
    events::{EventSinkHandle, NullSink},
    GnfntResult,
};
use gnfnt_dl::{error::DownloadError, http_client::configure_http_client};
use gnfnt_utils::path::resolve_path;
use install::{install_all, install_fonts};
use list::list_fonts;
use local::install_local;
use logging::setup_logging;
use progress::ProgressSink;
use repos::{add_repo, list_repos, remove_repo};
use tracing::debug;
use ureq::{
    http::{HeaderMap, HeaderName, HeaderValue},
    Proxy,
};
use utils::{confirm_action, progress_enabled, COLOR, PROGRESS};

mod cli;
mod install;
mod list;
mod local;
mod logging;
mod progress;
mod repos;
mod utils;

pub fn create_context(config: Config) -> GnfntContext {
    let events: EventSinkHandle = if progress_enabled() {
        Arc::new(ProgressSink::default())
    } else {
        Arc::new(NullSink)
    };
    GnfntContext::new(config, events)
}

fn parse_headers(headers: &[String]) -> GnfntResult<HeaderMap> {
    let mut map = HeaderMap::new();
    for header in headers {
        let (key, value) = header
            .split_once(':')
            .ok_or_else(|| GnfntError::Custom(format!("Invalid header `{header}`, expected `Name: value`")))?;
        let key: HeaderName = key
            .trim()
            .parse()
            .map_err(|_| GnfntError::Custom(format!("Invalid header name in `{header}`")))?;
        let value: HeaderValue = value
            .trim()
            .parse()
            .map_err(|_| GnfntError::Custom(format!("Invalid header value in `{header}`")))?;
        map.append(key, value);
    }
    Ok(map)
}

fn configure_http(args: &Args) -> GnfntResult<()> {
    let proxy = args
        .proxy
        .as_deref()
        .map(Proxy::new)
        .transpose()
        .map_err(DownloadError::from)?;
    let headers = args.header.as_deref().map(parse_headers).transpose()?;
    let user_agent = args.user_agent.clone();

    configure_http_client(|config| {
        if proxy.is_some() {
            config.proxy = proxy;
        }

        if let Some(user_agent) = user_agent {
            config.user_agent = Some(user_agent);
        }

        if headers.is_some() {
            config.headers = headers;
        }
    });
    Ok(())
}

fn handle_cli() -> GnfntResult<ExitCode> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        let mut color = COLOR.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *color = false;
    }

    if args.no_progress || args.json {
        let mut progress = PROGRESS
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *progress = false;
    }

    let Some(action) = args.action() else {
        Args::command()
            .print_help()
            .with_context(|| "printing help".to_string())?;
        return Ok(ExitCode::FAILURE);
    };

    configure_http(&args)?;

    let mut config = Config::load()?;
    if let Some(ref font_dir) = args.font_dir {
        config = config.with_font_dir(resolve_path(font_dir)?);
    }
    debug!("Installing into {} ({})", config.font_dir.display(), config.os);

    let ctx = create_context(config);

    let result = match action {
        Action::Install(names) => install_fonts(&ctx, &names),
        Action::InstallAll => install_all(&ctx, args.keep_invalid, confirm_action),
        Action::List => list_fonts(&ctx, args.keep_invalid),
        Action::Repos => {
            list_repos(&ctx);
            Ok(())
        }
        Action::AddRepo(url) => add_repo(&ctx, &url),
        Action::RemoveRepo(url) => remove_repo(&ctx, &url),
        Action::InstallLocal(paths) => {
            let failed = install_local(&ctx.local_installer(), &paths);
            debug!("{} of {} paths failed", failed, paths.len());
            Ok(())
        }
    };

    progress::stop();
    result.map(|()| ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    match handle_cli() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let headers = parse_headers(&[
            "Accept: application/vnd.github+json".to_string(),
            "X-Trace:abc".to_string(),
        ])
        .unwrap();

        assert_eq!(headers.get("accept").unwrap(), "application/vnd.github+json");
        assert_eq!(headers.get("x-trace").unwrap(), "abc");
    }

    #[test]
    fn test_parse_headers_rejects_malformed() {
        assert!(parse_headers(&["no-colon".to_string()]).is_err());
        assert!(parse_headers(&["bad name: x".to_string()]).is_err());
    }
}
