use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{CallCount, ConcurrencyLimit, TimeoutSecs, VolleyArgs, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. A config value is used
/// only when the matching flag was not given on the command line.
///
/// # Errors
///
/// Returns an error when config values are malformed or out of range.
pub fn apply_config(
    args: &mut VolleyArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "token")
        && let Some(token) = config.token.clone()
    {
        args.token = Some(token);
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(parse_header(header).map_err(AppError::validation)?);
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "data")
        && let Some(data) = config.data.clone()
    {
        args.data = data;
    }

    if !is_cli(matches, "call_count")
        && let Some(requests) = config.requests
    {
        args.call_count = CallCount::try_from(requests).map_err(|err| {
            AppError::config(ConfigError::ValueOutOfRange {
                field: "requests",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "concurrency_limit")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency_limit = ConcurrencyLimit::try_from(concurrency).map_err(|err| {
            AppError::config(ConfigError::ValueOutOfRange {
                field: "concurrency",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout
    {
        args.timeout = TimeoutSecs::try_from(timeout).map_err(|err| {
            AppError::config(ConfigError::ValueOutOfRange {
                field: "timeout",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "export_csv")
        && let Some(path) = config.export_csv.clone()
    {
        args.export_csv = Some(path);
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_cli(matches, "no_curl")
        && let Some(no_curl) = config.no_curl
    {
        args.no_curl = no_curl;
    }

    if !is_cli(matches, "quiet")
        && let Some(quiet) = config.quiet
    {
        args.quiet = quiet;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}
