use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::args::VolleyArgs;
use crate::config;
use crate::error::{AppError, AppResult, ValidationError};
use crate::logger;
use crate::report;
use crate::runner::{self, RunConfig};

/// Parses arguments, applies any config file, and drives one full run.
///
/// # Errors
///
/// Returns an error when arguments or configuration are invalid, the
/// runtime cannot be built, or the run itself cannot start.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    if let Some(file) = config::load_config(args.config.as_deref())? {
        config::apply_config(&mut args, &matches, &file)?;
    }

    logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(run_async(&args))
}

fn parse_args() -> AppResult<(VolleyArgs, ArgMatches)> {
    let cmd = VolleyArgs::command();
    let matches = cmd.get_matches();
    let args = VolleyArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(args: &VolleyArgs) -> AppResult<()> {
    let config = RunConfig::from_args(args)?;

    if !args.no_curl {
        println!("{}", report::curl_preview(&config));
    }

    info!(
        url = %config.target_url,
        calls = config.call_count.get(),
        concurrency = config.concurrency_limit.get(),
        timeout_s = config.timeout.get(),
        "starting run"
    );

    let result = runner::run_all(&config).await?;

    report::emit(args, &result).await;

    Ok(())
}
