use clap::Parser;

use super::parsers::{parse_call_count, parse_concurrency_limit, parse_header, parse_timeout_secs};
use super::types::{CallCount, ConcurrencyLimit, HttpMethod, TimeoutSecs};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Ad-hoc HTTP load generator - fire a volley of concurrent requests at a URL and analyze per-call latency, status codes, and throughput."
)]
pub struct VolleyArgs {
    /// Target URL to hit
    #[arg(long, short)]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Bearer token, sent as 'Authorization: Bearer <token>'
    #[arg(long, env = "VOLLEY_TOKEN")]
    pub token: Option<String>,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body data (POST only)
    #[arg(long, short, default_value = "")]
    pub data: String,

    /// Number of calls to issue (1-1000)
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "100",
        value_parser = parse_call_count
    )]
    pub call_count: CallCount,

    /// Max number of calls in flight at once (1-50)
    #[arg(
        long = "concurrency",
        short = 'c',
        default_value = "20",
        value_parser = parse_concurrency_limit
    )]
    pub concurrency_limit: ConcurrencyLimit,

    /// Timeout per call in seconds (1-30)
    #[arg(
        long = "timeout",
        default_value = "10",
        value_parser = parse_timeout_secs
    )]
    pub timeout: TimeoutSecs,

    /// Export the per-call log to a CSV file
    #[arg(long = "export-csv")]
    pub export_csv: Option<String>,

    /// Export the per-call log to a JSON file
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Skip the cURL preview line
    #[arg(long = "no-curl")]
    pub no_curl: bool,

    /// Only print the summary, not the per-call log
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by VOLLEY_LOG/RUST_LOG)
    #[arg(long, short)]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./volley.toml or ./volley.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
