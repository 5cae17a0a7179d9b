use serde::Deserialize;

use crate::args::HttpMethod;

/// Optional file-based defaults for CLI options. Every field mirrors a flag;
/// CLI values win over config values.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    pub token: Option<String>,
    pub headers: Option<Vec<String>>,
    pub data: Option<String>,
    pub requests: Option<u32>,
    pub concurrency: Option<u32>,
    pub timeout: Option<u32>,
    pub export_csv: Option<String>,
    pub export_json: Option<String>,
    pub no_curl: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
}
