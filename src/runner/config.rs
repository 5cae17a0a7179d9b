use url::Url;

use crate::args::{CallCount, ConcurrencyLimit, HttpMethod, TimeoutSecs, VolleyArgs};
use crate::error::{AppError, AppResult, ValidationError};

/// Immutable parameters for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target_url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub call_count: CallCount,
    pub concurrency_limit: ConcurrencyLimit,
    pub timeout: TimeoutSecs,
}

impl RunConfig {
    /// Builds a validated run configuration from parsed CLI arguments.
    ///
    /// Headers gain `Authorization: Bearer <token>` when a token is set and
    /// `Content-Type: application/json` for POST requests; explicit `-H`
    /// headers follow and may repeat either.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing, empty, not an absolute URL,
    /// or has no host.
    pub fn from_args(args: &VolleyArgs) -> AppResult<Self> {
        let target_url = args.url.as_deref().unwrap_or_default().trim().to_owned();
        if target_url.is_empty() {
            return Err(AppError::validation(ValidationError::MissingUrl));
        }
        let parsed = Url::parse(&target_url).map_err(|err| {
            AppError::validation(ValidationError::InvalidUrl {
                url: target_url.clone(),
                source: err,
            })
        })?;
        if parsed.host_str().is_none() {
            return Err(AppError::validation(ValidationError::UrlMissingHost));
        }

        let mut headers = Vec::with_capacity(args.headers.len().saturating_add(2));
        if let Some(token) = args.token.as_deref() {
            headers.push(("Authorization".to_owned(), format!("Bearer {}", token)));
        }
        if args.method == HttpMethod::Post {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        headers.extend(args.headers.iter().cloned());

        Ok(Self {
            target_url,
            method: args.method,
            headers,
            body: args.data.clone(),
            call_count: args.call_count,
            concurrency_limit: args.concurrency_limit,
            timeout: args.timeout,
        })
    }
}
