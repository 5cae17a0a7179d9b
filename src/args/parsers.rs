use crate::error::ValidationError;

use super::types::{CallCount, ConcurrencyLimit, TimeoutSecs};

pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        Some(_) | None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

pub(super) fn parse_call_count(s: &str) -> Result<CallCount, ValidationError> {
    s.parse::<CallCount>()
}

pub(super) fn parse_concurrency_limit(s: &str) -> Result<ConcurrencyLimit, ValidationError> {
    s.parse::<ConcurrencyLimit>()
}

pub(super) fn parse_timeout_secs(s: &str) -> Result<TimeoutSecs, ValidationError> {
    s.parse::<TimeoutSecs>()
}
