//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::VolleyArgs;
pub use types::{
    CallCount, ConcurrencyLimit, HttpMethod, MAX_CALL_COUNT, MAX_CONCURRENCY, MAX_TIMEOUT_SECS,
    TimeoutSecs,
};

pub(crate) use parsers::parse_header;
