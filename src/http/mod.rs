//! HTTP client construction and single-call execution.
mod client;
mod executor;


pub use client::build_client;
pub use executor::execute_call;

#[cfg(test)]
pub(crate) use executor::{preview, round_to_millis};
