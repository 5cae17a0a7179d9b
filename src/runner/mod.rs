//! Bounded-concurrency run coordination.
//!
//! A run schedules `call_count` logical calls through the request executor,
//! never letting more than `concurrency_limit` of them have an outstanding
//! network operation, and always yields exactly one result per call index.
mod config;
mod coordinator;
mod result;


pub use config::RunConfig;
pub use coordinator::run_all;
pub use result::{CallOutcome, CallResult, RunResult};

#[cfg(test)]
pub(crate) use coordinator::reconcile_missing;
