use std::time::Duration;

use chrono::{DateTime, Utc};

/// Outcome of one logical call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Success {
        status_code: u16,
        /// First 100 characters of the response body.
        body_preview: String,
    },
    Failure {
        /// Human-readable description of the transport or timeout error.
        error: String,
    },
}

/// The structured result of a single logical call. Exactly one is produced
/// per call index, whether the call succeeded or not.
#[derive(Debug, Clone)]
pub struct CallResult {
    /// 1-based call number; restores submission order after concurrent
    /// completion.
    pub call_index: u32,
    pub outcome: CallOutcome,
    /// Wall-clock duration rounded to millisecond precision. Zero for
    /// failures: time-to-failure is deliberately not measured.
    pub elapsed: Duration,
    pub completed_at: DateTime<Utc>,
}

impl CallResult {
    #[must_use]
    pub fn success(
        call_index: u32,
        status_code: u16,
        body_preview: String,
        elapsed: Duration,
    ) -> Self {
        Self {
            call_index,
            outcome: CallOutcome::Success {
                status_code,
                body_preview,
            },
            elapsed,
            completed_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn failure(call_index: u32, error: String) -> Self {
        Self {
            call_index,
            outcome: CallOutcome::Failure { error },
            elapsed: Duration::ZERO,
            completed_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, CallOutcome::Success { .. })
    }

    /// Elapsed wall-clock time in seconds at millisecond precision.
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        let millis = u32::try_from(self.elapsed.as_millis()).unwrap_or(u32::MAX);
        f64::from(millis) / 1000.0
    }

    /// Status column as displayed: the numeric code, or `ERROR`.
    #[must_use]
    pub fn status_label(&self) -> String {
        match &self.outcome {
            CallOutcome::Success { status_code, .. } => status_code.to_string(),
            CallOutcome::Failure { .. } => "ERROR".to_owned(),
        }
    }

    /// Response column: body excerpt on success, error text on failure.
    #[must_use]
    pub fn response_preview(&self) -> &str {
        match &self.outcome {
            CallOutcome::Success { body_preview, .. } => body_preview,
            CallOutcome::Failure { error } => error,
        }
    }
}

/// Complete result set of one run, sorted ascending by call index. Its
/// length always equals the configured call count.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub calls: Vec<CallResult>,
}

impl RunResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
