use std::num::NonZeroU32;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MAX_CALL_COUNT: u32 = 1000;
pub const MAX_CONCURRENCY: u32 = 50;
pub const MAX_TIMEOUT_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Number of logical calls in a run, bounded to 1..=1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallCount(NonZeroU32);

impl CallCount {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for CallCount {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match NonZeroU32::new(value) {
            Some(count) if value <= MAX_CALL_COUNT => Ok(CallCount(count)),
            Some(_) | None => Err(ValidationError::ValueOutOfRange {
                min: 1,
                max: MAX_CALL_COUNT,
            }),
        }
    }
}

impl std::str::FromStr for CallCount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        CallCount::try_from(value)
    }
}

/// Cap on concurrently in-flight calls, bounded to 1..=50.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyLimit(NonZeroU32);

impl ConcurrencyLimit {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for ConcurrencyLimit {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match NonZeroU32::new(value) {
            Some(limit) if value <= MAX_CONCURRENCY => Ok(ConcurrencyLimit(limit)),
            Some(_) | None => Err(ValidationError::ValueOutOfRange {
                min: 1,
                max: MAX_CONCURRENCY,
            }),
        }
    }
}

impl std::str::FromStr for ConcurrencyLimit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        ConcurrencyLimit::try_from(value)
    }
}

/// Per-call timeout in whole seconds, bounded to 1..=30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutSecs(NonZeroU32);

impl TimeoutSecs {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    #[must_use]
    pub const fn to_duration(self) -> Duration {
        Duration::from_secs(self.0.get() as u64)
    }
}

impl TryFrom<u32> for TimeoutSecs {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match NonZeroU32::new(value) {
            Some(secs) if value <= MAX_TIMEOUT_SECS => Ok(TimeoutSecs(secs)),
            Some(_) | None => Err(ValidationError::ValueOutOfRange {
                min: 1,
                max: MAX_TIMEOUT_SECS,
            }),
        }
    }
}

impl std::str::FromStr for TimeoutSecs {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        TimeoutSecs::try_from(value)
    }
}
