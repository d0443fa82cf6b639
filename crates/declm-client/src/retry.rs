// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Bounded retry for transient HTTP failures

use declm::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy applied around each completion request.
///
/// Only errors carrying one of `statuses` are retried; transport failures and
/// other statuses are returned immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Pause between attempts, in milliseconds
    pub interval_ms: u64,
    /// Statuses worth retrying
    pub statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            interval_ms: 500,
            statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Set the retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the pause between attempts.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_ms = interval.as_millis() as u64;
        self
    }

    /// Pause between attempts.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Whether `err` may succeed on another attempt.
    pub fn is_retryable(&self, err: &Error) -> bool {
        err.status().is_some_and(|s| self.statuses.contains(&s))
    }

    /// Run `attempt` until it succeeds, fails permanently, or retries run out.
    ///
    /// `attempt` receives the zero-based attempt number.
    pub fn run<T>(&self, mut attempt: impl FnMut(u32) -> Result<T>) -> Result<T> {
        let mut n = 0;
        loop {
            match attempt(n) {
                Err(err) if n < self.max_retries && self.is_retryable(&err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempt = n, status = ?err.status(), "retrying request");
                    #[cfg(not(feature = "tracing"))]
                    let _ = err;
                    n += 1;
                    if self.interval_ms > 0 {
                        std::thread::sleep(self.interval());
                    }
                }
                result => return result,
            }
        }
    }
}
