//! Fixed-interval retry policies for the polling loops.
//!
//! "Retry" and "poll" are the same mechanism here: re-attempt at a fixed
//! interval, no backoff. The stock policies are unbounded, matching the
//! supervised-run contract where the operator kills the process rather
//! than the bot giving up; a cap can be set without changing any control
//! flow.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often, and at most how many times, to re-attempt a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub interval: Duration,
    /// `None` means poll forever.
    pub max_attempts: Option<u64>,
}

impl RetryPolicy {
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    pub fn bounded(interval: Duration, max_attempts: u64) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
        }
    }

    /// Attempt indices, starting at 1. Infinite for unbounded policies.
    pub fn attempts(&self) -> Attempts {
        Attempts {
            remaining: self.max_attempts,
            next: 1,
        }
    }
}

/// Iterator behind [`RetryPolicy::attempts`].
#[derive(Debug, Clone)]
pub struct Attempts {
    remaining: Option<u64>,
    next: u64,
}

impl Iterator for Attempts {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let attempt = self.next;
        self.next += 1;
        Some(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_policy_yields_exactly_its_budget() {
        let policy = RetryPolicy::bounded(Duration::from_millis(500), 3);
        let attempts: Vec<u64> = policy.attempts().collect();
        assert_eq!(attempts, vec![1, 2, 3]);
    }

    #[test]
    fn unbounded_policy_keeps_going() {
        let policy = RetryPolicy::unbounded(Duration::from_secs(1));
        assert!(policy.max_attempts.is_none());
        assert_eq!(policy.attempts().take(1000).count(), 1000);
    }

    #[test]
    fn zero_budget_never_attempts() {
        let policy = RetryPolicy::bounded(Duration::from_secs(1), 0);
        assert_eq!(policy.attempts().count(), 0);
    }
}
