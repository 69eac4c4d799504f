//
// (C) Copyright IBM 2026
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

//! Delays and bounds for polling long-running operations and jobs.

use crate::error::{HookError, Result};
use log::debug;
use std::time::Duration;
use tokio::time::Instant;

const DEFAULT_OPERATION_INITIAL_INTERVAL: f64 = 1.0;
const DEFAULT_OPERATION_MAX_INTERVAL: f64 = 256.0;
const DEFAULT_OPERATION_EXPONENTIAL_BASE: u32 = 2;
const DEFAULT_OPERATION_MAX_POLLS: u32 = 9;
const DEFAULT_JOB_INTERVAL: f64 = 30.0;

/// How often to poll and when to give up.
///
/// The delay before poll `n + 1` is `initial_interval * base^n`, capped at `max_interval`.
/// Without `max_polls` or `max_elapsed` polling continues until the remote side reports a
/// terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub base: u32,
    pub max_polls: Option<u32>,
    pub max_elapsed: Option<Duration>,
}

impl PollPolicy {
    pub fn exponential(initial_interval: Duration, max_interval: Duration, base: u32) -> Self {
        Self {
            initial_interval,
            max_interval,
            base,
            max_polls: None,
            max_elapsed: None,
        }
    }

    pub fn fixed(interval: Duration) -> Self {
        Self::exponential(interval, interval, 1)
    }

    /// Default for long-running operations: 1s doubling, at most 9 polls.
    pub fn operations() -> Self {
        Self::exponential(
            Duration::from_secs_f64(DEFAULT_OPERATION_INITIAL_INTERVAL),
            Duration::from_secs_f64(DEFAULT_OPERATION_MAX_INTERVAL),
            DEFAULT_OPERATION_EXPONENTIAL_BASE,
        )
        .with_max_polls(DEFAULT_OPERATION_MAX_POLLS)
    }

    /// Default for training jobs: every 30s, unbounded.
    pub fn jobs() -> Self {
        Self::fixed(Duration::from_secs_f64(DEFAULT_JOB_INTERVAL))
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }

    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = Some(max_elapsed);
        self
    }

    /// Delay after `n_past_polls` unsuccessful polls (the first delay is `delay(1)`).
    pub fn delay(&self, n_past_polls: u32) -> Duration {
        let exponent = n_past_polls.saturating_sub(1);
        let factor = self.base.checked_pow(exponent).unwrap_or(u32::MAX);
        self.initial_interval
            .saturating_mul(factor)
            .min(self.max_interval)
    }
}

/// Tracks one polling loop against a [`PollPolicy`].
pub(crate) struct Poller<'a> {
    policy: &'a PollPolicy,
    resource: &'a str,
    polls: u32,
    started: Instant,
}

impl<'a> Poller<'a> {
    pub(crate) fn new(policy: &'a PollPolicy, resource: &'a str) -> Self {
        Self {
            policy,
            resource,
            polls: 0,
            started: Instant::now(),
        }
    }

    pub(crate) fn polls(&self) -> u32 {
        self.polls
    }

    /// Records a poll that did not observe a terminal state, then sleeps until the next one.
    /// Fails once the policy's bounds would be exceeded.
    pub(crate) async fn wait(&mut self) -> Result<()> {
        self.polls += 1;
        let elapsed = self.started.elapsed();
        let delay = self.policy.delay(self.polls);

        let polls_exhausted = self.policy.max_polls.is_some_and(|max| self.polls >= max);
        let time_exhausted = self
            .policy
            .max_elapsed
            .is_some_and(|max| elapsed.saturating_add(delay) > max);
        if polls_exhausted || time_exhausted {
            return Err(HookError::NotCompleted {
                resource: self.resource.to_string(),
                attempts: self.polls,
                elapsed,
            });
        }

        debug!(
            "{} not done after {} polls, next poll in {:?}",
            self.resource, self.polls, delay
        );
        tokio::time::sleep(delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_delay_is_capped() {
        let policy = PollPolicy::operations();
        assert_eq!(policy.delay(1), Duration::from_secs(1));
        assert_eq!(policy.delay(2), Duration::from_secs(2));
        assert_eq!(policy.delay(4), Duration::from_secs(8));
        assert_eq!(policy.delay(9), Duration::from_secs(256));
        assert_eq!(policy.delay(40), Duration::from_secs(256));
        assert_eq!(policy.max_polls, Some(9));
    }

    #[test]
    fn job_policy_is_fixed_and_unbounded() {
        let policy = PollPolicy::jobs();
        assert_eq!(policy.delay(1), Duration::from_secs(30));
        assert_eq!(policy.delay(100), Duration::from_secs(30));
        assert_eq!(policy.max_polls, None);
        assert_eq!(policy.max_elapsed, None);
    }

    #[tokio::test]
    async fn poller_stops_at_max_polls() {
        let policy = PollPolicy::fixed(Duration::ZERO).with_max_polls(3);
        let mut poller = Poller::new(&policy, "projects/p/operations/o");
        assert!(poller.wait().await.is_ok());
        assert!(poller.wait().await.is_ok());
        match poller.wait().await {
            Err(HookError::NotCompleted {
                resource, attempts, ..
            }) => {
                assert_eq!(resource, "projects/p/operations/o");
                assert_eq!(attempts, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(poller.polls(), 3);
    }

    #[tokio::test]
    async fn poller_stops_before_exceeding_max_elapsed() {
        let policy =
            PollPolicy::fixed(Duration::from_secs(30)).with_max_elapsed(Duration::from_secs(10));
        let mut poller = Poller::new(&policy, "projects/p/jobs/j1");
        assert!(matches!(
            poller.wait().await,
            Err(HookError::NotCompleted { attempts: 1, .. })
        ));
    }

    #[tokio::test]
    async fn poller_handles_delays_near_duration_max() {
        let policy = PollPolicy::fixed(Duration::MAX).with_max_elapsed(Duration::from_secs(60));
        let mut poller = Poller::new(&policy, "projects/p/jobs/j1");
        assert!(matches!(
            poller.wait().await,
            Err(HookError::NotCompleted { attempts: 1, .. })
        ));
    }
}
