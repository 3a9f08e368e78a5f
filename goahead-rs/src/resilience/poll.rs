//! Polling the go-ahead service until it says yes
//!
//! A caller that wants to restart asks repeatedly, waiting between attempts.
//! The wait comes from an exponential backoff (constant by default) and is
//! stretched to the service's `ask_again_in` hint when that is longer.

use std::future::Future;
use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};

use crate::inquiry::Verdict;

/// Polling policy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Additional attempts after the first one (0 means ask once)
    pub max_retries: u32,

    /// Wait before the first retry
    pub delay: Duration,

    /// Upper bound for any wait, including the service's hint
    pub max_delay: Duration,

    /// Growth of the wait between retries; 1.0 keeps it constant
    pub multiplier: f64,

    /// Jitter applied to each wait
    pub randomization_factor: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::from_secs(60),
            max_delay: Duration::from_secs(600),
            multiplier: 1.0,
            randomization_factor: 0.0,
        }
    }
}

/// Repeats an inquiry until it is granted or the retries run out
#[derive(Debug, Clone)]
pub struct Poller {
    config: PollConfig,
}

impl Poller {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Run `attempt` until it grants or `max_retries` extra attempts were made
    ///
    /// Returns the last verdict.
    pub async fn poll<F, Fut>(&self, mut attempt: F) -> Verdict
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Verdict>,
    {
        let mut backoff = self.backoff();
        let mut attempts = 0;

        loop {
            let verdict = attempt().await;
            if verdict.granted || attempts >= self.config.max_retries {
                return verdict;
            }

            let wait = self.next_wait(backoff.next_backoff(), verdict.ask_again_in);
            log::info!(
                "Restart not permitted yet, asking again in {:?} (attempt {}/{})",
                wait,
                attempts + 1,
                self.config.max_retries
            );

            tokio::time::sleep(wait).await;
            attempts += 1;
        }
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.config.delay)
            .with_max_interval(self.max_delay())
            .with_multiplier(self.config.multiplier)
            .with_randomization_factor(self.config.randomization_factor)
            .with_max_elapsed_time(None)
            .build()
    }

    fn max_delay(&self) -> Duration {
        self.config.max_delay.max(self.config.delay)
    }

    /// The scheduled wait, raised to the service's hint but never past `max_delay`
    fn next_wait(&self, scheduled: Option<Duration>, hint: Option<Duration>) -> Duration {
        let scheduled = scheduled.unwrap_or(self.config.delay);
        match hint {
            Some(hint) => scheduled.max(hint.min(self.max_delay())),
            None => scheduled,
        }
    }
}
