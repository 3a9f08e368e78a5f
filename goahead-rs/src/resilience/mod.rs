//! Resilience patterns for callers of the go-ahead client
//!
//! The decision engine itself never waits or retries. Callers that want to
//! keep asking until a restart is permitted use the [`Poller`].

mod poll;

pub use poll::{PollConfig, Poller};
