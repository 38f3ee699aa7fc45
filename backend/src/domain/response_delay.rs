//! Simulated downstream latency applied before a successful response.
//!
//! The delay has no functional effect. It exists so load tests and demos see
//! response times that vary the way a slower backend would make them vary.

use std::ops::Range;
use std::time::Duration;

use rand::Rng;

/// Inclusive lower and exclusive upper bound of the simulated delay, in
/// milliseconds.
pub const RESPONSE_DELAY_MILLIS: Range<u64> = 100..1000;

/// Source of the pause inserted before a successful response.
pub trait ResponseDelay: Send + Sync {
    /// Duration to wait for the current request.
    fn next_delay(&self) -> Duration;
}

/// Uniformly random delay over [`RESPONSE_DELAY_MILLIS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomResponseDelay;

impl ResponseDelay for RandomResponseDelay {
    fn next_delay(&self) -> Duration {
        let millis = rand::thread_rng().gen_range(RESPONSE_DELAY_MILLIS);
        Duration::from_millis(millis)
    }
}

/// Constant delay, typically zero in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedResponseDelay(pub Duration);

impl ResponseDelay for FixedResponseDelay {
    fn next_delay(&self) -> Duration {
        self.0
    }
}
