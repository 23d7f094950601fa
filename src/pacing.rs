use std::time::Duration;

/// Pacing policy for the scroll loop.
///
/// The pause between rounds serves two purposes: giving lazy-loaded content
/// time to arrive, and rate-limiting against the target server. Making it a
/// trait keeps the loop testable without real delays.
pub trait Pacer {
    /// How long to wait after scroll round `round` before measuring again
    fn wait_between_rounds(&self, round: u32) -> Duration;
}

/// Fixed pause between every round
#[derive(Debug, Clone)]
pub struct FixedPacer {
    pause: Duration,
}

impl FixedPacer {
    pub fn new(pause: Duration) -> Self {
        Self { pause }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Pacer for FixedPacer {
    fn wait_between_rounds(&self, _round: u32) -> Duration {
        self.pause
    }
}

/// Zero-duration pacer for tests
#[derive(Debug, Clone, Default)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn wait_between_rounds(&self, _round: u32) -> Duration {
        Duration::ZERO
    }
}
