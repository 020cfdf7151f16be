//! Wall-clock abstraction for credential issuance stamps

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time consumed by the lifecycle engine.
///
/// Injected so that issuance timestamps can be controlled in tests without
/// real waits. Countdown progression is driven separately through
/// `tick(elapsed)`; this trait only stamps new credentials.
pub trait ClockSource: Send + Sync {
    /// Current Unix timestamp in seconds
    fn now_unix(&self) -> u64;
}

/// Clock backed by [`SystemTime`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_unix() > 1_577_836_800);
    }
}
