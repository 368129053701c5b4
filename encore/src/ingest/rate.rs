use std::time::Duration;

use crate::config::TicketingConfig;

/// Pacing between upstream requests. Injected into the fetcher so tests
/// can run with zero delays.
pub trait RatePolicy: Send + Sync {
    /// Pause inserted after every page request.
    fn page_delay(&self) -> Duration;

    /// Longer pause inserted after each (borough, window) batch.
    fn window_delay(&self) -> Duration;
}

/// Fixed pauses, sized to stay under the upstream per-key rate limits.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    page: Duration,
    window: Duration,
}

impl FixedDelay {
    pub fn new(page: Duration, window: Duration) -> Self {
        Self { page, window }
    }

    pub fn from_config(config: &TicketingConfig) -> Self {
        Self::new(
            Duration::from_millis(config.page_delay_ms),
            Duration::from_millis(config.window_delay_ms),
        )
    }

    /// Zero-delay policy for deterministic tests.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl RatePolicy for FixedDelay {
    fn page_delay(&self) -> Duration {
        self.page
    }

    fn window_delay(&self) -> Duration {
        self.window
    }
}
