//! Politeness delay between chapter downloads.
//!
//! Requests are strictly sequential; after each successful chapter the
//! harvester waits a fixed delay before requesting the next one. Skipped
//! chapters do not wait.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use novella_core::throttle::ThrottleConfig;
//!
//! let config = ThrottleConfig::new(Duration::from_secs(1));
//! assert_eq!(config.delay, Duration::from_secs(1));
//! assert!(ThrottleConfig::none().delay.is_zero());
//! ```

use std::time::Duration;

/// Configuration for the pause after each downloaded chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Fixed delay after each successful chapter download.
    pub delay: Duration,
}

impl ThrottleConfig {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No delay at all. Used by tests and dry runs.
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Sleep for one delay.
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::debug!(sleep_ms = %self.delay.as_millis(), "Pausing before next chapter");
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for ThrottleConfig {
    /// One second.
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
