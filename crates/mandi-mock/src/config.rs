//! # Mock API Configuration
//!
//! Latency settings for the simulated network calls.
//!
//! ## Delay Classes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Delay class   Default   Used by                                        │
//! │  ───────────   ───────   ─────────────────────────────────────────────  │
//! │  default       400ms     list / get / add / update / analysis / summary │
//! │  search        200ms     products().search                              │
//! │  login         300ms     auth().login                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;
use tracing::trace;

/// Which latency class an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delay {
    Default,
    Search,
    Login,
}

/// Mock API configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use mandi_mock::MockConfig;
///
/// let config = MockConfig::new()
///     .default_delay(Duration::from_millis(50))
///     .search_delay(Duration::from_millis(10));
/// assert_eq!(config.login_delay, Duration::from_millis(300));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockConfig {
    /// Delay for ordinary reads and writes.
    /// Default: 400ms
    pub default_delay: Duration,

    /// Delay for product search.
    /// Default: 200ms
    pub search_delay: Duration,

    /// Delay for login.
    /// Default: 300ms
    pub login_delay: Duration,
}

impl MockConfig {
    /// Creates a configuration with the standard latencies.
    pub fn new() -> Self {
        MockConfig {
            default_delay: Duration::from_millis(400),
            search_delay: Duration::from_millis(200),
            login_delay: Duration::from_millis(300),
        }
    }

    /// Creates a zero-latency configuration (for testing).
    pub fn instant() -> Self {
        MockConfig {
            default_delay: Duration::ZERO,
            search_delay: Duration::ZERO,
            login_delay: Duration::ZERO,
        }
    }

    /// Sets the default delay.
    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Sets the search delay.
    pub fn search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }

    /// Sets the login delay.
    pub fn login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = delay;
        self
    }

    fn duration_for(&self, class: Delay) -> Duration {
        match class {
            Delay::Default => self.default_delay,
            Delay::Search => self.search_delay,
            Delay::Login => self.login_delay,
        }
    }

    /// Waits for the configured delay of `class`.
    ///
    /// This is the only suspension point inside the mock API.
    pub(crate) async fn simulate(&self, class: Delay) {
        let delay = self.duration_for(class);
        if delay.is_zero() {
            return;
        }
        trace!(?class, delay_ms = delay.as_millis() as u64, "Simulating latency");
        tokio::time::sleep(delay).await;
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        MockConfig::new()
    }
}
