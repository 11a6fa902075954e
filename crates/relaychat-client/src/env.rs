//! Environment abstraction for deterministic testing.
//!
//! Decouples session logic from the system clock. Production uses
//! [`SystemEnv`]; tests supply a fixed or stepping clock so message
//! timestamps are reproducible.

use chrono::{DateTime, Utc};

/// Abstract environment providing wall-clock time.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current wall-clock time. Used to stamp appended messages.
    fn now(&self) -> DateTime<Utc>;
}

/// Environment backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a system environment.
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic environment for tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    use std::sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    };

    use chrono::{DateTime, Utc};

    use super::Environment;

    /// Clock that starts at a fixed instant and advances one second per
    /// reading. Clones share the same clock.
    #[derive(Debug, Clone)]
    pub struct MockEnv {
        start: DateTime<Utc>,
        ticks: Arc<AtomicI64>,
    }

    impl MockEnv {
        /// Clock starting at 2024-01-01 12:00:00 UTC.
        pub fn new() -> Self {
            Self::starting_at(DateTime::from_timestamp(1_704_110_400, 0).unwrap_or_default())
        }

        /// Clock starting at `start`.
        pub fn starting_at(start: DateTime<Utc>) -> Self {
            Self { start, ticks: Arc::new(AtomicI64::new(0)) }
        }
    }

    impl Default for MockEnv {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Environment for MockEnv {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
            self.start + chrono::Duration::seconds(tick)
        }
    }
}
