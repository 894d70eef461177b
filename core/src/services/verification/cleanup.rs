//! Background sweep of expired verification codes
//!
//! Codes for addresses that never come back to verify would otherwise stay
//! in the store forever. The sweeper removes them on a fixed interval.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::service::VerificationService;

/// Result of a single sweep cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired entries removed
    pub removed: usize,
    /// Number of entries still pending afterwards
    pub remaining: usize,
}

/// Service that periodically sweeps a [`VerificationService`]
pub struct SweepService {
    verification: Arc<VerificationService>,
    interval_seconds: u64,
}

impl SweepService {
    /// Create a sweeper using the service's configured interval
    pub fn new(verification: Arc<VerificationService>) -> Self {
        let interval_seconds = verification.config().sweep_interval_seconds;
        Self {
            verification,
            interval_seconds,
        }
    }

    /// Override the sweep interval (0 disables the background task)
    pub fn with_interval(mut self, interval_seconds: u64) -> Self {
        self.interval_seconds = interval_seconds;
        self
    }

    /// Run a single sweep cycle
    pub fn run_once(&self) -> SweepResult {
        let removed = self.verification.sweep();
        SweepResult {
            removed,
            remaining: self.verification.pending_count(),
        }
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the interval is 0. Must be called from within a
    /// tokio runtime. Abort the returned handle to stop sweeping.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.interval_seconds == 0 {
            warn!("Verification code sweeper is disabled");
            return None;
        }

        let period = Duration::from_secs(self.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Verification code sweeper started - will run every {} seconds",
                self.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(period);

            loop {
                interval_timer.tick().await;

                let result = self.run_once();
                debug!(
                    removed = result.removed,
                    remaining = result.remaining,
                    "Sweep cycle completed"
                );
            }
        }))
    }
}
