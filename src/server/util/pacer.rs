//! Pacing delays for the live status display.
//!
//! The backup waits a fixed time before starting work and after skipping an
//! inaccessible channel so that users can read the status message. These pauses are
//! hidden behind the [`Pacer`] trait so tests run them instantly.

use serenity::async_trait;
use std::time::Duration;

/// Delay before the backup starts, letting the status message render.
pub const START_DELAY: Duration = Duration::from_secs(10);

/// Delay after a forbidden channel was skipped.
pub const SKIP_DELAY: Duration = Duration::from_secs(5);

#[async_trait]
pub trait Pacer: Send + Sync {
    /// Suspends the current backup for `duration`.
    async fn pause(&self, duration: Duration);
}

/// Pacer backed by the tokio timer.
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
