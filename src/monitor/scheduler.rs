use std::future::Future;
use std::time::Duration;

use crate::monitor::ReleaseMonitor;

/// Drives repeated polling cycles at a fixed interval.
///
/// Cancellation interrupts only the inter-cycle sleep: a cycle that has
/// started always completes, so no release is ever left half-processed.
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub async fn run<F>(&self, monitor: &mut ReleaseMonitor, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            "Starting continuous monitoring (checking every {} seconds)",
            self.interval.as_secs()
        );
        tokio::pin!(shutdown);

        loop {
            monitor.run_once().await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, monitoring stopped");
                    return;
                }
            }
        }
    }
}
