// ABOUTME: Periodic background task persisting an in-progress workout
// ABOUTME: Stopped through a shutdown channel, aborted if dropped while still running
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, warn};

/// Handle to a running auto-save loop
///
/// The first save happens one full interval after spawning.
pub struct AutoSaveTask {
    shutdown_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl AutoSaveTask {
    /// Spawn a loop calling `save` every `period`
    pub fn spawn<F, Fut>(period: Duration, mut save: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        save().await;
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Auto-save task received shutdown signal");
                        break;
                    }
                }
            }
        });

        debug!(interval_secs = period.as_secs(), "Auto-save task started");
        Self {
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Whether the loop is still alive
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal shutdown and wait for an in-flight save to finish
    pub async fn stop(mut self) {
        if self.shutdown_tx.send(()).await.is_err() {
            debug!("Auto-save task already exited");
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Auto-save task ended abnormally");
            }
        }
    }
}

impl Drop for AutoSaveTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
