// ABOUTME: Countdown timer for rest between sets, publishing remaining seconds on a watch channel
// ABOUTME: Supports start, extend, reset, and cancel; the countdown task is aborted when replaced or dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

/// Rest countdown
///
/// Subscribers observe the remaining seconds; the value reaches 0 when the
/// rest is over or the timer is cancelled.
pub struct RestTimer {
    remaining: Arc<watch::Sender<u32>>,
    tick: Duration,
    task: Option<JoinHandle<()>>,
}

impl RestTimer {
    /// Create an idle timer counting down one second per `tick`
    #[must_use]
    pub fn new(tick: Duration) -> Self {
        let (remaining, _) = watch::channel(0);
        Self {
            remaining: Arc::new(remaining),
            tick,
            task: None,
        }
    }

    /// Start counting down from `seconds`, replacing any running countdown
    pub fn start(&mut self, seconds: u32) {
        self.abort_task();
        self.remaining.send_replace(seconds);
        if seconds == 0 {
            return;
        }

        let remaining = Arc::clone(&self.remaining);
        let tick = self.tick;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + tick, tick);
            loop {
                ticker.tick().await;
                let mut finished = false;
                remaining.send_modify(|left| {
                    *left = left.saturating_sub(1);
                    finished = *left == 0;
                });
                if finished {
                    debug!("Rest timer finished");
                    break;
                }
            }
        }));
        debug!(seconds, "Rest timer started");
    }

    /// Add `seconds` to the countdown, restarting it if it already finished
    pub fn extend(&mut self, seconds: u32) {
        if self.is_running() {
            self.remaining
                .send_modify(|left| *left = left.saturating_add(seconds));
        } else {
            self.start(seconds);
        }
    }

    /// Restart the countdown from `seconds`
    pub fn reset(&mut self, seconds: u32) {
        self.start(seconds);
    }

    /// Stop the countdown and publish 0
    pub fn cancel(&mut self) {
        if self.task.is_some() {
            debug!("Rest timer cancelled");
        }
        self.abort_task();
        self.remaining.send_replace(0);
    }

    /// Seconds left
    #[must_use]
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    /// Whether a countdown is in progress
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|h| !h.is_finished()) && self.remaining() > 0
    }

    /// Receiver of remaining-second updates
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.subscribe()
    }

    /// Wait until the countdown reaches 0
    pub async fn wait_finished(&self) {
        let mut rx = self.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here
        if rx.wait_for(|left| *left == 0).await.is_err() {
            debug!("Rest timer channel closed");
        }
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for RestTimer {
    fn drop(&mut self) {
        self.abort_task();
    }
}
