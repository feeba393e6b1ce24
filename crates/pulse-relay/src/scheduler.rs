// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! One-shot pulse timer.
//!
//! There is a single timer: triggering while a pulse is pending (delayed or
//! mid-pulse) cancels it and starts over. A cancelled pulse leaves the
//! relay where it was; the replacement closes it again and opens it when
//! done.
//!
//! The closed time is read when the relay closes, so a change made while a
//! delayed pulse waits applies to that pulse.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::RelayConfigError;
use crate::relay::RelayPort;

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Drives `relay` through delayed, fixed-length pulses.
#[derive(Debug)]
pub struct PulseScheduler<R> {
    relay: Arc<R>,
    time_on_ms: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<R: RelayPort> PulseScheduler<R> {
    /// Pulses close `relay` for `time_on` until changed with
    /// [`set_time_on`](Self::set_time_on).
    pub fn new(relay: Arc<R>, time_on: Duration) -> Self {
        Self {
            relay,
            time_on_ms: Arc::new(AtomicU64::new(as_millis(time_on))),
            pending: Mutex::new(None),
        }
    }

    /// Relay closed time per pulse.
    pub fn time_on(&self) -> Duration {
        Duration::from_millis(self.time_on_ms.load(Ordering::Acquire))
    }

    /// Change the closed time for subsequent pulses. Kept in memory only.
    pub fn set_time_on(&self, time_on: Duration) -> Result<(), RelayConfigError> {
        let millis = as_millis(time_on);
        if millis == 0 {
            return Err(RelayConfigError::ZeroTimeOn);
        }
        self.time_on_ms.store(millis, Ordering::Release);
        info!(time_on_ms = millis, "pulse length updated");
        Ok(())
    }

    /// Start a pulse after `delay` (or now), replacing any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&self, delay: Option<Duration>) {
        let relay = Arc::clone(&self.relay);
        let time_on_ms = Arc::clone(&self.time_on_ms);
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(prev) = pending.take() {
            if !prev.is_finished() {
                debug!("pending pulse replaced");
            }
            prev.abort();
        }
        *pending = Some(tokio::spawn(async move {
            if let Some(delay) = delay {
                debug!(delay_ms = delay.as_millis(), "pulse delayed");
                sleep(delay).await;
            }
            let time_on = Duration::from_millis(time_on_ms.load(Ordering::Acquire));
            relay.set(true);
            sleep(time_on).await;
            relay.set(false);
        }));
    }

    /// `true` while a pulse is waiting or running.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Cancel any pending pulse and open the relay.
    pub fn shutdown(&self) {
        if let Some(task) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
        self.relay.set(false);
    }
}
