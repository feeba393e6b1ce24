// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Relay output port.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::info;

/// A switchable output. Hardware adapters drive a GPIO; the default
/// [`LoggingRelay`] only logs.
pub trait RelayPort: Send + Sync + 'static {
    /// Close (`true`) or open (`false`) the relay.
    fn set(&self, on: bool);
}

/// Simulated relay: tracks its level and logs every switch.
#[derive(Debug, Default)]
pub struct LoggingRelay {
    on: AtomicBool,
    switches: AtomicU64,
}

impl LoggingRelay {
    /// Current level.
    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }

    /// Number of `set` calls so far.
    pub fn switch_count(&self) -> u64 {
        self.switches.load(Ordering::Acquire)
    }
}

impl RelayPort for LoggingRelay {
    fn set(&self, on: bool) {
        self.on.store(on, Ordering::Release);
        self.switches.fetch_add(1, Ordering::AcqRel);
        info!(on, "relay switched");
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::sync::{Mutex, PoisonError};

    use tokio::time::Instant;

    use super::RelayPort;

    /// Records every switch with the (pausable) tokio time it happened at.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRelay {
        events: Mutex<Vec<(Instant, bool)>>,
    }

    impl RecordingRelay {
        pub(crate) fn events(&self) -> Vec<(Instant, bool)> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub(crate) fn levels(&self) -> Vec<bool> {
            self.events().into_iter().map(|(_, on)| on).collect()
        }
    }

    impl RelayPort for RecordingRelay {
        fn set(&self, on: bool) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((Instant::now(), on));
        }
    }
}
