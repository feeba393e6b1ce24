// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mock ports for headless controller tests.
//!
//! Everything here is single-threaded (`Rc` + `Cell`), like the browser the
//! real adapters run in. Pair with `#[tokio::test(start_paused = true)]` so
//! [`TokioTimer`] runs on the faked clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::PulseError;
use crate::port::{ButtonPort, PulsePort, TimerPort};

/// Button double: a shared `disabled` flag plus every write made to it.
#[derive(Debug, Clone, Default)]
pub struct MockButton {
    disabled: Rc<Cell<bool>>,
    transitions: Rc<RefCell<Vec<bool>>>,
}

impl MockButton {
    /// An enabled button with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value passed to `set_disabled`, in order.
    pub fn transitions(&self) -> Vec<bool> {
        self.transitions.borrow().clone()
    }
}

impl ButtonPort for MockButton {
    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
        self.transitions.borrow_mut().push(disabled);
    }
}

#[derive(Debug)]
enum Script {
    Resolve,
    Reject(PulseError),
    Hold,
}

#[derive(Debug)]
struct MockPulseInner {
    script: Script,
    endpoints: Vec<String>,
    held: Option<oneshot::Receiver<Result<(), PulseError>>>,
}

/// Network double that records each request and settles it per script.
#[derive(Debug, Clone)]
pub struct MockPulse {
    inner: Rc<RefCell<MockPulseInner>>,
}

impl MockPulse {
    fn with_script(script: Script) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MockPulseInner {
                script,
                endpoints: Vec::new(),
                held: None,
            })),
        }
    }

    /// Every request settles successfully at once.
    pub fn resolving() -> Self {
        Self::with_script(Script::Resolve)
    }

    /// Every request fails at once with `err`.
    pub fn rejecting(err: PulseError) -> Self {
        Self::with_script(Script::Reject(err))
    }

    /// The first request stays pending until the returned gate is settled.
    pub fn held() -> (Self, PulseGate) {
        let (tx, rx) = oneshot::channel();
        let pulse = Self::with_script(Script::Hold);
        pulse.inner.borrow_mut().held = Some(rx);
        (pulse, PulseGate(tx))
    }

    /// Number of requests issued so far.
    pub fn calls(&self) -> usize {
        self.inner.borrow().endpoints.len()
    }

    /// Endpoints requested, in order.
    pub fn endpoints(&self) -> Vec<String> {
        self.inner.borrow().endpoints.clone()
    }
}

impl PulsePort for MockPulse {
    async fn send(&self, endpoint: &str) -> Result<(), PulseError> {
        let pending = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            inner.endpoints.push(endpoint.to_owned());
            match &inner.script {
                Script::Resolve => return Ok(()),
                Script::Reject(err) => return Err(err.clone()),
                Script::Hold => inner.held.take(),
            }
        };
        match pending {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(PulseError::Network("gate dropped".into()))),
            None => Err(PulseError::Network("held request already used".into())),
        }
    }
}

/// Settles the request held by [`MockPulse::held`].
#[derive(Debug)]
pub struct PulseGate(oneshot::Sender<Result<(), PulseError>>);

impl PulseGate {
    /// Settle the held request with `outcome`.
    pub fn settle(self, outcome: Result<(), PulseError>) {
        let _ = self.0.send(outcome);
    }
}

/// Timer on the tokio clock (pausable in tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl TimerPort for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Yield enough times for sibling futures in a `join!` to observe wakeups.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
