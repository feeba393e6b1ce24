// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Click → disable → request → cooldown → re-enable.

use std::future::Future;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::error::PulseError;
use crate::port::{ButtonPort, PulsePort, TimerPort};

/// Observable button state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// `true` from an accepted click until its cooldown expires.
    pub disabled: bool,
}

/// How a request concluded. Both variants lead to the same cooldown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The endpoint answered with a success status.
    Succeeded,
    /// The request failed or the endpoint answered with an error status.
    Failed(PulseError),
}

impl From<Result<(), PulseError>> for Settlement {
    fn from(res: Result<(), PulseError>) -> Self {
        match res {
            Ok(()) => Self::Succeeded,
            Err(err) => Self::Failed(err),
        }
    }
}

/// Binds one button to one endpoint.
///
/// A click is split in two halves so the browser adapter can disable the
/// button inside the event handler and hand the rest to the event loop:
/// [`press`](Self::press) disables synchronously and returns the suspended
/// part as a future bound to this controller.
#[derive(Debug)]
pub struct ButtonController<B, N, T> {
    button: B,
    pulse: N,
    timer: T,
    config: ControllerConfig,
}

impl<B, N, T> ButtonController<B, N, T>
where
    B: ButtonPort,
    N: PulsePort,
    T: TimerPort,
{
    /// Wrap the given ports. The button is left as found (enabled at page load).
    pub fn new(button: B, pulse: N, timer: T, config: ControllerConfig) -> Self {
        Self {
            button,
            pulse,
            timer,
            config,
        }
    }

    /// Wiring in use.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Current button state.
    pub fn state(&self) -> ButtonState {
        ButtonState {
            disabled: self.button.is_disabled(),
        }
    }

    /// Accept a click if the button is enabled, disabling it before
    /// returning. The returned future issues the request, waits for it to
    /// settle, waits out the cooldown and re-enables the button. Returns
    /// `None` while a cycle is in flight.
    pub fn press(&self) -> Option<impl Future<Output = ()> + '_> {
        self.accept().then(|| self.run_cycle())
    }

    /// [`press`](Self::press) for a controller shared through `Rc`; the
    /// future owns its handle so it can be spawned on the event loop.
    pub fn press_shared(self: Rc<Self>) -> Option<impl Future<Output = ()>> {
        if !self.accept() {
            return None;
        }
        Some(async move { self.run_cycle().await })
    }

    /// [`press`](Self::press) and await the cycle. Returns at once when the
    /// click is ignored.
    pub async fn handle_click(&self) {
        if let Some(cycle) = self.press() {
            cycle.await;
        }
    }

    fn accept(&self) -> bool {
        if self.button.is_disabled() {
            debug!("click ignored: button disabled");
            return false;
        }
        self.button.set_disabled(true);
        true
    }

    async fn run_cycle(&self) {
        let endpoint = self.config.endpoint.as_str();
        info!(endpoint, "pulse requested");

        match Settlement::from(self.pulse.send(endpoint).await) {
            Settlement::Succeeded => debug!(endpoint, "pulse request settled"),
            Settlement::Failed(err) => warn!(endpoint, %err, "pulse request failed"),
        }

        self.timer.sleep(self.config.cooldown).await;
        self.button.set_disabled(false);
        debug!(cooldown_ms = self.config.cooldown.as_millis(), "button re-enabled");
    }
}
