// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pulse button controller.
//!
//! One button, one endpoint, one cooldown. A click disables the button,
//! fires a single request, waits for it to settle (success and failure are
//! treated the same), waits out the cooldown and re-enables the button.
//!
//! # Design
//!
//! The controller only talks to ports ([`ButtonPort`], [`PulsePort`],
//! [`TimerPort`]). Browser adapters live in `pulse-web`; mock adapters for
//! headless tests live in [`testing`] behind the `test-utils` feature.

mod config;
mod controller;
mod error;
mod port;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::{ControllerConfig, DEFAULT_COOLDOWN, DEFAULT_ELEMENT_ID, DEFAULT_ENDPOINT};
pub use controller::{ButtonController, ButtonState, Settlement};
pub use error::PulseError;
pub use port::{ButtonPort, PulsePort, TimerPort};
