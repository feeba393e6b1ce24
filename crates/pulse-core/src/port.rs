// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports the controller drives. Adapters own the platform details.

use std::future::Future;
use std::time::Duration;

use crate::error::PulseError;

/// The bound button element.
///
/// Methods take `&self`: DOM handles are shared references with interior
/// state, and the controller never needs exclusive access.
pub trait ButtonPort {
    /// Current `disabled` flag.
    fn is_disabled(&self) -> bool;
    /// Set the `disabled` flag.
    fn set_disabled(&self, disabled: bool);
}

/// Outbound request to the pulse endpoint.
pub trait PulsePort {
    /// Issue one GET to `endpoint` with no body, headers or query and
    /// resolve once it settles. The response body is never inspected.
    fn send(&self, endpoint: &str) -> impl Future<Output = Result<(), PulseError>>;
}

/// One-shot timer.
pub trait TimerPort {
    /// Resolve after `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
