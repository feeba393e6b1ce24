// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Request failure taxonomy.

use thiserror::Error;

/// Ways a pulse request can fail. The controller logs these and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PulseError {
    /// The request never produced a response (offline, DNS, CORS, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The endpoint answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(u16),
}
