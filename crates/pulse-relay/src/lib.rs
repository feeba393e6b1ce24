// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Device side of the pulse button: an HTTP service whose `GET /pulse`
//! closes a relay for a fixed time, optionally after a delay, and which
//! serves the page hosting the button.

pub mod config;
pub mod http;
pub mod relay;
pub mod scheduler;

pub use config::{Args, RelayConfig, RelayConfigError};
pub use http::router;
pub use relay::{LoggingRelay, RelayPort};
pub use scheduler::PulseScheduler;
