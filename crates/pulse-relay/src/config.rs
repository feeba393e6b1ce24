// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface and validated service config.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

/// Default relay closed time per pulse.
pub const DEFAULT_TIME_ON: Duration = Duration::from_millis(500);

/// Raw command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Pulse relay service")]
pub struct Args {
    /// TCP listener for browsers (e.g. 0.0.0.0:8080)
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,
    /// Directory served at `/` (page with #pulseButton plus the wasm bundle)
    #[arg(long, default_value = "crates/pulse-relay/static")]
    pub doc_root: PathBuf,
    /// Milliseconds the relay stays closed per pulse
    #[arg(long, default_value_t = 500)]
    pub time_on_ms: u64,
}

/// Rejected arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayConfigError {
    /// A zero-length pulse would never close the relay.
    #[error("pulse length must be greater than zero")]
    ZeroTimeOn,
    /// The document root does not exist or is not a directory.
    #[error("doc root {0} is not a directory")]
    DocRoot(PathBuf),
}

/// Validated service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Listener address.
    pub listen: SocketAddr,
    /// Static document root.
    pub doc_root: PathBuf,
    /// Relay closed time per pulse.
    pub time_on: Duration,
}

impl TryFrom<Args> for RelayConfig {
    type Error = RelayConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.time_on_ms == 0 {
            return Err(RelayConfigError::ZeroTimeOn);
        }
        if !args.doc_root.is_dir() {
            return Err(RelayConfigError::DocRoot(args.doc_root));
        }
        Ok(Self {
            listen: args.listen,
            doc_root: args.doc_root,
            time_on: Duration::from_millis(args.time_on_ms),
        })
    }
}
