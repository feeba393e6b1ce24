// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed wiring for the pulse button.

use std::time::Duration;

/// DOM id of the button the controller binds to.
pub const DEFAULT_ELEMENT_ID: &str = "pulseButton";
/// Relative path requested on every accepted click.
pub const DEFAULT_ENDPOINT: &str = "/pulse";
/// Delay between request settlement and re-enable.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(5000);

/// Controller wiring. The defaults are the only values the page uses; the
/// struct exists so adapters and tests can name them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Id of the bound element.
    pub element_id: String,
    /// Endpoint hit once per accepted click.
    pub endpoint: String,
    /// Time the button stays disabled after settlement.
    pub cooldown: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            element_id: DEFAULT_ELEMENT_ID.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}
