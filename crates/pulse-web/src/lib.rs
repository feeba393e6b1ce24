// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Browser bridge for the pulse button.
//!
//! Implements the `pulse-core` ports on top of `web-sys` and wires them to
//! the page's `#pulseButton` element.
//!
//! # Usage (from the page)
//!
//! ```html
//! <button id="pulseButton">Pulse</button>
//! <script type="module">
//!   import init from './pkg/pulse_web.js';
//!   await init(); // binds #pulseButton to GET /pulse
//! </script>
//! ```
//!
//! # Thread Safety
//!
//! Everything here is `!Send` and meant for the page's single event loop.

mod adapter;
mod bind;

pub use adapter::{BrowserTimer, DomButton, FetchPulse};
pub use bind::{bind, BindError, PulseButton, WebController};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// WASM entry point: installs the panic hook and console tracing, then binds
/// the default button. Fails when `#pulseButton` is missing.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    bind(pulse_core::ControllerConfig::default())?.forget();
    Ok(())
}
