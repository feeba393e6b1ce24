// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `web-sys` implementations of the controller ports.

use std::time::Duration;

use js_sys::Promise;
use pulse_core::{ButtonPort, PulseError, PulsePort, TimerPort};
use tracing::error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlButtonElement, Response, Window};

pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// The bound `<button>`; state lives in its `disabled` property.
#[derive(Debug, Clone)]
pub struct DomButton {
    element: HtmlButtonElement,
}

impl DomButton {
    /// Wrap a button element.
    pub fn new(element: HtmlButtonElement) -> Self {
        Self { element }
    }

    /// Underlying element.
    pub fn element(&self) -> &HtmlButtonElement {
        &self.element
    }
}

impl ButtonPort for DomButton {
    fn is_disabled(&self) -> bool {
        self.element.disabled()
    }

    fn set_disabled(&self, disabled: bool) {
        self.element.set_disabled(disabled);
    }
}

/// `window.fetch(endpoint)` with no init object.
#[derive(Debug, Clone)]
pub struct FetchPulse {
    window: Window,
}

impl FetchPulse {
    /// Fetch through `window`.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl PulsePort for FetchPulse {
    async fn send(&self, endpoint: &str) -> Result<(), PulseError> {
        let value = JsFuture::from(self.window.fetch_with_str(endpoint))
            .await
            .map_err(|err| PulseError::Network(describe(&err)))?;
        let response: Response = value
            .dyn_into()
            .map_err(|other| PulseError::Network(format!("not a Response: {}", describe(&other))))?;
        if response.ok() {
            Ok(())
        } else {
            Err(PulseError::Status(response.status()))
        }
    }
}

/// `setTimeout` wrapped in a promise.
#[derive(Debug, Clone)]
pub struct BrowserTimer {
    window: Window,
}

impl BrowserTimer {
    /// Schedule on `window`.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl TimerPort for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let window = &self.window;
        let promise = Promise::new(&mut |resolve, _reject| {
            if let Err(err) =
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            {
                // Resolve now rather than leave the button disabled for good.
                error!(error = %describe(&err), "setTimeout failed");
                let _ = resolve.call0(&JsValue::UNDEFINED);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn window() -> Window {
        web_sys::window().expect("window")
    }

    #[wasm_bindgen_test]
    async fn missing_endpoint_reports_status() {
        let pulse = FetchPulse::new(window());
        let res = pulse.send("/pulse-web-no-such-endpoint").await;
        assert_eq!(res, Err(PulseError::Status(404)));
    }

    #[wasm_bindgen_test]
    async fn unparsable_url_reports_network_error() {
        let pulse = FetchPulse::new(window());
        let res = pulse.send("http://[::1").await;
        assert!(matches!(res, Err(PulseError::Network(_))), "got {res:?}");
    }

    #[wasm_bindgen_test]
    async fn timer_resolves_after_duration() {
        let timer = BrowserTimer::new(window());
        let started = js_sys::Date::now();
        timer.sleep(Duration::from_millis(10)).await;
        // Date.now() is clamped in some browsers; allow one tick of slack.
        assert!(js_sys::Date::now() - started >= 9.0);
    }
}
