// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Element lookup and click-listener wiring.

use std::rc::Rc;

use pulse_core::{ButtonController, ControllerConfig};
use thiserror::Error;
use tracing::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, MouseEvent};

use crate::adapter::{describe, BrowserTimer, DomButton, FetchPulse};

/// Controller over the browser adapters.
pub type WebController = ButtonController<DomButton, FetchPulse, BrowserTimer>;

/// Reasons the page could not be bound. There is no retry.
#[derive(Debug, Error)]
pub enum BindError {
    /// No global `window` (not running in a page).
    #[error("no global window")]
    NoWindow,
    /// The window has no document.
    #[error("window has no document")]
    NoDocument,
    /// Nothing on the page carries the configured id.
    #[error("no element with id `{0}`")]
    MissingElement(String),
    /// The id names something other than a `<button>`.
    #[error("element `{0}` is not a <button>")]
    NotAButton(String),
    /// `addEventListener` threw.
    #[error("failed to attach click listener: {0}")]
    Listener(String),
}

impl From<BindError> for JsValue {
    fn from(err: BindError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// A bound button. Dropping it invalidates the click listener; call
/// [`forget`](Self::forget) to keep it for the lifetime of the page.
pub struct PulseButton {
    controller: Rc<WebController>,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

impl PulseButton {
    /// The controller behind the listener.
    pub fn controller(&self) -> &WebController {
        &self.controller
    }

    /// Leak the listener so it outlives this handle.
    pub fn forget(self) {
        self.on_click.forget();
    }
}

impl std::fmt::Debug for PulseButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseButton")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

/// Look up `config.element_id` and attach the click handler.
///
/// The handler disables the button before returning to the browser, then
/// hands the request and cooldown to the event loop with `spawn_local`.
pub fn bind(config: ControllerConfig) -> Result<PulseButton, BindError> {
    let window = web_sys::window().ok_or(BindError::NoWindow)?;
    let document = window.document().ok_or(BindError::NoDocument)?;
    let element: HtmlButtonElement = document
        .get_element_by_id(&config.element_id)
        .ok_or_else(|| BindError::MissingElement(config.element_id.clone()))?
        .dyn_into()
        .map_err(|_| BindError::NotAButton(config.element_id.clone()))?;

    let controller = Rc::new(ButtonController::new(
        DomButton::new(element.clone()),
        FetchPulse::new(window.clone()),
        BrowserTimer::new(window),
        config,
    ));

    let handler = Rc::clone(&controller);
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
        if let Some(cycle) = Rc::clone(&handler).press_shared() {
            spawn_local(cycle);
        }
    });
    element
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|err| BindError::Listener(describe(&err)))?;

    info!(
        element_id = %controller.config().element_id,
        endpoint = %controller.config().endpoint,
        "pulse button bound"
    );
    Ok(PulseButton {
        controller,
        on_click,
    })
}
