use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Window};

use crate::clock::{ClockWidget, LocalTime, TextSlot, TimeSource, DATE_SELECTOR, TICK, TIME_SELECTOR};

impl TextSlot for HtmlElement {
    fn text(&self) -> String {
        self.inner_text()
    }

    fn set_text(&mut self, text: &str) {
        self.set_inner_text(text);
    }
}

/// Stop handle for a clock started with [`clock_init`].
///
/// Freeing the handle from JavaScript stops the clock as well.
#[wasm_bindgen]
pub struct WebClockHandle {
    window: Window,
    interval: Option<i32>,
    _tick: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl WebClockHandle {
    /// Stops refreshing. Calling it twice is harmless.
    pub fn stop(&mut self) {
        if let Some(id) = self.interval.take() {
            self.window.clear_interval_with_handle(id);
        }
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }
}

impl Drop for WebClockHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn find_slot(document: &web_sys::Document, widget_id: &str, selector: &str) -> Result<HtmlElement, JsValue> {
    let full = format!("#{widget_id} {selector}");
    document
        .query_selector(&full)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| js_sys::Error::new(&format!("no element matches '{full}'")).into())
}

/// Starts the clock inside `#{widget_id}`.
///
/// Renders immediately, then once per second until the returned handle is
/// stopped or freed.
#[wasm_bindgen(js_name = clockInit)]
pub fn clock_init(widget_id: &str) -> Result<WebClockHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| js_sys::Error::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| js_sys::Error::new("no document"))?;

    let time = find_slot(&document, widget_id, TIME_SELECTOR)?;
    let date = find_slot(&document, widget_id, DATE_SELECTOR)?;
    let mut widget = ClockWidget::new(time, date);
    widget.update(&LocalTime.now());

    let tick = Closure::<dyn FnMut()>::new(move || widget.update(&LocalTime.now()));
    let interval = window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TICK.as_millis() as i32,
    )?;

    Ok(WebClockHandle {
        window,
        interval: Some(interval),
        _tick: tick,
    })
}
