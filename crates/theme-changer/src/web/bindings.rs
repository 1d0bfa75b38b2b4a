use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use super::document::{DispatchSlot, WebDocument};
use super::storage::LocalStorageStore;
use crate::controller::{ThemeController, ThemeControllerOptions};
use crate::error::ThemeError;
use crate::theme::ThemeRegistry;

type WebController = ThemeController<WebDocument, LocalStorageStore>;

fn to_js(error: ThemeError) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

fn busy() -> JsValue {
    js_sys::Error::new("theme controller is busy").into()
}

fn toggle(controller: &Weak<RefCell<WebController>>) {
    let Some(strong) = controller.upgrade() else {
        return;
    };
    match strong.try_borrow_mut() {
        Ok(mut controller) => controller.toggle_theme_picker(),
        Err(_) => warn!("theme picker toggle ignored, controller busy"),
    }
}

/// Page-level theme controller exported to JavaScript.
///
/// One instance per page. Event handlers hold weak references, so dropping
/// (`free()`-ing) the instance detaches everything it wired up.
#[wasm_bindgen]
pub struct ThemeChanger {
    controller: Rc<RefCell<WebController>>,
    toggle_button: Option<(Element, Closure<dyn FnMut(Event)>)>,
}

impl ThemeChanger {
    fn with_registry(registry: ThemeRegistry) -> Result<ThemeChanger, JsValue> {
        console_error_panic_hook::set_once();

        let dispatch = DispatchSlot::default();
        let document = WebDocument::new(dispatch.clone()).map_err(|e| to_js(e.into()))?;
        let controller = Rc::new(RefCell::new(ThemeController::new(
            registry,
            document,
            LocalStorageStore::new(),
        )));

        let weak = Rc::downgrade(&controller);
        dispatch.set(move |event| {
            let Some(strong) = weak.upgrade() else {
                return;
            };
            let Ok(mut controller) = strong.try_borrow_mut() else {
                warn!("theme controller busy, dropping picker event");
                return;
            };
            if let Err(e) = controller.handle_picker_event(event) {
                warn!(error = %e, "theme picker selection failed");
            }
        });

        Ok(Self {
            controller,
            toggle_button: None,
        })
    }

    fn with_controller<R>(&self, f: impl FnOnce(&mut WebController) -> R) -> Result<R, JsValue> {
        let mut controller = self.controller.try_borrow_mut().map_err(|_| busy())?;
        Ok(f(&mut controller))
    }

    fn unbind_toggle_button(&mut self) {
        if let Some((button, listener)) = self.toggle_button.take() {
            let _ = button
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        }
    }
}

#[wasm_bindgen]
impl ThemeChanger {
    /// Controller over the built-in `os` / `light` / `dark` themes.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ThemeChanger, JsValue> {
        Self::with_registry(ThemeRegistry::builtin())
    }

    /// Controller over a JSON theme catalog.
    #[wasm_bindgen(js_name = fromCatalog)]
    pub fn from_catalog(catalog_json: &str) -> Result<ThemeChanger, JsValue> {
        let registry = ThemeRegistry::from_json_str(catalog_json).map_err(to_js)?;
        Self::with_registry(registry)
    }

    /// Sets the picker parent, persistence and selected class. Last call wins.
    pub fn configure(
        &self,
        theme_picker_parent: Element,
        use_local: bool,
        selected_theme_css_class: &str,
    ) -> Result<(), JsValue> {
        let options = ThemeControllerOptions::new(theme_picker_parent)
            .use_local(use_local)
            .selected_theme_css_class(selected_theme_css_class);
        self.with_controller(|controller| controller.configure(options))
    }

    pub fn on_load(&self) -> Result<(), JsValue> {
        self.with_controller(|controller| controller.on_load())?
            .map_err(to_js)
    }

    pub fn apply_theme(&self, key: &str) -> Result<(), JsValue> {
        self.with_controller(|controller| controller.apply_theme(key))?
            .map_err(to_js)
    }

    pub fn select(&self, key: &str) -> Result<(), JsValue> {
        self.with_controller(|controller| controller.select(key))?
            .map_err(to_js)
    }

    /// Opens or closes the picker.
    ///
    /// When called from a click handler, pass the event: its propagation is
    /// stopped so the same click doesn't reach the picker's outside-click
    /// listener and close it again.
    pub fn toggle_theme_picker(&self, event: Option<Event>) {
        if let Some(event) = event {
            event.stop_propagation();
        }
        toggle(&Rc::downgrade(&self.controller));
    }

    /// Wires a button's clicks to [`toggle_theme_picker`](Self::toggle_theme_picker)
    /// and removes its `hidden` class.
    pub fn bind_toggle_button(&mut self, button_id: &str) -> Result<(), JsValue> {
        let button = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(button_id))
            .ok_or_else(|| JsValue::from(js_sys::Error::new(&format!("no element #{button_id}"))))?;

        let weak = Rc::downgrade(&self.controller);
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.stop_propagation();
            toggle(&weak);
        });
        button.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
        button.class_list().remove_1("hidden")?;

        self.unbind_toggle_button();
        self.toggle_button = Some((button, listener));
        Ok(())
    }

    /// Key of the active theme.
    #[wasm_bindgen(getter)]
    pub fn current(&self) -> Option<String> {
        let controller = self.controller.try_borrow().ok()?;
        controller.current_key().map(str::to_string)
    }

    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.controller
            .try_borrow()
            .is_ok_and(|controller| controller.is_picker_open())
    }

    /// `"light"` or `"dark"`, resolving the OS theme through `matchMedia`.
    #[wasm_bindgen(getter, js_name = colorMode)]
    pub fn color_mode(&self) -> Option<String> {
        let controller = self.controller.try_borrow().ok()?;
        controller.color_mode().map(|mode| mode.as_str().to_string())
    }
}

impl Drop for ThemeChanger {
    fn drop(&mut self) {
        self.unbind_toggle_button();
    }
}
