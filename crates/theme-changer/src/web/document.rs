use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, Node};

use super::js_message;
use crate::dom::Document;
use crate::error::DomError;
use crate::picker::{PickerEvent, KEY_ATTRIBUTE};

type Dispatcher = Rc<dyn Fn(PickerEvent)>;

/// Late-bound target for picker events.
///
/// The document's listeners are created before the controller that owns
/// the document exists, so they report through this slot, which is filled
/// in once the controller is built.
#[derive(Clone, Default)]
pub struct DispatchSlot(Rc<RefCell<Option<Dispatcher>>>);

impl DispatchSlot {
    pub fn set(&self, dispatcher: impl Fn(PickerEvent) + 'static) {
        *self.0.borrow_mut() = Some(Rc::new(dispatcher));
    }

    fn dispatch(&self, event: PickerEvent) {
        let dispatcher = self.0.borrow().clone();
        if let Some(dispatcher) = dispatcher {
            dispatcher(event);
        }
    }
}

/// [`Document`] over the browser DOM.
///
/// Root properties go to `document.documentElement.style`. The picker is
/// inserted at the end of its parent with `insertAdjacentHTML`. Listener
/// closures are created once and live as long as the document wrapper, so
/// attaching and detaching never frees a closure that may be running.
pub struct WebDocument {
    document: web_sys::Document,
    root: HtmlElement,
    picker: Rc<RefCell<Option<Element>>>,
    on_entry_click: Closure<dyn FnMut(Event)>,
    on_document_click: Closure<dyn FnMut(Event)>,
    on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
    listening: bool,
}

fn js_error(value: JsValue) -> DomError {
    DomError::Js(js_message(&value))
}

impl WebDocument {
    /// Wraps the current window's document.
    pub fn new(dispatch: DispatchSlot) -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DomError::Js("no document available".into()))?;
        let root = document
            .document_element()
            .and_then(|root| root.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| DomError::Js("document root is not an HTML element".into()))?;
        let picker: Rc<RefCell<Option<Element>>> = Rc::new(RefCell::new(None));

        let on_entry_click = {
            let dispatch = dispatch.clone();
            let row_selector = format!("[{KEY_ATTRIBUTE}]");
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let key = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|target| target.closest(&row_selector).ok().flatten())
                    .and_then(|row| row.get_attribute(KEY_ATTRIBUTE));
                if let Some(key) = key {
                    event.stop_propagation();
                    dispatch.dispatch(PickerEvent::Select(key));
                }
            })
        };

        let on_document_click = {
            let dispatch = dispatch.clone();
            let picker = Rc::clone(&picker);
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let inside = {
                    let picker = picker.borrow();
                    match (picker.as_ref(), event.target()) {
                        (Some(picker), Some(target)) => target
                            .dyn_ref::<Node>()
                            .is_some_and(|node| picker.contains(Some(node))),
                        _ => false,
                    }
                };
                if !inside {
                    dispatch.dispatch(PickerEvent::OutsideClick);
                }
            })
        };

        let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                dispatch.dispatch(PickerEvent::Escape);
            }
        });

        Ok(Self {
            document,
            root,
            picker,
            on_entry_click,
            on_document_click,
            on_keydown,
            listening: false,
        })
    }

    /// The wrapped `web_sys::Document`.
    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for WebDocument {
    type Element = Element;

    fn set_root_property(&mut self, name: &str, value: &str) -> Result<(), DomError> {
        self.root.style().set_property(name, value).map_err(js_error)
    }

    fn remove_root_property(&mut self, name: &str) -> Result<(), DomError> {
        self.root
            .style()
            .remove_property(name)
            .map(|_| ())
            .map_err(js_error)
    }

    fn mount_picker(&mut self, parent: &Element, markup: &str) -> Result<(), DomError> {
        if self.picker.borrow().is_some() {
            return Err(DomError::AlreadyMounted);
        }
        if !parent.is_connected() {
            return Err(DomError::MissingParent(parent.tag_name().to_lowercase()));
        }

        parent
            .insert_adjacent_html("beforeend", markup)
            .map_err(js_error)?;
        let picker = parent
            .last_element_child()
            .ok_or_else(|| DomError::Js("picker markup produced no element".into()))?;
        picker
            .add_event_listener_with_callback("click", self.on_entry_click.as_ref().unchecked_ref())
            .map_err(js_error)?;

        *self.picker.borrow_mut() = Some(picker);
        Ok(())
    }

    fn unmount_picker(&mut self) -> Result<(), DomError> {
        let mounted = self.picker.borrow_mut().take();
        if let Some(picker) = mounted {
            picker.remove();
        }
        Ok(())
    }

    fn attach_dismiss_listener(&mut self) -> Result<(), DomError> {
        if self.listening {
            return Ok(());
        }
        self.document
            .add_event_listener_with_callback(
                "click",
                self.on_document_click.as_ref().unchecked_ref(),
            )
            .map_err(js_error)?;
        self.document
            .add_event_listener_with_callback("keydown", self.on_keydown.as_ref().unchecked_ref())
            .map_err(js_error)?;
        self.listening = true;
        Ok(())
    }

    fn detach_dismiss_listener(&mut self) -> Result<(), DomError> {
        if !self.listening {
            return Ok(());
        }
        self.document
            .remove_event_listener_with_callback(
                "click",
                self.on_document_click.as_ref().unchecked_ref(),
            )
            .map_err(js_error)?;
        self.document
            .remove_event_listener_with_callback(
                "keydown",
                self.on_keydown.as_ref().unchecked_ref(),
            )
            .map_err(js_error)?;
        self.listening = false;
        Ok(())
    }
}

impl Drop for WebDocument {
    fn drop(&mut self) {
        let _ = self.detach_dismiss_listener();
        let _ = self.unmount_picker();
    }
}

impl std::fmt::Debug for WebDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDocument")
            .field("picker_mounted", &self.picker.borrow().is_some())
            .field("listening", &self.listening)
            .finish()
    }
}
