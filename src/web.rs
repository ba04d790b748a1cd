//! Browser implementation of the platform traits over `web-sys`
//!
//! Prefixed members are not part of the `web-sys` bindings, so every
//! full-screen member is looked up by name with `Reflect` and called only when
//! present. Listeners are kept alive in a registry shared by clones of the
//! same handle; remove a listener through a clone of the handle that added it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::events::{Event, EventHandler, EventType, ListenerId};
use crate::fullscreen::split_priority;
use crate::platform::{EventTarget, FullscreenDocument, FullscreenElement, Prefix};
use crate::utils::{FullscreenError, Result};

struct Registration {
    event: String,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

#[derive(Clone, Default)]
struct ListenerRegistry {
    next_id: Rc<Cell<u64>>,
    registrations: Rc<RefCell<HashMap<ListenerId, Registration>>>,
}

impl ListenerRegistry {
    fn add(
        &self,
        target: &web_sys::EventTarget,
        event_type: EventType,
        handler: EventHandler,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.get() + 1);
        self.next_id.set(id.0);

        let event = event_type.as_str().to_string();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            handler(&Event::new(event_type.clone()));
        });
        if let Err(err) =
            target.add_event_listener_with_callback(&event, callback.as_ref().unchecked_ref())
        {
            warn!("failed to add {} listener: {:?}", event, err);
        }

        self.registrations
            .borrow_mut()
            .insert(id, Registration { event, callback });
        id
    }

    fn remove(&self, target: &web_sys::EventTarget, id: ListenerId) -> bool {
        let Some(registration) = self.registrations.borrow_mut().remove(&id) else {
            return false;
        };
        if let Err(err) = target.remove_event_listener_with_callback(
            &registration.event,
            registration.callback.as_ref().unchecked_ref(),
        ) {
            warn!("failed to remove {} listener: {:?}", registration.event, err);
        }
        true
    }
}

/// Look up a callable member, `None` when absent
fn member(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn rejection(operation: &'static str, err: JsValue) -> FullscreenError {
    FullscreenError::rejected(operation, format!("{:?}", err))
}

thread_local! {
    static ON_REJECTED: Closure<dyn FnMut(JsValue)> =
        Closure::new(|err: JsValue| debug!("full-screen promise rejected: {:?}", err));
}

/// Handle the rejection of a promise returned by a full-screen call.
///
/// The outcome already reaches the host as a change or error notification.
fn settle_promise(returned: JsValue) {
    if let Ok(promise) = returned.dyn_into::<Promise>() {
        ON_REJECTED.with(|on_rejected| {
            let _ = promise.catch(on_rejected);
        });
    }
}

/// A browser document
#[derive(Clone)]
pub struct WebDocument {
    document: web_sys::Document,
    listeners: ListenerRegistry,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            listeners: ListenerRegistry::default(),
        }
    }

    /// Document of the current window
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    /// Find an element by id
    pub fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement::new)
    }

    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }
}

impl EventTarget for WebDocument {
    fn add_event_listener(&self, event_type: EventType, handler: EventHandler) -> ListenerId {
        self.listeners.add(self.document.as_ref(), event_type, handler)
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(self.document.as_ref(), id)
    }
}

impl FullscreenDocument for WebDocument {
    type Element = WebElement;

    fn fullscreen_element(&self, prefix: Prefix) -> Option<Option<WebElement>> {
        let name = JsValue::from_str(match prefix {
            Prefix::Standard => "fullscreenElement",
            Prefix::Webkit => "webkitFullscreenElement",
        });
        let document: &JsValue = self.document.as_ref();
        if !Reflect::has(document, &name).unwrap_or(false) {
            return None;
        }
        let occupant = Reflect::get(document, &name).ok()?;
        Some(
            occupant
                .dyn_into::<web_sys::Element>()
                .ok()
                .map(WebElement::new),
        )
    }

    fn exit_fullscreen(&self, prefix: Prefix) -> Option<Result<()>> {
        let name = match prefix {
            Prefix::Standard => "exitFullscreen",
            Prefix::Webkit => "webkitExitFullscreen",
        };
        let document: &JsValue = self.document.as_ref();
        let exit = member(document, name)?;
        Some(
            exit.call0(document)
                .map(settle_promise)
                .map_err(|err| rejection("exitFullscreen", err)),
        )
    }
}

/// A browser element
#[derive(Clone)]
pub struct WebElement {
    element: web_sys::Element,
    listeners: ListenerRegistry,
}

impl WebElement {
    pub fn new(element: web_sys::Element) -> Self {
        Self {
            element,
            listeners: ListenerRegistry::default(),
        }
    }

    pub fn inner(&self) -> &web_sys::Element {
        &self.element
    }

    fn style(&self) -> Option<web_sys::CssStyleDeclaration> {
        self.element
            .dyn_ref::<web_sys::HtmlElement>()
            .map(|element| element.style())
    }
}

impl EventTarget for WebElement {
    fn add_event_listener(&self, event_type: EventType, handler: EventHandler) -> ListenerId {
        self.listeners.add(self.element.as_ref(), event_type, handler)
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(self.element.as_ref(), id)
    }
}

impl FullscreenElement for WebElement {
    fn is_same_node(&self, other: &Self) -> bool {
        let node: &web_sys::Node = self.element.as_ref();
        node.is_same_node(Some(other.element.as_ref()))
    }

    fn request_fullscreen(&self, prefix: Prefix) -> Option<Result<()>> {
        let name = match prefix {
            Prefix::Standard => "requestFullscreen",
            Prefix::Webkit => "webkitRequestFullscreen",
        };
        let element: &JsValue = self.element.as_ref();
        let request = member(element, name)?;
        Some(
            request
                .call0(element)
                .map(settle_promise)
                .map_err(|err| rejection("requestFullscreen", err)),
        )
    }

    fn style_property(&self, name: &str) -> String {
        let Some(style) = self.style() else {
            return String::new();
        };
        let value = style.get_property_value(name).unwrap_or_default();
        match style.get_property_priority(name).as_str() {
            "" => value,
            priority => format!("{} !{}", value, priority),
        }
    }

    fn set_style_property(&self, name: &str, value: &str) {
        let Some(style) = self.style() else { return };
        let result = match split_priority(value) {
            ("", _) => style.remove_property(name).map(|_| ()),
            (value, Some(priority)) => style.set_property_with_priority(name, value, priority),
            (value, None) => style.set_property(name, value),
        };
        if let Err(err) = result {
            warn!("failed to set style {}: {:?}", name, err);
        }
    }
}
