//! In-memory document with a simulated full-screen API
//!
//! Requests and exits are queued and only take effect when [`Document::settle`]
//! runs, the way a browser confirms them on a later task. Every applied
//! transition fires the change notification of each exposed API form.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use log::trace;

use super::{ElementData, ElementId};
use crate::events::{Event, EventDispatcher, EventHandler, EventType, ListenerId};
use crate::platform::{EventTarget, FullscreenDocument, FullscreenElement, Prefix};
use crate::utils::{FullscreenError, Result};

/// Which API forms the simulated platform exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSupport {
    pub standard: bool,
    pub webkit: bool,
}

impl ApiSupport {
    /// Unprefixed API only
    pub fn standard() -> Self {
        Self { standard: true, webkit: false }
    }

    /// Prefixed API only, like older Safari
    pub fn webkit_only() -> Self {
        Self { standard: false, webkit: true }
    }

    /// Both forms, each firing its own notifications
    pub fn both() -> Self {
        Self { standard: true, webkit: true }
    }

    /// No full-screen support at all
    pub fn none() -> Self {
        Self { standard: false, webkit: false }
    }

    /// Whether a form is exposed
    pub fn exposes(self, prefix: Prefix) -> bool {
        match prefix {
            Prefix::Standard => self.standard,
            Prefix::Webkit => self.webkit,
        }
    }

    fn exposed(self) -> impl Iterator<Item = Prefix> {
        Prefix::FALLBACK_ORDER
            .into_iter()
            .filter(move |prefix| self.exposes(*prefix))
    }
}

impl Default for ApiSupport {
    fn default() -> Self {
        Self::standard()
    }
}

/// How the simulated platform answers full-screen requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPolicy {
    /// Queue the transition
    #[default]
    Grant,
    /// Accept the call, then fire the error notification on settle
    Deny,
    /// Fail the call synchronously
    Reject,
}

/// Platform calls made against the document, for assertions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallLog {
    pub requests: Vec<(ElementId, Prefix)>,
    pub exits: Vec<Prefix>,
}

#[derive(Debug, Clone, Copy)]
enum Transition {
    Enter(ElementId),
    Exit,
    Deny,
}

struct DocumentState {
    next_id: ElementId,
    elements: HashMap<ElementId, ElementData>,
    fullscreen: Option<ElementId>,
    support: ApiSupport,
    policy: RequestPolicy,
    pending: VecDeque<Transition>,
    dispatcher: EventDispatcher,
    calls: CallLog,
}

impl DocumentState {
    /// Apply one transition and return the notifications it fires
    fn apply(&mut self, transition: Transition) -> Vec<EventType> {
        let changed = match transition {
            Transition::Enter(id) => {
                if self.fullscreen == Some(id) || !self.elements.contains_key(&id) {
                    false
                } else {
                    self.fullscreen = Some(id);
                    true
                }
            }
            Transition::Exit => self.fullscreen.take().is_some(),
            Transition::Deny => {
                return self.support.exposed().map(Prefix::error_event).collect();
            }
        };
        if changed {
            self.support.exposed().map(Prefix::change_event).collect()
        } else {
            Vec::new()
        }
    }
}

/// Simulated document
#[derive(Clone)]
pub struct Document {
    state: Rc<RefCell<DocumentState>>,
}

impl Document {
    /// Create an empty document exposing the given API forms
    pub fn new(support: ApiSupport) -> Self {
        Self {
            state: Rc::new(RefCell::new(DocumentState {
                next_id: 0,
                elements: HashMap::new(),
                fullscreen: None,
                support,
                policy: RequestPolicy::default(),
                pending: VecDeque::new(),
                dispatcher: EventDispatcher::new(),
                calls: CallLog::default(),
            })),
        }
    }

    /// Create an element owned by this document
    pub fn create_element(&self, tag_name: &str) -> Element {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.elements.insert(id, ElementData::new(tag_name));
        Element {
            id,
            state: Rc::clone(&self.state),
        }
    }

    /// Look up an element by id
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.state.borrow().elements.contains_key(&id).then(|| Element {
            id,
            state: Rc::clone(&self.state),
        })
    }

    /// Exposed API forms
    pub fn support(&self) -> ApiSupport {
        self.state.borrow().support
    }

    /// Change how future requests are answered
    pub fn set_request_policy(&self, policy: RequestPolicy) {
        self.state.borrow_mut().policy = policy;
    }

    /// Id of the current occupant, regardless of exposed forms
    pub fn fullscreen_element_id(&self) -> Option<ElementId> {
        self.state.borrow().fullscreen
    }

    /// Platform calls made so far
    pub fn calls(&self) -> CallLog {
        self.state.borrow().calls.clone()
    }

    /// Number of queued transitions
    pub fn pending_transitions(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Apply queued transitions in order, firing their notifications.
    ///
    /// Returns how many transitions were processed. Transitions queued by
    /// handlers are processed in the same call.
    pub fn settle(&self) -> usize {
        let mut processed = 0;
        loop {
            let next = self.state.borrow_mut().pending.pop_front();
            let Some(transition) = next else { break };
            trace!("settling {:?}", transition);
            let events = self.state.borrow_mut().apply(transition);
            for event_type in events {
                self.fire(&Event::new(event_type));
            }
            processed += 1;
        }
        processed
    }

    /// The user leaves full-screen without any script involvement
    pub fn press_escape(&self) -> bool {
        let events = self.state.borrow_mut().apply(Transition::Exit);
        let exited = !events.is_empty();
        for event_type in events {
            self.fire(&Event::new(event_type));
        }
        exited
    }

    /// Dispatch a click on an element
    pub fn click(&self, element: &Element) -> usize {
        self.fire(&Event::click(element.id))
    }

    /// Dispatch an event, returning how many handlers ran
    pub fn fire(&self, event: &Event) -> usize {
        let handlers = self.state.borrow().dispatcher.handlers_for(event);
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Number of document-level listeners for an event type
    pub fn listener_count(&self, event_type: &EventType) -> usize {
        self.state.borrow().dispatcher.listener_count(event_type)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(ApiSupport::default())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Document")
            .field("elements", &state.elements.len())
            .field("fullscreen", &state.fullscreen)
            .field("support", &state.support)
            .finish()
    }
}

impl EventTarget for Document {
    fn add_event_listener(&self, event_type: EventType, handler: EventHandler) -> ListenerId {
        self.state.borrow_mut().dispatcher.add_listener(event_type, handler)
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.state.borrow_mut().dispatcher.remove_listener(id)
    }
}

impl FullscreenDocument for Document {
    type Element = Element;

    fn fullscreen_element(&self, prefix: Prefix) -> Option<Option<Element>> {
        let state = self.state.borrow();
        if !state.support.exposes(prefix) {
            return None;
        }
        Some(state.fullscreen.map(|id| Element {
            id,
            state: Rc::clone(&self.state),
        }))
    }

    fn exit_fullscreen(&self, prefix: Prefix) -> Option<Result<()>> {
        let mut state = self.state.borrow_mut();
        if !state.support.exposes(prefix) {
            return None;
        }
        state.calls.exits.push(prefix);
        if state.fullscreen.is_none() {
            return Some(Err(FullscreenError::rejected(
                "exitFullscreen",
                "document is not in full-screen mode",
            )));
        }
        state.pending.push_back(Transition::Exit);
        Some(Ok(()))
    }
}

/// Handle to an element of a simulated document
#[derive(Clone)]
pub struct Element {
    id: ElementId,
    state: Rc<RefCell<DocumentState>>,
}

impl Element {
    /// Element id
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Tag name
    pub fn tag_name(&self) -> String {
        self.with_data(|data| data.tag_name.clone()).unwrap_or_default()
    }

    /// Serialized inline style
    pub fn css_text(&self) -> String {
        self.with_data(|data| data.style.to_string()).unwrap_or_default()
    }

    fn with_data<T>(&self, f: impl FnOnce(&ElementData) -> T) -> Option<T> {
        self.state.borrow().elements.get(&self.id).map(f)
    }

    fn with_data_mut<T>(&self, f: impl FnOnce(&mut ElementData) -> T) -> Option<T> {
        self.state.borrow_mut().elements.get_mut(&self.id).map(f)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("tag_name", &self.tag_name())
            .finish()
    }
}

impl EventTarget for Element {
    fn add_event_listener(&self, event_type: EventType, handler: EventHandler) -> ListenerId {
        self.state
            .borrow_mut()
            .dispatcher
            .add_target_listener(self.id, event_type, handler)
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.state.borrow_mut().dispatcher.remove_listener(id)
    }
}

impl FullscreenElement for Element {
    fn is_same_node(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.state, &other.state)
    }

    fn request_fullscreen(&self, prefix: Prefix) -> Option<Result<()>> {
        let mut state = self.state.borrow_mut();
        if !state.support.exposes(prefix) {
            return None;
        }
        state.calls.requests.push((self.id, prefix));
        match state.policy {
            RequestPolicy::Grant => state.pending.push_back(Transition::Enter(self.id)),
            RequestPolicy::Deny => state.pending.push_back(Transition::Deny),
            RequestPolicy::Reject => {
                return Some(Err(FullscreenError::rejected(
                    "requestFullscreen",
                    "permission denied",
                )));
            }
        }
        Some(Ok(()))
    }

    fn style_property(&self, name: &str) -> String {
        self.with_data(|data| data.style.get_property_value(name).to_string())
            .unwrap_or_default()
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.with_data_mut(|data| data.style.set_property(name, value));
    }
}
