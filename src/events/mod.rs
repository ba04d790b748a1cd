//! Event handling for full-screen hosts
//!
//! Provides the event names the component listens to, a listener registry
//! that runs target listeners before document listeners, and output emitters.

mod emitter;

pub use emitter::{EventEmitter, SubscriptionId};

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::utils::ConfigError;

/// Event types understood by hosts and triggers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    // Activation events
    Click,
    KeyDown,

    // Full-screen notifications, fired on the document without payload
    FullscreenChange,
    WebkitFullscreenChange,
    FullscreenError,
    WebkitFullscreenError,

    // Custom event
    Custom(String),
}

impl EventType {
    /// DOM event name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::FullscreenChange => "fullscreenchange",
            Self::WebkitFullscreenChange => "webkitfullscreenchange",
            Self::FullscreenError => "fullscreenerror",
            Self::WebkitFullscreenError => "webkitfullscreenerror",
            Self::Custom(name) => name,
        }
    }

    /// Map a DOM event name back to its type; unknown names become `Custom`
    pub fn from_name(name: &str) -> Self {
        match name {
            "click" => Self::Click,
            "keydown" => Self::KeyDown,
            "fullscreenchange" => Self::FullscreenChange,
            "webkitfullscreenchange" => Self::WebkitFullscreenChange,
            "fullscreenerror" => Self::FullscreenError,
            "webkitfullscreenerror" => Self::WebkitFullscreenError,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Parse the name of a full-screen change notification
    pub fn parse_change_event(name: &str) -> Result<Self, ConfigError> {
        match Self::from_name(name) {
            ty @ (Self::FullscreenChange | Self::WebkitFullscreenChange) => Ok(ty),
            _ => Err(ConfigError::UnknownEvent(name.to_string())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dispatched event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target_id: Option<u64>,
}

impl Event {
    /// Create a new document-level event
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            target_id: None,
        }
    }

    /// Create an event aimed at a specific target
    pub fn targeted(event_type: EventType, target_id: u64) -> Self {
        Self {
            event_type,
            target_id: Some(target_id),
        }
    }

    /// Create a click event on a target
    pub fn click(target_id: u64) -> Self {
        Self::targeted(EventType::Click, target_id)
    }
}

/// Identifies a registered listener so it can be removed again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Event handler callback type
pub type EventHandler = Rc<dyn Fn(&Event)>;

/// Event listener registration
struct EventListener {
    id: ListenerId,
    handler: EventHandler,
}

/// Event dispatcher for managing event listeners
#[derive(Default)]
pub struct EventDispatcher {
    next_id: u64,
    listeners: HashMap<EventType, Vec<EventListener>>,
    target_listeners: HashMap<u64, HashMap<EventType, Vec<EventListener>>>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    /// Add a global event listener
    pub fn add_listener(&mut self, event_type: EventType, handler: EventHandler) -> ListenerId {
        let id = self.allocate_id();
        let listener = EventListener { id, handler };
        self.listeners.entry(event_type).or_default().push(listener);
        id
    }

    /// Add an event listener for a specific target
    pub fn add_target_listener(
        &mut self,
        target_id: u64,
        event_type: EventType,
        handler: EventHandler,
    ) -> ListenerId {
        let id = self.allocate_id();
        let listener = EventListener { id, handler };
        self.target_listeners
            .entry(target_id)
            .or_default()
            .entry(event_type)
            .or_default()
            .push(listener);
        id
    }

    /// Remove a single listener, wherever it was registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let global = self.listeners.values_mut();
        let targeted = self.target_listeners.values_mut().flat_map(|m| m.values_mut());
        for list in global.chain(targeted) {
            if let Some(pos) = list.iter().position(|l| l.id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Collect the handlers an event reaches, in dispatch order.
    ///
    /// Callers that hold the dispatcher behind a `RefCell` use this to release
    /// the borrow before running handlers, since handlers may re-enter.
    pub fn handlers_for(&self, event: &Event) -> Vec<EventHandler> {
        let mut handlers = Vec::new();

        // Target phase
        if let Some(listeners) = event
            .target_id
            .and_then(|id| self.target_listeners.get(&id))
            .and_then(|by_type| by_type.get(&event.event_type))
        {
            handlers.extend(listeners.iter().map(|l| l.handler.clone()));
        }

        // Document phase
        if let Some(listeners) = self.listeners.get(&event.event_type) {
            handlers.extend(listeners.iter().map(|l| l.handler.clone()));
        }

        handlers
    }

    /// Dispatch an event, returning how many handlers ran
    pub fn dispatch(&self, event: &Event) -> usize {
        let handlers = self.handlers_for(event);
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Get global listener count for an event type
    pub fn listener_count(&self, event_type: &EventType) -> usize {
        self.listeners.get(event_type).map(|l| l.len()).unwrap_or(0)
    }

    /// Get listener count for a target and event type
    pub fn target_listener_count(&self, target_id: u64, event_type: &EventType) -> usize {
        self.target_listeners
            .get(&target_id)
            .and_then(|by_type| by_type.get(event_type))
            .map(|l| l.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> EventHandler {
        let log = Rc::clone(log);
        Rc::new(move |_| log.borrow_mut().push(tag))
    }

    #[test]
    fn test_event_names_round_trip() {
        for ty in [
            EventType::Click,
            EventType::FullscreenChange,
            EventType::WebkitFullscreenChange,
            EventType::FullscreenError,
            EventType::WebkitFullscreenError,
        ] {
            assert_eq!(EventType::from_name(ty.as_str()), ty);
        }
        assert_eq!(
            EventType::from_name("resize"),
            EventType::Custom("resize".to_string())
        );
    }

    #[test]
    fn test_parse_change_event() {
        assert_eq!(
            EventType::parse_change_event("webkitfullscreenchange").unwrap(),
            EventType::WebkitFullscreenChange
        );
        assert!(matches!(
            EventType::parse_change_event("click"),
            Err(ConfigError::UnknownEvent(name)) if name == "click"
        ));
    }

    #[test]
    fn test_event_dispatcher() {
        let mut dispatcher = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        dispatcher.add_listener(EventType::FullscreenChange, recorder(&log, "change"));

        let ran = dispatcher.dispatch(&Event::new(EventType::FullscreenChange));
        assert_eq!(ran, 1);
        assert_eq!(*log.borrow(), vec!["change"]);

        dispatcher.dispatch(&Event::new(EventType::WebkitFullscreenChange));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_dispatch_phase_order() {
        let mut dispatcher = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        dispatcher.add_listener(EventType::Click, recorder(&log, "document"));
        dispatcher.add_target_listener(7, EventType::Click, recorder(&log, "target"));

        dispatcher.dispatch(&Event::click(7));
        assert_eq!(*log.borrow(), vec!["target", "document"]);
    }

    #[test]
    fn test_remove_listener() {
        let mut dispatcher = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let global = dispatcher.add_listener(EventType::Click, recorder(&log, "global"));
        let target = dispatcher.add_target_listener(3, EventType::Click, recorder(&log, "target"));

        assert!(dispatcher.remove_listener(global));
        assert!(!dispatcher.remove_listener(global));
        assert_eq!(dispatcher.listener_count(&EventType::Click), 0);

        assert!(dispatcher.remove_listener(target));
        assert_eq!(dispatcher.target_listener_count(3, &EventType::Click), 0);
        assert_eq!(dispatcher.dispatch(&Event::click(3)), 0);
    }

    #[test]
    fn test_target_listeners() {
        let mut dispatcher = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        dispatcher.add_target_listener(1, EventType::Click, recorder(&log, "one"));

        dispatcher.dispatch(&Event::click(2));
        assert!(log.borrow().is_empty());

        dispatcher.dispatch(&Event::click(1));
        assert_eq!(*log.borrow(), vec!["one"]);
        assert_eq!(dispatcher.target_listener_count(1, &EventType::Click), 1);
    }
}
