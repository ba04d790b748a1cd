//! Host binding: observes full-screen notifications for one element
//!
//! A [`FullscreenHost`] wraps a [`FullscreenController`] with the lifecycle a
//! UI framework gives a behavior: `init` subscribes to the document's change
//! and error notifications and hands out [`FullscreenHandles`]; `teardown`
//! (also run on drop) detaches every listener.
//!
//! Notifications that fire while detached are lost, so `init` reconciles the
//! session with the live occupant before handing out the handles.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{trace, warn};

use super::config::{FullscreenConfig, StyleOverride};
use super::controller::FullscreenController;
use crate::events::{Event, EventEmitter, EventHandler, EventType, ListenerId, SubscriptionId};
use crate::platform::{EventTarget, FullscreenDocument};

/// Callables that drive a host without any DOM event.
///
/// They hold weak references: once the host is dropped they do nothing and
/// return false.
#[derive(Clone)]
pub struct FullscreenHandles {
    open: Rc<dyn Fn() -> bool>,
    close: Rc<dyn Fn() -> bool>,
}

impl FullscreenHandles {
    /// Request full-screen; see [`FullscreenController::open`]
    pub fn open(&self) -> bool {
        (self.open)()
    }

    /// Request exit; see [`FullscreenController::close`]
    pub fn close(&self) -> bool {
        (self.close)()
    }
}

impl fmt::Debug for FullscreenHandles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullscreenHandles").finish_non_exhaustive()
    }
}

struct HostInner<D: FullscreenDocument> {
    controller: FullscreenController<D>,
    toggled: EventEmitter<bool>,
    handles: EventEmitter<FullscreenHandles>,
}

impl<D: FullscreenDocument> HostInner<D> {
    fn on_change(&self) {
        if let Some(fullscreen) = self.controller.handle_change() {
            self.toggled.emit(&fullscreen);
        }
    }

    fn on_error(&self) {
        self.controller.handle_error();
    }
}

/// Full-screen behavior attached to one element
pub struct FullscreenHost<D: FullscreenDocument + 'static> {
    inner: Rc<HostInner<D>>,
    change_events: Vec<EventType>,
    error_events: Vec<EventType>,
    listeners: RefCell<Vec<ListenerId>>,
    initialized: Cell<bool>,
}

impl<D: FullscreenDocument + 'static> FullscreenHost<D> {
    /// Create a host; nothing is observed until [`FullscreenHost::init`]
    pub fn new(document: D, element: D::Element, mut config: FullscreenConfig) -> Self {
        if config.change_events.is_empty() {
            warn!("no full-screen change events configured, observing the defaults");
            config.change_events = FullscreenConfig::default().change_events;
        }
        let error_events = config.error_events();
        Self {
            inner: Rc::new(HostInner {
                controller: FullscreenController::new(document, element, config.style),
                toggled: EventEmitter::new(),
                handles: EventEmitter::new(),
            }),
            change_events: config.change_events,
            error_events,
            listeners: RefCell::new(Vec::new()),
            initialized: Cell::new(false),
        }
    }

    /// Emits `true` when the element enters full-screen and `false` when it leaves
    pub fn toggled(&self) -> &EventEmitter<bool> {
        &self.inner.toggled
    }

    /// Emits the open/close handles once per `init`
    pub fn handles_emitted(&self) -> &EventEmitter<FullscreenHandles> {
        &self.inner.handles
    }

    /// Subscribe to confirmed transitions
    pub fn on_toggle(&self, callback: impl Fn(bool) + 'static) -> SubscriptionId {
        self.inner.toggled.subscribe(move |fullscreen| callback(*fullscreen))
    }

    /// Subscribe to the handles emitted at `init`
    pub fn on_handles(&self, callback: impl Fn(&FullscreenHandles) + 'static) -> SubscriptionId {
        self.inner.handles.subscribe(callback)
    }

    /// Start observing the document and emit the handles.
    ///
    /// A transition missed while detached is handled here as if its
    /// notification had just fired. Calling it again while initialized does
    /// nothing.
    pub fn init(&self) {
        if self.is_initialized() {
            return;
        }

        let document = self.inner.controller.document();
        let mut listeners = Vec::with_capacity(self.change_events.len() + self.error_events.len());
        for event_type in &self.change_events {
            let id = document
                .add_event_listener(event_type.clone(), self.listener(HostInner::on_change));
            trace!("observing {} as {:?}", event_type, id);
            listeners.push(id);
        }
        for event_type in &self.error_events {
            let id = document
                .add_event_listener(event_type.clone(), self.listener(HostInner::on_error));
            trace!("observing {} as {:?}", event_type, id);
            listeners.push(id);
        }
        *self.listeners.borrow_mut() = listeners;
        self.initialized.set(true);

        self.inner.on_change();
        self.inner.handles.emit(&self.handles());
    }

    /// Stop observing the document.
    ///
    /// Styles are left as they are. A request still waiting for confirmation
    /// is forgotten, since nothing is left to confirm it.
    pub fn teardown(&self) {
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        let document = self.inner.controller.document();
        for id in listeners {
            document.remove_event_listener(id);
        }
        self.inner.controller.discard_request();
        self.initialized.set(false);
    }

    /// Whether `init` ran and `teardown` has not
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Handles bound to this host
    pub fn handles(&self) -> FullscreenHandles {
        let open = Rc::downgrade(&self.inner);
        let close = Rc::downgrade(&self.inner);
        FullscreenHandles {
            open: Rc::new(move || open.upgrade().is_some_and(|inner| inner.controller.open())),
            close: Rc::new(move || close.upgrade().is_some_and(|inner| inner.controller.close())),
        }
    }

    pub fn controller(&self) -> &FullscreenController<D> {
        &self.inner.controller
    }

    pub fn open(&self) -> bool {
        self.inner.controller.open()
    }

    pub fn close(&self) -> bool {
        self.inner.controller.close()
    }

    pub fn toggle(&self) -> bool {
        self.inner.controller.toggle()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.inner.controller.is_fullscreen()
    }

    /// Replace the override used from the next session on
    pub fn set_style(&self, style: StyleOverride) {
        self.inner.controller.set_style(style);
    }

    fn listener(&self, react: fn(&HostInner<D>)) -> EventHandler {
        let inner: Weak<HostInner<D>> = Rc::downgrade(&self.inner);
        Rc::new(move |_: &Event| {
            if let Some(inner) = inner.upgrade() {
                react(&inner);
            }
        })
    }
}

impl<D: FullscreenDocument + 'static> Drop for FullscreenHost<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}
