//! Full-screen entry and exit for a single host element
//!
//! Whether the element is full-screen is always read from the platform. The
//! controller only keeps the session record that owns the style snapshot:
//! requesting captures it, the confirming change notification applies the
//! override, and the notification that reports the element gone restores it.

use std::cell::RefCell;
use std::mem;

use log::{debug, warn};

use super::config::StyleOverride;
use super::snapshot::{self, StyleSnapshot};
use crate::platform::{self, FullscreenDocument};

/// Style state of one full-screen session
#[derive(Debug, Clone)]
struct SessionStyle {
    applied: StyleOverride,
    snapshot: StyleSnapshot,
}

#[derive(Debug, Default)]
enum Session {
    #[default]
    Idle,
    /// Request sent, waiting for the platform to confirm
    Requested(SessionStyle),
    /// Override applied, element is the occupant
    Active(SessionStyle),
}

/// Drives full-screen requests for one element and owns its style snapshot
pub struct FullscreenController<D: FullscreenDocument> {
    document: D,
    element: D::Element,
    style: RefCell<StyleOverride>,
    session: RefCell<Session>,
}

impl<D: FullscreenDocument> FullscreenController<D> {
    /// Create a controller for `element`
    pub fn new(document: D, element: D::Element, style: StyleOverride) -> Self {
        Self {
            document,
            element,
            style: RefCell::new(style),
            session: RefCell::new(Session::Idle),
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn element(&self) -> &D::Element {
        &self.element
    }

    /// Override used by the next session
    pub fn style(&self) -> StyleOverride {
        self.style.borrow().clone()
    }

    /// Replace the override; a session already underway keeps its own
    pub fn set_style(&self, style: StyleOverride) {
        *self.style.borrow_mut() = style;
    }

    /// Whether the element is the live full-screen occupant
    pub fn is_fullscreen(&self) -> bool {
        platform::is_occupant(&self.document, &self.element)
    }

    /// Whether a request was sent and not yet confirmed or refused
    pub fn is_pending(&self) -> bool {
        matches!(*self.session.borrow(), Session::Requested(_))
    }

    /// Snapshot held by the current session, if any
    pub fn snapshot(&self) -> Option<StyleSnapshot> {
        match &*self.session.borrow() {
            Session::Idle => None,
            Session::Requested(s) | Session::Active(s) => Some(s.snapshot.clone()),
        }
    }

    /// Ask the platform to make the element full-screen.
    ///
    /// Returns whether a request was sent. Does nothing while the element is
    /// full-screen or a request is in flight, and when the platform has no
    /// request capability.
    pub fn open(&self) -> bool {
        if self.is_fullscreen() {
            debug!("open ignored: element is already full-screen");
            return false;
        }
        if !matches!(*self.session.borrow(), Session::Idle) {
            debug!("open ignored: request already in flight");
            return false;
        }

        // Recorded before the call so a synchronous confirmation finds it.
        let applied = self.style();
        let snapshot = snapshot::capture(&self.element, applied.keys());
        *self.session.borrow_mut() = Session::Requested(SessionStyle { applied, snapshot });

        match platform::request_fullscreen(&self.element) {
            Some(Ok(())) => true,
            Some(Err(err)) => {
                warn!("full-screen request failed: {}", err);
                self.discard_request();
                false
            }
            None => {
                debug!("open ignored: platform has no full-screen request capability");
                self.discard_request();
                false
            }
        }
    }

    /// Ask the platform to leave full-screen.
    ///
    /// Returns whether an exit was sent. Does nothing unless the element is
    /// the occupant. Styles are restored when the platform confirms.
    pub fn close(&self) -> bool {
        if !self.is_fullscreen() {
            debug!("close ignored: element is not full-screen");
            return false;
        }
        match platform::exit_fullscreen(&self.document) {
            Some(Ok(())) => true,
            Some(Err(err)) => {
                warn!("full-screen exit failed: {}", err);
                false
            }
            None => {
                debug!("close ignored: platform has no full-screen exit capability");
                false
            }
        }
    }

    /// `close` when full-screen, `open` otherwise
    pub fn toggle(&self) -> bool {
        if self.is_fullscreen() {
            self.close()
        } else {
            self.open()
        }
    }

    /// React to a full-screen change notification.
    ///
    /// The notification may concern any element, so the occupant is checked
    /// every time. Returns the confirmed transition, if this call made one.
    pub fn handle_change(&self) -> Option<bool> {
        let entered = self.is_fullscreen();
        let mut session = self.session.borrow_mut();
        let current = mem::take(&mut *session);

        match (entered, current) {
            (true, Session::Requested(style)) => {
                snapshot::apply(&self.element, &style.applied, style.applied.as_map());
                *session = Session::Active(style);
                debug!("entered full-screen");
                Some(true)
            }
            (true, Session::Idle) => {
                // Entered through a request this controller did not send.
                let applied = self.style();
                let snapshot = snapshot::capture(&self.element, applied.keys());
                snapshot::apply(&self.element, &applied, applied.as_map());
                *session = Session::Active(SessionStyle { applied, snapshot });
                debug!("entered full-screen from an external request");
                Some(true)
            }
            (false, Session::Active(style)) => {
                snapshot::restore(&self.element, &style.applied, &style.snapshot);
                debug!("left full-screen, restored {} properties", style.snapshot.len());
                Some(false)
            }
            (_, unchanged) => {
                *session = unchanged;
                None
            }
        }
    }

    /// React to a full-screen error notification by dropping an unconfirmed request
    pub fn handle_error(&self) {
        if self.is_pending() && !self.is_fullscreen() {
            debug!("full-screen request refused by the platform");
            self.discard_request();
        }
    }

    /// Drop a request that was sent but not confirmed
    pub(super) fn discard_request(&self) {
        let mut session = self.session.borrow_mut();
        if matches!(*session, Session::Requested(_)) {
            *session = Session::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ApiSupport, Document, Element, RequestPolicy};
    use crate::platform::FullscreenElement;

    fn setup(support: ApiSupport) -> (Document, Element, FullscreenController<Document>) {
        let document = Document::new(support);
        let element = document.create_element("div");
        element.set_style_property("width", "320px");
        element.set_style_property("color", "blue");
        let style = StyleOverride::new().with("width", "100%").with("height", "100%");
        let controller = FullscreenController::new(document.clone(), element.clone(), style);
        (document, element, controller)
    }

    #[test]
    fn test_open_defers_style_until_confirmed() {
        let (document, element, controller) = setup(ApiSupport::standard());

        assert!(controller.open());
        assert!(controller.is_pending());
        assert!(!controller.is_fullscreen());
        assert_eq!(element.style_property("width"), "320px");

        document.settle();
        assert_eq!(controller.handle_change(), Some(true));
        assert_eq!(element.style_property("width"), "100%");
        assert_eq!(element.style_property("height"), "100%");
    }

    #[test]
    fn test_open_twice_sends_one_request() {
        let (document, _element, controller) = setup(ApiSupport::standard());

        assert!(controller.open());
        assert!(!controller.open());
        document.settle();
        controller.handle_change();
        assert!(!controller.open());
        assert_eq!(document.calls().requests.len(), 1);
    }

    #[test]
    fn test_close_when_not_fullscreen() {
        let (document, element, controller) = setup(ApiSupport::standard());

        assert!(!controller.close());
        assert!(document.calls().exits.is_empty());
        assert_eq!(element.css_text(), "color: blue; width: 320px;");
    }

    #[test]
    fn test_round_trip_restores_overridden_keys() {
        let (document, element, controller) = setup(ApiSupport::standard());

        controller.open();
        document.settle();
        controller.handle_change();
        assert!(controller.close());
        document.settle();
        assert_eq!(controller.handle_change(), Some(false));

        assert_eq!(element.css_text(), "color: blue; width: 320px;");
        assert!(controller.snapshot().is_none());
    }

    #[test]
    fn test_absent_capability_is_noop() {
        let (document, element, controller) = setup(ApiSupport::none());

        assert!(!controller.open());
        assert!(!controller.is_pending());
        assert!(!controller.close());
        assert_eq!(controller.handle_change(), None);
        assert_eq!(document.pending_transitions(), 0);
        assert_eq!(element.style_property("width"), "320px");
    }

    #[test]
    fn test_rejected_request_frees_session() {
        let (document, _element, controller) = setup(ApiSupport::standard());
        document.set_request_policy(RequestPolicy::Reject);

        assert!(!controller.open());
        assert!(!controller.is_pending());

        document.set_request_policy(RequestPolicy::Grant);
        assert!(controller.open());
    }

    #[test]
    fn test_error_notification_frees_session() {
        let (document, _element, controller) = setup(ApiSupport::standard());
        document.set_request_policy(RequestPolicy::Deny);

        assert!(controller.open());
        document.settle();
        controller.handle_error();
        assert!(!controller.is_pending());
        assert!(controller.snapshot().is_none());
    }

    #[test]
    fn test_external_entry_is_tracked() {
        let (document, element, controller) = setup(ApiSupport::standard());

        platform::request_fullscreen(&element);
        document.settle();
        assert_eq!(controller.handle_change(), Some(true));
        let snapshot = controller.snapshot().unwrap();
        assert_eq!(snapshot.get("width"), Some("320px"));

        document.press_escape();
        assert_eq!(controller.handle_change(), Some(false));
        assert_eq!(element.style_property("width"), "320px");
    }

    #[test]
    fn test_repeated_notifications_are_ignored() {
        let (document, _element, controller) = setup(ApiSupport::both());

        controller.open();
        document.settle();
        assert_eq!(controller.handle_change(), Some(true));
        assert_eq!(controller.handle_change(), None);
    }

    #[test]
    fn test_toggle() {
        let (document, _element, controller) = setup(ApiSupport::standard());

        assert!(controller.toggle());
        document.settle();
        controller.handle_change();
        assert!(controller.toggle());
        document.settle();
        controller.handle_change();
        assert!(!controller.is_fullscreen());
        assert_eq!(document.calls().exits.len(), 1);
    }

    #[test]
    fn test_set_style_applies_to_next_session() {
        let (document, element, controller) = setup(ApiSupport::standard());

        controller.open();
        document.settle();
        controller.handle_change();
        controller.set_style(StyleOverride::new().with("color", "white"));

        controller.close();
        document.settle();
        controller.handle_change();
        assert_eq!(element.css_text(), "color: blue; width: 320px;");

        controller.open();
        document.settle();
        controller.handle_change();
        assert_eq!(element.css_text(), "color: white; width: 320px;");
    }
}
