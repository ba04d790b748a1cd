//! Platform capabilities consumed by full-screen hosts
//!
//! Browsers expose full-screen support under an unprefixed standard name and,
//! in older engines, a `webkit`-prefixed name. Each capability method takes the
//! [`Prefix`] to use and returns `None` when that form is not exposed at all,
//! so callers can fall back or degrade to a no-op without raising errors.

use crate::events::{EventHandler, EventType, ListenerId};
use crate::utils::Result;

/// API naming form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `requestFullscreen`, `exitFullscreen`, `fullscreenElement`
    Standard,
    /// `webkitRequestFullscreen`, `webkitExitFullscreen`, `webkitFullscreenElement`
    Webkit,
}

impl Prefix {
    /// Lookup order: unprefixed first
    pub const FALLBACK_ORDER: [Prefix; 2] = [Prefix::Standard, Prefix::Webkit];

    /// Change notification fired under this form
    pub fn change_event(self) -> EventType {
        match self {
            Self::Standard => EventType::FullscreenChange,
            Self::Webkit => EventType::WebkitFullscreenChange,
        }
    }

    /// Error notification fired under this form
    pub fn error_event(self) -> EventType {
        match self {
            Self::Standard => EventType::FullscreenError,
            Self::Webkit => EventType::WebkitFullscreenError,
        }
    }
}

/// Something listeners can be attached to
pub trait EventTarget {
    /// Register a listener; the returned id removes it again
    fn add_event_listener(&self, event_type: EventType, handler: EventHandler) -> ListenerId;

    /// Remove a listener; false if it was not registered here
    fn remove_event_listener(&self, id: ListenerId) -> bool;
}

/// An element that can be presented full-screen and carries inline styles
pub trait FullscreenElement: EventTarget + Clone {
    /// Node identity, not structural equality
    fn is_same_node(&self, other: &Self) -> bool;

    /// Ask the platform to make this element the full-screen occupant.
    ///
    /// Completion is reported later through the change notification.
    fn request_fullscreen(&self, prefix: Prefix) -> Option<Result<()>>;

    /// Current inline value of a CSS property, empty when unset
    fn style_property(&self, name: &str) -> String;

    /// Write an inline CSS property; an empty value removes it
    fn set_style_property(&self, name: &str, value: &str);
}

/// The document-level full-screen API
pub trait FullscreenDocument: EventTarget + Clone {
    type Element: FullscreenElement;

    /// Current occupant as seen through one API form.
    ///
    /// `None` means the form is absent; `Some(None)` means nothing is full-screen.
    fn fullscreen_element(&self, prefix: Prefix) -> Option<Option<Self::Element>>;

    /// Ask the platform to leave full-screen
    fn exit_fullscreen(&self, prefix: Prefix) -> Option<Result<()>>;
}

/// Live full-screen occupant, read through the first exposed form
pub fn fullscreen_occupant<D: FullscreenDocument>(document: &D) -> Option<D::Element> {
    Prefix::FALLBACK_ORDER
        .into_iter()
        .find_map(|prefix| document.fullscreen_element(prefix))
        .flatten()
}

/// Whether `element` is the live full-screen occupant
pub fn is_occupant<D: FullscreenDocument>(document: &D, element: &D::Element) -> bool {
    fullscreen_occupant(document).is_some_and(|occupant| occupant.is_same_node(element))
}

/// Request full-screen through the first exposed form; `None` if none is
pub fn request_fullscreen<E: FullscreenElement>(element: &E) -> Option<Result<()>> {
    Prefix::FALLBACK_ORDER
        .into_iter()
        .find_map(|prefix| element.request_fullscreen(prefix))
}

/// Exit full-screen through the first exposed form; `None` if none is
pub fn exit_fullscreen<D: FullscreenDocument>(document: &D) -> Option<Result<()>> {
    Prefix::FALLBACK_ORDER
        .into_iter()
        .find_map(|prefix| document.exit_fullscreen(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ApiSupport, Document};

    #[test]
    fn test_prefix_events() {
        assert_eq!(Prefix::Standard.change_event(), EventType::FullscreenChange);
        assert_eq!(Prefix::Webkit.change_event(), EventType::WebkitFullscreenChange);
        assert_eq!(Prefix::Webkit.error_event(), EventType::WebkitFullscreenError);
    }

    #[test]
    fn test_request_prefers_unprefixed() {
        let document = Document::new(ApiSupport::both());
        let element = document.create_element("div");

        assert!(matches!(request_fullscreen(&element), Some(Ok(()))));
        assert_eq!(document.calls().requests, vec![(element.id(), Prefix::Standard)]);
    }

    #[test]
    fn test_request_falls_back_to_webkit() {
        let document = Document::new(ApiSupport::webkit_only());
        let element = document.create_element("div");

        assert!(request_fullscreen(&element).is_some());
        document.settle();
        assert_eq!(document.calls().requests, vec![(element.id(), Prefix::Webkit)]);
        assert!(is_occupant(&document, &element));
    }

    #[test]
    fn test_absent_capability() {
        let document = Document::new(ApiSupport::none());
        let element = document.create_element("div");

        assert!(request_fullscreen(&element).is_none());
        assert!(exit_fullscreen(&document).is_none());
        assert!(fullscreen_occupant(&document).is_none());
        assert!(document.calls().requests.is_empty());
    }
}
