//! Leaves full-screen when another element is activated

use std::rc::Rc;

use log::debug;

use crate::events::{Event, EventType, ListenerId};
use crate::platform::{self, EventTarget, FullscreenDocument};

/// Requests full-screen exit on activation.
///
/// Holds no style state: the host of whichever element is full-screen
/// restores its own styles when the change notification arrives.
#[derive(Debug, Clone)]
pub struct ExitTrigger<D: FullscreenDocument> {
    document: D,
    activation: EventType,
}

impl<D: FullscreenDocument + 'static> ExitTrigger<D> {
    /// Trigger activated by `click`
    pub fn new(document: D) -> Self {
        Self::with_activation(document, EventType::Click)
    }

    /// Trigger activated by another event type
    pub fn with_activation(document: D, activation: EventType) -> Self {
        Self { document, activation }
    }

    /// Exit full-screen if any element is full-screen; returns whether an exit was sent
    pub fn activate(&self) -> bool {
        exit_if_fullscreen(&self.document)
    }

    /// Call [`ExitTrigger::activate`] whenever `target` receives the activation event.
    ///
    /// Remove the returned listener from `target` to unbind.
    pub fn bind<T: EventTarget>(&self, target: &T) -> ListenerId {
        let document = self.document.clone();
        target.add_event_listener(
            self.activation.clone(),
            Rc::new(move |_: &Event| {
                exit_if_fullscreen(&document);
            }),
        )
    }
}

fn exit_if_fullscreen<D: FullscreenDocument>(document: &D) -> bool {
    if platform::fullscreen_occupant(document).is_none() {
        debug!("exit trigger ignored: nothing is full-screen");
        return false;
    }
    match platform::exit_fullscreen(document) {
        Some(Ok(())) => true,
        Some(Err(err)) => {
            debug!("exit trigger failed: {}", err);
            false
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ApiSupport, Document};
    use crate::platform::Prefix;

    #[test]
    fn test_activate_without_fullscreen() {
        let document = Document::default();
        let trigger = ExitTrigger::new(document.clone());

        assert!(!trigger.activate());
        assert!(document.calls().exits.is_empty());
    }

    #[test]
    fn test_click_exits_fullscreen() {
        let document = Document::new(ApiSupport::webkit_only());
        let video = document.create_element("video");
        let button = document.create_element("button");
        let trigger = ExitTrigger::new(document.clone());
        let id = trigger.bind(&button);

        platform::request_fullscreen(&video);
        document.settle();
        document.click(&button);
        document.settle();

        assert_eq!(document.fullscreen_element_id(), None);
        assert_eq!(document.calls().exits, vec![Prefix::Webkit]);

        assert!(button.remove_event_listener(id));
    }

    #[test]
    fn test_custom_activation() {
        let document = Document::default();
        let element = document.create_element("div");
        let panel = document.create_element("div");
        let trigger = ExitTrigger::with_activation(document.clone(), EventType::KeyDown);
        trigger.bind(&panel);

        platform::request_fullscreen(&element);
        document.settle();
        document.click(&panel);
        assert!(document.calls().exits.is_empty());

        document.fire(&Event::targeted(EventType::KeyDown, panel.id()));
        assert_eq!(document.calls().exits, vec![Prefix::Standard]);
    }

    #[test]
    fn test_no_exit_capability() {
        let document = Document::new(ApiSupport::none());
        let trigger = ExitTrigger::new(document.clone());
        assert!(!trigger.activate());
    }
}
