//! Output signals
//!
//! An `EventEmitter` is the outbound half of a host: observers subscribe with a
//! callback and receive every emitted value until they unsubscribe.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies a subscription on an emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Single-threaded multicast signal
pub struct EventEmitter<T> {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
}

impl<T> EventEmitter<T> {
    /// Create an emitter with no subscribers
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback for every future emission
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Drop a subscription; returns false if it was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    /// Deliver a value to all current subscribers
    pub fn emit(&self, value: &T) {
        // Subscribers may subscribe or unsubscribe while being called.
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in subscribers {
            callback(value);
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_subscribers() {
        let emitter = EventEmitter::<bool>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        emitter.subscribe(move |v| sink.borrow_mut().push(*v));

        emitter.emit(&true);
        emitter.emit(&false);
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_unsubscribe() {
        let emitter = EventEmitter::<u32>::new();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let id = emitter.subscribe(move |v| sink.set(sink.get() + v));

        emitter.emit(&2);
        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.emit(&5);
        assert_eq!(seen.get(), 2);
        assert_eq!(emitter.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_during_emit() {
        let emitter = Rc::new(EventEmitter::<()>::new());
        let inner = Rc::clone(&emitter);
        emitter.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        emitter.emit(&());
        assert_eq!(emitter.subscriber_count(), 2);
    }
}
