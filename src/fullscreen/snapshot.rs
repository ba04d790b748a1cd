//! Capturing and restoring the overridden part of an element's inline style

use super::config::{StyleMap, StyleOverride};
use crate::platform::FullscreenElement;

/// Pre-override values of exactly the overridden properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    values: StyleMap,
}

impl StyleSnapshot {
    /// Captured value of a property
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values.get(property).map(String::as_str)
    }

    pub fn as_map(&self) -> &StyleMap {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read the current values of `keys` from the element's inline style
pub fn capture<'a, E: FullscreenElement>(
    element: &E,
    keys: impl IntoIterator<Item = &'a str>,
) -> StyleSnapshot {
    let values = keys
        .into_iter()
        .map(|key| (key.to_string(), element.style_property(key)))
        .collect();
    StyleSnapshot { values }
}

/// Write `values` for every key of `keys`.
///
/// Only the override's keys are written. A key missing from `values` is
/// written as an empty value, which clears the property.
pub fn apply<E: FullscreenElement>(element: &E, keys: &StyleOverride, values: &StyleMap) {
    for key in keys.keys() {
        let value = values.get(key).map(String::as_str).unwrap_or("");
        element.set_style_property(key, value);
    }
}

/// Put back the captured values of the override's keys
pub fn restore<E: FullscreenElement>(element: &E, keys: &StyleOverride, snapshot: &StyleSnapshot) {
    apply(element, keys, &snapshot.values);
}
