//! Inline style declarations

use std::collections::BTreeMap;
use std::fmt;

/// Inline style of an element, keyed by CSS property name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    properties: BTreeMap<String, String>,
}

impl StyleDeclaration {
    /// Create an empty declaration block
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value, empty when unset
    pub fn get_property_value(&self, property: &str) -> &str {
        self.properties.get(property).map(String::as_str).unwrap_or("")
    }

    /// Set a property value; an empty value removes the property
    pub fn set_property(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        if value.is_empty() {
            self.properties.remove(&property);
        } else {
            self.properties.insert(property, value);
        }
    }

    /// Number of set properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate set properties in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for StyleDeclaration {
    /// Serialize as `cssText`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (property, value) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", property, value)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_property_is_empty() {
        let style = StyleDeclaration::new();
        assert_eq!(style.get_property_value("width"), "");
        assert!(style.is_empty());
    }

    #[test]
    fn test_empty_value_removes() {
        let mut style = StyleDeclaration::new();
        style.set_property("width", "10px");
        assert_eq!(style.get_property_value("width"), "10px");

        style.set_property("width", "");
        assert_eq!(style.len(), 0);
    }

    #[test]
    fn test_css_text() {
        let mut style = StyleDeclaration::new();
        style.set_property("width", "100%");
        style.set_property("background-color", "black");
        assert_eq!(style.to_string(), "background-color: black; width: 100%;");
    }
}
