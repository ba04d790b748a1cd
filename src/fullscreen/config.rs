//! Host configuration: the style override and the notifications to observe

use std::collections::BTreeMap;
use std::str::FromStr;

use cssparser::{Delimiter, ParseError, Parser, ParserInput};
use serde_json::Value;

use crate::events::EventType;
use crate::platform::Prefix;
use crate::utils::ConfigError;

/// Style values keyed by CSS property name
pub type StyleMap = BTreeMap<String, String>;

/// Properties to override while the host element is full-screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverride {
    properties: StyleMap,
}

impl StyleOverride {
    /// Create an empty override
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StyleOverride::insert`]
    pub fn with(mut self, property: &str, value: &str) -> Self {
        self.insert(property, value);
        self
    }

    /// Add or replace a property; camelCase names are normalized to CSS names.
    ///
    /// A trailing `!important` is kept and written as ` !important`.
    pub fn insert(&mut self, property: &str, value: &str) {
        let value = match split_priority(value) {
            (value, Some(priority)) => format!("{} !{}", value, priority),
            (value, None) => value.to_string(),
        };
        self.properties.insert(normalize_property(property), value);
    }

    /// Overridden property names
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Value for a property
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn as_map(&self) -> &StyleMap {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Parse a CSS declaration list such as `width: 100%; background: black`.
    ///
    /// Values are kept as written apart from the spacing before `!important`;
    /// later declarations replace earlier ones.
    pub fn parse_css(css: &str) -> Result<Self, ConfigError> {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut style = Self::new();

        while !parser.is_exhausted() {
            // Stray semicolons are empty declarations
            if parser.try_parse(|p| p.expect_semicolon()).is_ok() {
                continue;
            }

            let declaration: Result<(String, String), ParseError<'_, ()>> =
                parser.parse_until_after(Delimiter::Semicolon, |p| {
                    let property = p.expect_ident()?.to_string();
                    p.expect_colon()?;
                    let start = p.position();
                    while p.next().is_ok() {}
                    Ok((property, p.slice_from(start).trim().to_string()))
                });

            match declaration {
                Ok((property, value)) if split_priority(&value).0.is_empty() => {
                    return Err(ConfigError::EmptyValue(property));
                }
                Ok((property, value)) => style.insert(&property, &value),
                Err(err) => {
                    return Err(ConfigError::InvalidDeclaration {
                        line: err.location.line + 1,
                        column: err.location.column,
                    });
                }
            }
        }

        Ok(style)
    }

    /// Parse a JSON object of property names to values, or a JSON string of CSS text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value("style", &value)
    }

    fn from_json_value(key: &str, value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::String(css) => Self::parse_css(css),
            Value::Object(map) => {
                let mut style = Self::new();
                for (property, value) in map {
                    let value = match value {
                        Value::String(s) => s.clone(),
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        Value::Null => String::new(),
                        _ => {
                            return Err(ConfigError::InvalidValue {
                                key: property.clone(),
                                expected: "string, number or boolean",
                            });
                        }
                    };
                    style.insert(property, &value);
                }
                Ok(style)
            }
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                expected: "object or CSS text",
            }),
        }
    }
}

impl FromStr for StyleOverride {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css(s)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for StyleOverride {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (property, value) in iter {
            style.insert(property.as_ref(), value.as_ref());
        }
        style
    }
}

/// Split a trailing `!important` off a declaration value.
///
/// Returns the bare value and `Some("important")` when the flag is present,
/// which is the form `CSSStyleDeclaration.setProperty` takes as its priority.
pub fn split_priority(value: &str) -> (&str, Option<&'static str>) {
    const IMPORTANT: &str = "important";

    let value = value.trim();
    let flagged = value
        .len()
        .checked_sub(IMPORTANT.len())
        .and_then(|at| Some((value.get(..at)?, value.get(at..)?)))
        .filter(|(_, flag)| flag.eq_ignore_ascii_case(IMPORTANT))
        .and_then(|(rest, _)| rest.trim_end().strip_suffix('!'));

    match flagged {
        Some(rest) => (rest.trim_end(), Some(IMPORTANT)),
        None => (value, None),
    }
}

/// Convert a DOM-style camelCase property name to its CSS form.
///
/// `backgroundColor` becomes `background-color`, `webkitTransform` and
/// `WebkitTransform` become `-webkit-transform`, and `cssFloat` becomes
/// `float`. Custom properties (`--x`) and names that are already lowercase
/// are returned unchanged.
pub fn normalize_property(name: &str) -> String {
    let name = name.trim();
    if name == "cssFloat" {
        return "float".to_string();
    }
    if name.starts_with("--") || !name.chars().any(|c| c.is_ascii_uppercase()) {
        return name.to_string();
    }

    let mut css = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            css.push('-');
            css.push(c.to_ascii_lowercase());
        } else {
            css.push(c);
        }
    }

    if ["webkit-", "moz-", "ms-"].iter().any(|vendor| css.starts_with(vendor)) {
        css.insert(0, '-');
    }
    css
}

/// Configuration accepted by a full-screen host
#[derive(Debug, Clone, PartialEq)]
pub struct FullscreenConfig {
    /// Style applied only while the host element is the full-screen occupant
    pub style: StyleOverride,
    /// Change notifications to observe; a host given none observes the defaults
    pub change_events: Vec<EventType>,
}

impl FullscreenConfig {
    /// Default notifications with the given override
    pub fn with_style(style: StyleOverride) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Error notifications matching the observed change notifications
    pub fn error_events(&self) -> Vec<EventType> {
        Prefix::FALLBACK_ORDER
            .into_iter()
            .filter(|prefix| self.change_events.contains(&prefix.change_event()))
            .map(Prefix::error_event)
            .collect()
    }

    /// Read configuration from JSON.
    ///
    /// ```json
    /// { "style": { "width": "100%" }, "changeEvents": ["fullscreenchange"] }
    /// ```
    ///
    /// `style` may also be a string of CSS declarations. Missing keys keep
    /// their defaults. An empty `changeEvents` list is rejected, since a host
    /// that observes nothing never sees its requests confirmed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(ConfigError::InvalidValue {
                key: "config".to_string(),
                expected: "object",
            });
        };

        let mut config = Self::default();
        if let Some(style) = map.get("style") {
            config.style = StyleOverride::from_json_value("style", style)?;
        }
        if let Some(events) = map.get("changeEvents") {
            let Value::Array(names) = events else {
                return Err(ConfigError::InvalidValue {
                    key: "changeEvents".to_string(),
                    expected: "array of event names",
                });
            };
            config.change_events = names
                .iter()
                .map(|name| match name {
                    Value::String(name) => EventType::parse_change_event(name),
                    _ => Err(ConfigError::InvalidValue {
                        key: "changeEvents".to_string(),
                        expected: "array of event names",
                    }),
                })
                .collect::<Result<_, _>>()?;
            if config.change_events.is_empty() {
                return Err(ConfigError::NoChangeEvents);
            }
        }
        Ok(config)
    }
}

impl Default for FullscreenConfig {
    fn default() -> Self {
        Self {
            style: StyleOverride::new(),
            change_events: Prefix::FALLBACK_ORDER
                .into_iter()
                .map(Prefix::change_event)
                .collect(),
        }
    }
}
