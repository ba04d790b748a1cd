//! # fullscreen-host
//!
//! Lets a host element enter and exit full-screen presentation while a
//! caller-supplied set of inline styles is applied, restoring the previous
//! values of exactly those properties on exit.
//!
//! ## Architecture
//!
//! - **platform**: capability traits for the document and element full-screen
//!   API, with unprefixed and `webkit`-prefixed fallback
//! - **fullscreen**: style snapshot, controller, notification-driven host and
//!   the exit trigger companion
//! - **events**: event names, listener registry and output emitters
//! - **dom**: simulated document implementing the platform traits
//! - **web** (feature `web`): browser implementation over `web-sys`
//! - **utils**: shared error types
//!
//! ## Example
//!
//! ```
//! use fullscreen_host::dom::Document;
//! use fullscreen_host::fullscreen::{FullscreenConfig, FullscreenHost, StyleOverride};
//! use fullscreen_host::platform::FullscreenElement;
//!
//! let document = Document::default();
//! let element = document.create_element("video");
//! let style = StyleOverride::parse_css("width: 100vw; height: 100vh").unwrap();
//! let config = FullscreenConfig::with_style(style);
//! let host = FullscreenHost::new(document.clone(), element.clone(), config);
//! host.on_toggle(|fullscreen| println!("full-screen: {fullscreen}"));
//! host.init();
//!
//! host.open();
//! document.settle();
//! assert_eq!(element.style_property("width"), "100vw");
//!
//! document.press_escape();
//! assert_eq!(element.style_property("width"), "");
//! ```

pub mod dom;
pub mod events;
pub mod fullscreen;
pub mod platform;
pub mod utils;
#[cfg(feature = "web")]
pub mod web;

// Re-export main types for convenience
pub use fullscreen::{
    ExitTrigger, FullscreenConfig, FullscreenHandles, FullscreenHost, StyleOverride,
};
pub use utils::error::{ConfigError, FullscreenError, Result};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "fullscreen-host";
