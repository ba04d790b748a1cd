//! Full-screen host behavior
//!
//! - **config**: the style override and observed notifications
//! - **snapshot**: capture and restore of the overridden properties
//! - **controller**: entry/exit requests and the per-session snapshot
//! - **host**: notification observer and lifecycle binding
//! - **exit_trigger**: companion that exits full-screen on activation

mod config;
mod controller;
mod exit_trigger;
mod host;
pub mod snapshot;

pub use config::{FullscreenConfig, StyleMap, StyleOverride, normalize_property, split_priority};
pub use controller::FullscreenController;
pub use exit_trigger::ExitTrigger;
pub use host::{FullscreenHandles, FullscreenHost};
pub use snapshot::StyleSnapshot;
