#![forbid(unsafe_code)]

//! Tabbed navigation widget for TabDeck.
//!
//! # Role in TabDeck
//! Given a declared list of panes, this crate decides which one is active,
//! turns clicks and key presses into activation and edit requests, and lays
//! out a tab strip for the presentation layer to draw.
//!
//! # Layers
//! - [`pane`]: pane declarations and the normalized [`pane::PaneRegistry`].
//! - [`resolve`]: the pure active-key resolver.
//! - [`controller`]: the activation state machine.
//! - [`edit`]: add/remove requests.
//! - [`strip`], [`bar`], [`panel`]: layout, tab bar rendering, pane mounting.
//! - [`tabs`]: the [`tabs::Tabs`] widget that wires them to host callbacks.
//! - [`config`], [`animated`]: declarative options loaded from JSON or TOML.

pub mod animated;
pub mod bar;
pub mod config;
pub mod controller;
pub mod edit;
pub mod pane;
pub mod panel;
pub mod resolve;
pub mod strip;
pub mod tabs;

pub use config::{ConfigError, TabPosition, TabsConfig};
pub use pane::{Pane, PaneKey, PaneRegistry, PaneSpec};
pub use tabs::Tabs;
