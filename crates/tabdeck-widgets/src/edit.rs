#![forbid(unsafe_code)]

//! Add/remove editing.
//!
//! The edit controller never touches the pane registry. It turns clicks on
//! the add and remove controls into [`EditIntent`]s for the host, which
//! decides whether and how to change its pane list. Any effect on the active
//! pane follows from the next registry update.

use serde::{Deserialize, Serialize};
use tabdeck_core::event::Event;

use crate::pane::{Pane, PaneKey, PaneRegistry};

/// Glyph for the add control when no override is configured.
pub const DEFAULT_ADD_GLYPH: &str = "+";
/// Glyph for remove controls when neither the pane nor the config overrides it.
pub const DEFAULT_REMOVE_GLYPH: &str = "x";

/// Edit affordances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Expose the add control.
    pub show_add: bool,
    /// Replaces [`DEFAULT_ADD_GLYPH`].
    pub add_icon: Option<String>,
    /// Replaces [`DEFAULT_REMOVE_GLYPH`] for panes without their own icon.
    pub remove_icon: Option<String>,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            show_add: true,
            add_icon: None,
            remove_icon: None,
        }
    }
}

/// Kind of edit the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    Add,
    Remove,
}

impl EditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// A single edit request. Handed to the host once and not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditIntent {
    pub action: EditAction,
    /// Target pane for removals. Always `None` for additions; the host
    /// assigns keys.
    pub key: Option<PaneKey>,
    /// The input that triggered the request.
    pub event: Event,
}

/// Decides which edit controls exist and builds intents from their clicks.
#[derive(Debug, Clone, Default)]
pub struct EditController {
    config: Option<EditConfig>,
}

impl EditController {
    /// `None` disables editing entirely.
    #[must_use]
    pub fn new(config: Option<EditConfig>) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> Option<&EditConfig> {
        self.config.as_ref()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Whether the add control is laid out.
    #[must_use]
    pub fn shows_add(&self) -> bool {
        self.config.as_ref().is_some_and(|c| c.show_add)
    }

    /// Whether `pane` gets a remove control.
    #[must_use]
    pub fn shows_remove(&self, pane: &Pane) -> bool {
        self.is_enabled() && pane.is_removable()
    }

    #[must_use]
    pub fn add_glyph(&self) -> &str {
        self.config
            .as_ref()
            .and_then(|c| c.add_icon.as_deref())
            .unwrap_or(DEFAULT_ADD_GLYPH)
    }

    /// Remove glyph for `pane`: the pane's own icon, then the configured
    /// icon, then the default.
    #[must_use]
    pub fn remove_glyph<'a>(&'a self, pane: &'a Pane) -> &'a str {
        pane.close_icon_override()
            .or_else(|| self.config.as_ref().and_then(|c| c.remove_icon.as_deref()))
            .unwrap_or(DEFAULT_REMOVE_GLYPH)
    }

    /// Click on the add control.
    ///
    /// `None` when no add control is exposed.
    #[must_use]
    pub fn request_add(&self, event: Event) -> Option<EditIntent> {
        if !self.shows_add() {
            return None;
        }
        tracing::debug!(message = "tabs.edit", action = EditAction::Add.as_str());
        Some(EditIntent {
            action: EditAction::Add,
            key: None,
            event,
        })
    }

    /// Click on the remove control of `key`.
    ///
    /// `None` when that pane has no remove control (editing off, unknown,
    /// disabled, or not closable).
    #[must_use]
    pub fn request_remove(
        &self,
        key: &str,
        event: Event,
        registry: &PaneRegistry,
    ) -> Option<EditIntent> {
        let pane = registry.get(key)?;
        if !self.shows_remove(pane) {
            return None;
        }
        tracing::debug!(
            message = "tabs.edit",
            action = EditAction::Remove.as_str(),
            key = %pane.key()
        );
        Some(EditIntent {
            action: EditAction::Remove,
            key: Some(pane.key().clone()),
            event,
        })
    }
}
