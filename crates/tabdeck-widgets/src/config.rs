#![forbid(unsafe_code)]

//! Declarative configuration for a [`Tabs`](crate::tabs::Tabs) widget.
//!
//! Everything here is plain data: strip position and spacing, animation
//! switches, edit affordances and extra content. The whole struct loads from
//! JSON or TOML.
//!
//! # Loading
//!
//! ```toml
//! position = "top"
//! gutter = 2
//! destroy_inactive = false
//! animated = true
//!
//! [editable]
//! show_add = true
//!
//! [extra]
//! left = "Left Bamboo"
//! right = "Right Bamboo"
//! ```
//!
//! ```rust,ignore
//! let config = TabsConfig::from_toml_str(toml)?;
//! let config = TabsConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `TabsConfig::default()` is a top strip with no gutter, ink bar animation
//! on, no editing, and every visited pane kept mounted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animated::Animated;
use crate::edit::EditConfig;

/// Upper bound for `gutter`.
pub const MAX_GUTTER: u16 = 64;

/// Which side of the content the tab strip sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl TabPosition {
    /// Side positions stack tabs vertically.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Fixed content at the edges of the strip.
///
/// Loads from a `{ left, right }` table, or from a plain string, which is
/// shown on the trailing edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExtraRepr")]
pub struct TabBarExtra {
    pub left: Option<String>,
    pub right: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged, deny_unknown_fields)]
enum ExtraRepr {
    Right(String),
    Sides {
        #[serde(default)]
        left: Option<String>,
        #[serde(default)]
        right: Option<String>,
    },
}

impl From<ExtraRepr> for TabBarExtra {
    fn from(repr: ExtraRepr) -> Self {
        match repr {
            ExtraRepr::Right(text) => Self::right(text),
            ExtraRepr::Sides { left, right } => Self { left, right },
        }
    }
}

impl TabBarExtra {
    /// Extra content shown only on the trailing edge.
    #[must_use]
    pub fn right(text: impl Into<String>) -> Self {
        Self {
            left: None,
            right: Some(text.into()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.as_deref().is_none_or(str::is_empty)
            && self.right.as_deref().is_none_or(str::is_empty)
    }
}

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Strip placement.
    pub position: TabPosition,

    /// Space before every tab except the first. Horizontal for top/bottom
    /// strips, vertical for side strips.
    pub gutter: Option<u16>,

    /// Unmount inactive pane content instead of hiding it.
    pub destroy_inactive: bool,

    /// Indicator and pane transition switches.
    pub animated: Animated,

    /// Add/remove affordances. `None` disables editing.
    pub editable: Option<EditConfig>,

    /// Leading/trailing strip content.
    pub extra: TabBarExtra,

    /// Separator drawn between adjacent tabs.
    pub separator: String,

    /// Free-form style class forwarded to custom tab bar renderers.
    pub bar_style: Option<String>,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            position: TabPosition::Top,
            gutter: None,
            destroy_inactive: false,
            animated: Animated::default(),
            editable: None,
            extra: TabBarExtra::default(),
            separator: " ".to_owned(),
            bar_style: None,
        }
    }
}

impl TabsConfig {
    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML string and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Validate parameters.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(gutter) = self.gutter
            && gutter > MAX_GUTTER
        {
            errors.push(format!("gutter must be <= {MAX_GUTTER}, got {gutter}"));
        }
        if self.separator.contains(['\n', '\r']) {
            errors.push("separator must be a single line".into());
        }
        for (side, text) in [("left", &self.extra.left), ("right", &self.extra.right)] {
            if text.as_deref().is_some_and(|t| t.contains(['\n', '\r'])) {
                errors.push(format!("extra.{side} must be a single line"));
            }
        }
        errors
    }

    /// `self` if valid, otherwise [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
