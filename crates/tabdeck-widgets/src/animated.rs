#![forbid(unsafe_code)]

//! Animation switches for the ink bar and pane transitions.
//!
//! Timing itself belongs to the presentation layer. This module only decides
//! which transitions are on, normalizing the loose [`Animated`] option into
//! [`AnimatedFlags`].
//!
//! # Failure Modes
//!
//! - `tab_pane: true` without `tab_pane_motion` cannot animate. The pane
//!   transition is switched off, a warning is logged on the
//!   `tabdeck::animated` target, and a [`Diagnostic`] is returned. Rendering
//!   continues normally.

use serde::{Deserialize, Serialize};

/// Text of the warning emitted for a pane transition with no motion.
pub const MISSING_MOTION_WARNING: &str = "Warning: `animated.tabPane` is true but `animated.tabPaneMotion` is not provided. Motion will not work.";

/// Motion description handed to the presentation layer for pane transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneMotion {
    /// Named transition understood by the presentation layer.
    pub name: Option<String>,
    /// Transition length in milliseconds. `0` lets the renderer pick.
    #[serde(alias = "durationMs")]
    pub duration_ms: u32,
}

/// Animation option as supplied by the host.
///
/// Accepts `true`, `false`, or a table with the individual switches. Table
/// keys may be snake_case or camelCase (`inkBar`, `tabPane`,
/// `tabPaneMotion`); any other key is a load error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum Animated {
    /// `true` animates the ink bar only; `false` disables everything.
    Enabled(bool),
    /// Individual switches.
    Custom {
        #[serde(default = "default_ink_bar", alias = "inkBar")]
        ink_bar: bool,
        #[serde(default, alias = "tabPane")]
        tab_pane: bool,
        #[serde(default, alias = "tabPaneMotion")]
        tab_pane_motion: Option<PaneMotion>,
    },
}

fn default_ink_bar() -> bool {
    true
}

impl Default for Animated {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

impl From<bool> for Animated {
    fn from(value: bool) -> Self {
        Self::Enabled(value)
    }
}

/// Normalized animation switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimatedFlags {
    pub ink_bar: bool,
    pub tab_pane: bool,
    /// Present whenever `tab_pane` is on.
    pub motion: Option<PaneMotion>,
}

/// Non-fatal configuration problems reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Pane transition requested without a motion.
    MissingPaneMotion,
}

impl Diagnostic {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingPaneMotion => MISSING_MOTION_WARNING,
        }
    }
}

impl Animated {
    /// Normalize into flags, degrading unsupported combinations.
    #[must_use]
    pub fn normalize(&self) -> (AnimatedFlags, Option<Diagnostic>) {
        match self {
            Self::Enabled(false) => (AnimatedFlags::default(), None),
            Self::Enabled(true) => (
                AnimatedFlags {
                    ink_bar: true,
                    ..AnimatedFlags::default()
                },
                None,
            ),
            Self::Custom {
                ink_bar,
                tab_pane,
                tab_pane_motion,
            } => {
                if *tab_pane && tab_pane_motion.is_none() {
                    tracing::warn!(target: "tabdeck::animated", "{}", MISSING_MOTION_WARNING);
                    let flags = AnimatedFlags {
                        ink_bar: *ink_bar,
                        ..AnimatedFlags::default()
                    };
                    return (flags, Some(Diagnostic::MissingPaneMotion));
                }
                let flags = AnimatedFlags {
                    ink_bar: *ink_bar,
                    tab_pane: *tab_pane,
                    motion: tab_pane_motion.clone().filter(|_| *tab_pane),
                };
                (flags, None)
            }
        }
    }
}
