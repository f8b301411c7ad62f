#![forbid(unsafe_code)]

//! Activation resolution.
//!
//! [`resolve`] decides which pane is active from three inputs: an explicit
//! controlled key, the previously resolved key, and the current registry.
//!
//! # Algorithm
//!
//! 1. A controlled key present in the registry wins, even if that pane is
//!    disabled.
//! 2. Otherwise a previous key still present in the registry is kept.
//! 3. Otherwise the first enabled pane in display order; if every pane is
//!    disabled, the first pane; if the registry is empty, `None`.
//!
//! # Invariants
//!
//! - The result is `None` or a key present in `registry`.
//! - Same inputs always produce the same output.
//!
//! Controlled mode never falls back: see [`resolve_mode`].

use crate::pane::{PaneKey, PaneRegistry};

/// Who owns the active key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActivationMode {
    /// The widget keeps its own selection.
    #[default]
    Uncontrolled,
    /// The host supplies the active key on every update.
    Controlled(PaneKey),
}

impl ActivationMode {
    /// The controlled key, if any.
    #[must_use]
    pub fn controlled_key(&self) -> Option<&PaneKey> {
        match self {
            Self::Controlled(key) => Some(key),
            Self::Uncontrolled => None,
        }
    }

    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled(_))
    }
}

/// Compute the next active key.
#[must_use]
pub fn resolve(
    controlled: Option<&PaneKey>,
    previous: Option<&PaneKey>,
    registry: &PaneRegistry,
) -> Option<PaneKey> {
    if let Some(key) = controlled
        && registry.contains(key.as_str())
    {
        return Some(key.clone());
    }
    if let Some(key) = previous
        && registry.contains(key.as_str())
    {
        return Some(key.clone());
    }
    registry
        .first_enabled()
        .or_else(|| registry.first())
        .map(|pane| pane.key().clone())
}

/// Resolve under an [`ActivationMode`].
///
/// In controlled mode a key that matches no pane resolves to `None`: the
/// host's explicit choice is trusted, so nothing is highlighted rather than
/// silently picking another pane.
#[must_use]
pub fn resolve_mode(
    mode: &ActivationMode,
    previous: Option<&PaneKey>,
    registry: &PaneRegistry,
) -> Option<PaneKey> {
    match mode {
        ActivationMode::Controlled(key) if !registry.contains(key.as_str()) => None,
        ActivationMode::Controlled(key) => resolve(Some(key), previous, registry),
        ActivationMode::Uncontrolled => resolve(None, previous, registry),
    }
}
