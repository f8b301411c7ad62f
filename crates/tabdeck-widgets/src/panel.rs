#![forbid(unsafe_code)]

//! Pane content mounting.
//!
//! Only the active pane is shown, but hidden panes may stay mounted so that
//! their content survives switching back. A pane is mounted when it is
//! active, or when inactive panes are kept and the pane has been active
//! before or asks to be rendered eagerly.

use ahash::AHashSet;

use crate::animated::PaneMotion;
use crate::pane::{Pane, PaneKey, PaneRegistry};

/// Keys of panes that have been active at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedPanes {
    keys: AHashSet<PaneKey>,
}

impl VisitedPanes {
    /// Record `key` as visited. Returns `true` on first visit.
    pub fn mark(&mut self, key: &PaneKey) -> bool {
        self.keys.insert(key.clone())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Forget panes that are no longer registered.
    pub fn retain(&mut self, registry: &PaneRegistry) {
        self.keys.retain(|key| registry.contains(key.as_str()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A mounted pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEntry<'a> {
    pub pane: &'a Pane,
    /// Shown; every other entry is mounted but hidden.
    pub active: bool,
}

/// Mounted panes in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelList<'a> {
    entries: Vec<PanelEntry<'a>>,
    motion: Option<&'a PaneMotion>,
}

impl<'a> PanelList<'a> {
    /// Decide which panes are mounted.
    #[must_use]
    pub fn build(
        registry: &'a PaneRegistry,
        active: Option<&PaneKey>,
        visited: &VisitedPanes,
        destroy_inactive: bool,
    ) -> Self {
        let entries = registry
            .iter()
            .filter_map(|pane| {
                let active = active.is_some_and(|k| k == pane.key());
                let keep = !destroy_inactive
                    && (visited.contains(pane.key().as_str()) || pane.is_force_render());
                (active || keep).then_some(PanelEntry { pane, active })
            })
            .collect();
        Self {
            entries,
            motion: None,
        }
    }

    /// Attach the pane transition to play on switches.
    #[must_use]
    pub fn with_motion(mut self, motion: Option<&'a PaneMotion>) -> Self {
        self.motion = motion;
        self
    }

    #[must_use]
    pub fn motion(&self) -> Option<&'a PaneMotion> {
        self.motion
    }

    #[must_use]
    pub fn entries(&self) -> &[PanelEntry<'a>] {
        &self.entries
    }

    /// The shown pane, if any.
    #[must_use]
    pub fn active(&self) -> Option<&'a Pane> {
        self.entries.iter().find(|e| e.active).map(|e| e.pane)
    }

    #[must_use]
    pub fn is_mounted(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.pane.key() == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
