#![forbid(unsafe_code)]

//! Tab interaction controller.
//!
//! Owns the active-key state machine. User actions (pointer activation, key
//! presses on a focused tab, focus changes) and host updates (new pane list,
//! new controlled key) all pass through here, and every one of them re-runs
//! the resolver at most once.
//!
//! # Invariants
//!
//! 1. `active_key()` is always `None` or a key present in the last registry
//!    the controller saw.
//! 2. Disabled or unknown panes are never activated by user input.
//! 3. Each `activate` reports at most one change, and only when the resolved
//!    key actually differs.
//! 4. In controlled mode nothing is stored: the change is reported to the
//!    host, and the active key moves only when the host supplies a new key.
//!
//! # Example
//!
//! ```
//! use tabdeck_widgets::controller::{ActivationTrigger, TabController};
//! use tabdeck_widgets::pane::{Pane, PaneRegistry};
//! use tabdeck_widgets::resolve::ActivationMode;
//!
//! let registry = PaneRegistry::from_panes([Pane::new("a", "A"), Pane::new("b", "B")]);
//! let mut ctl = TabController::new(ActivationMode::Uncontrolled, None, &registry);
//! assert_eq!(ctl.active_key().map(|k| k.as_str()), Some("a"));
//!
//! let outcome = ctl.activate("b", ActivationTrigger::Pointer, &registry);
//! assert_eq!(outcome.changed_key().map(|k| k.as_str()), Some("b"));
//! ```

use crate::config::TabPosition;
use crate::edit::{EditController, EditIntent};
use crate::pane::{PaneKey, PaneRegistry};
use crate::resolve::{ActivationMode, resolve, resolve_mode};
use tabdeck_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};

/// What kind of input triggered an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationTrigger {
    /// Pointer press on a tab control.
    Pointer,
    /// Activation key on a focused tab control.
    Key,
}

impl ActivationTrigger {
    const fn reason(self) -> &'static str {
        match self {
            Self::Pointer => "click",
            Self::Key => "key",
        }
    }
}

/// Result of an activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivateOutcome {
    /// Disabled or unknown pane. Nothing happened.
    Rejected,
    /// A recognized activation on `key`.
    ///
    /// `changed` is `true` when the active key differs afterwards (or, in
    /// controlled mode, when the host is asked to change it).
    Clicked { key: PaneKey, changed: bool },
}

impl ActivateOutcome {
    /// Key to report as clicked, if the attempt was recognized.
    #[must_use]
    pub fn clicked_key(&self) -> Option<&PaneKey> {
        match self {
            Self::Clicked { key, .. } => Some(key),
            Self::Rejected => None,
        }
    }

    /// Key to report as the new active key, if it changed.
    #[must_use]
    pub fn changed_key(&self) -> Option<&PaneKey> {
        match self {
            Self::Clicked { key, changed: true } => Some(key),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Ask the presentation layer to bring a tab control into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Pane whose control should be visible.
    pub key: PaneKey,
    /// Display index of that pane.
    pub index: usize,
}

/// Result of a key press routed to the focused tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a key the tab strip handles, or no tab has focus.
    Ignored,
    /// Space/Enter on the focused tab.
    Activated(ActivateOutcome),
    /// Arrow/Home/End moved focus.
    FocusMoved(ScrollRequest),
    /// Delete/Backspace on a focused tab that has a remove control.
    Edit(EditIntent),
}

/// Internal selection, only meaningful in uncontrolled mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationState {
    internal: Option<PaneKey>,
}

impl ActivationState {
    #[must_use]
    pub fn key(&self) -> Option<&PaneKey> {
        self.internal.as_ref()
    }
}

/// The active-key state machine.
#[derive(Debug, Clone, Default)]
pub struct TabController {
    mode: ActivationMode,
    state: ActivationState,
    resolved: Option<PaneKey>,
    focused: Option<PaneKey>,
}

impl TabController {
    /// Create a controller for `registry`.
    ///
    /// `default_active` seeds the internal selection in uncontrolled mode and
    /// is ignored in controlled mode. An unknown default falls back like any
    /// stale key.
    #[must_use]
    pub fn new(
        mode: ActivationMode,
        default_active: Option<PaneKey>,
        registry: &PaneRegistry,
    ) -> Self {
        let mut ctl = Self {
            mode,
            ..Self::default()
        };
        let resolved = resolve_mode(&ctl.mode, default_active.as_ref(), registry);
        ctl.store(resolved);
        ctl
    }

    #[must_use]
    pub fn mode(&self) -> &ActivationMode {
        &self.mode
    }

    /// The resolved active key.
    #[must_use]
    pub fn active_key(&self) -> Option<&PaneKey> {
        self.resolved.as_ref()
    }

    /// The stored internal selection (uncontrolled mode only).
    #[must_use]
    pub fn state(&self) -> &ActivationState {
        &self.state
    }

    /// The tab control that currently has focus.
    #[must_use]
    pub fn focused_key(&self) -> Option<&PaneKey> {
        self.focused.as_ref()
    }

    /// Whether `key` is the resolved active key.
    #[must_use]
    pub fn is_active(&self, key: &str) -> bool {
        self.resolved.as_ref().is_some_and(|k| k == key)
    }

    /// The pane list was replaced. Re-resolve once.
    ///
    /// Returns `true` if the active key moved. No change notification is
    /// owed to the host for this; it is not a user action.
    pub fn registry_changed(&mut self, registry: &PaneRegistry) -> bool {
        if let Some(focused) = &self.focused
            && !registry.contains(focused.as_str())
        {
            self.focused = None;
        }
        let next = resolve_mode(&self.mode, self.resolved.as_ref(), registry);
        self.transition("registry", next)
    }

    /// The host supplied a new activation mode or controlled key.
    pub fn set_mode(&mut self, mode: ActivationMode, registry: &PaneRegistry) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        let next = resolve_mode(&self.mode, self.resolved.as_ref(), registry);
        self.transition("controlled", next)
    }

    /// Attempt to activate `key`.
    pub fn activate(
        &mut self,
        key: &str,
        trigger: ActivationTrigger,
        registry: &PaneRegistry,
    ) -> ActivateOutcome {
        let Some(pane) = registry.get(key) else {
            return ActivateOutcome::Rejected;
        };
        if pane.is_disabled() {
            return ActivateOutcome::Rejected;
        }
        let key = pane.key().clone();
        if self.is_active(key.as_str()) {
            return ActivateOutcome::Clicked {
                key,
                changed: false,
            };
        }
        if !self.mode.is_controlled() {
            let next = resolve(None, Some(&key), registry);
            self.transition(trigger.reason(), next);
        } else {
            tracing::debug!(
                message = "tabs.request",
                reason = trigger.reason(),
                to = %key
            );
        }
        ActivateOutcome::Clicked { key, changed: true }
    }

    /// Focus moved onto the control for `key`.
    ///
    /// Activation is unchanged. Returns the scroll-into-view request, or
    /// `None` for an unknown key.
    pub fn focus(&mut self, key: &str, registry: &PaneRegistry) -> Option<ScrollRequest> {
        let index = registry.position(key)?;
        let key = registry.as_slice()[index].key().clone();
        self.focused = Some(key.clone());
        Some(ScrollRequest { key, index })
    }

    /// Focus left the tab strip.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Route a key press to the focused tab.
    ///
    /// Supported:
    /// - `Space` / `Enter`: activate the focused tab
    /// - `Delete` / `Backspace`: request removal of the focused tab, if `edit`
    ///   gives it a remove control
    /// - `Left` / `Right` (`Up` / `Down` for side positions): move focus to the
    ///   neighbouring enabled tab
    /// - `Home` / `End`: focus the first / last enabled tab
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        registry: &PaneRegistry,
        edit: &EditController,
        position: TabPosition,
    ) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Ignored;
        }
        let Some(focused) = self.focused.clone() else {
            return KeyOutcome::Ignored;
        };
        if key.is_activation() {
            let outcome = self.activate(focused.as_str(), ActivationTrigger::Key, registry);
            return KeyOutcome::Activated(outcome);
        }
        if key.is_removal() {
            return edit
                .request_remove(focused.as_str(), Event::Key(*key), registry)
                .map_or(KeyOutcome::Ignored, KeyOutcome::Edit);
        }
        let Some(current) = registry.position(focused.as_str()) else {
            return KeyOutcome::Ignored;
        };
        let (back, forward) = if position.is_vertical() {
            (KeyCode::Up, KeyCode::Down)
        } else {
            (KeyCode::Left, KeyCode::Right)
        };
        let panes = registry.as_slice();
        let target = match key.code {
            code if code == back => panes[..current].iter().rposition(|p| !p.is_disabled()),
            code if code == forward => panes[current + 1..]
                .iter()
                .position(|p| !p.is_disabled())
                .map(|offset| current + 1 + offset),
            KeyCode::Home => panes.iter().position(|p| !p.is_disabled()),
            KeyCode::End => panes.iter().rposition(|p| !p.is_disabled()),
            _ => return KeyOutcome::Ignored,
        };
        match target {
            Some(index) if index != current => {
                let key = panes[index].key().clone();
                self.focused = Some(key.clone());
                KeyOutcome::FocusMoved(ScrollRequest { key, index })
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn store(&mut self, resolved: Option<PaneKey>) {
        if !self.mode.is_controlled() {
            self.state.internal = resolved.clone();
        }
        self.resolved = resolved;
    }

    fn transition(&mut self, reason: &'static str, next: Option<PaneKey>) -> bool {
        if next == self.resolved {
            if !self.mode.is_controlled() {
                self.state.internal = next;
            }
            return false;
        }
        tracing::debug!(
            message = "tabs.switch",
            reason,
            from = ?self.resolved.as_ref().map(PaneKey::as_str),
            to = ?next.as_ref().map(PaneKey::as_str)
        );
        self.store(next);
        true
    }
}
