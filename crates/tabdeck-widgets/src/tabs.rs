#![forbid(unsafe_code)]

//! The tabs widget.
//!
//! [`Tabs`] ties the pieces together: it owns the normalized pane registry,
//! the activation controller, the edit controller and the strip scroll state,
//! and reports user actions to the host through callbacks.
//!
//! Callback order for a recognized tab activation is `on_tab_click` first,
//! then `on_change` if the active key changed (or, in controlled mode, should
//! change). Registry and controlled-key updates from the host never fire
//! `on_change`.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tabdeck_core::event::Event;
//! use tabdeck_widgets::pane::PaneSpec;
//! use tabdeck_widgets::tabs::Tabs;
//!
//! let changes = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&changes);
//! let mut tabs = Tabs::new([PaneSpec::new("a", "A"), PaneSpec::new("b", "B")])
//!     .on_change(move |key| sink.borrow_mut().push(key.to_string()));
//!
//! tabs.click_tab("b", Event::click(0, 0));
//! assert_eq!(tabs.active().map(|k| k.as_str()), Some("b"));
//! assert_eq!(*changes.borrow(), ["b"]);
//! ```

use std::fmt;

use tabdeck_core::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tabdeck_core::geometry::Rect;
use tabdeck_core::text::{cell_span, display_width};

use crate::animated::{AnimatedFlags, Diagnostic};
use crate::bar::{DefaultTabBar, TabBarProps, TabBarRenderer};
use crate::config::{TabPosition, TabsConfig};
use crate::controller::{
    ActivateOutcome, ActivationTrigger, KeyOutcome, ScrollRequest, TabController,
};
use crate::edit::{EditAction, EditController, EditIntent};
use crate::pane::{PaneKey, PaneRegistry, PaneSpec};
use crate::panel::{PanelList, VisitedPanes};
use crate::resolve::ActivationMode;
use crate::strip::{StripHit, StripInput, StripLayout, StripState};

/// Active key changed (or a change was requested in controlled mode).
pub type ChangeHandler = Box<dyn FnMut(&PaneKey)>;
/// A tab was activated by the user, whether or not anything changed.
pub type TabClickHandler = Box<dyn FnMut(&PaneKey, &Event)>;
/// The user asked to add or remove a pane.
pub type EditHandler = Box<dyn FnMut(EditAction, &EditIntent)>;

/// Result of routing a pointer event to the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabsAction {
    /// Not on a control, or not an event the strip handles.
    Ignored,
    /// A tab control was pressed.
    Tab(ActivateOutcome),
    /// An add or remove control was pressed.
    Edit(EditIntent),
    /// The strip scrolled.
    Scrolled,
}

/// One frame of output.
#[derive(Debug, Clone)]
pub struct TabsView<'a> {
    pub bar_area: Rect,
    pub content_area: Rect,
    /// Tab bar rows, one string per row of `bar_area`.
    pub bar: Vec<String>,
    pub panels: PanelList<'a>,
}

/// Tabbed navigation widget.
pub struct Tabs {
    registry: PaneRegistry,
    controller: TabController,
    edit: EditController,
    config: TabsConfig,
    animated: AnimatedFlags,
    diagnostics: Vec<Diagnostic>,
    strip: StripState,
    layout: StripLayout,
    visited: VisitedPanes,
    renderer: Option<Box<dyn TabBarRenderer>>,
    on_change: Option<ChangeHandler>,
    on_tab_click: Option<TabClickHandler>,
    on_edit: Option<EditHandler>,
}

impl fmt::Debug for Tabs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tabs")
            .field("registry", &self.registry)
            .field("controller", &self.controller)
            .field("config", &self.config)
            .field("animated", &self.animated)
            .field("diagnostics", &self.diagnostics)
            .field("strip", &self.strip)
            .field("custom_renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Tabs {
    fn default() -> Self {
        Self::from_registry(PaneRegistry::new())
    }
}

impl Tabs {
    /// Create an uncontrolled widget from raw pane declarations.
    #[must_use]
    pub fn new(panes: impl IntoIterator<Item = PaneSpec>) -> Self {
        Self::from_registry(PaneRegistry::normalize(panes))
    }

    /// Create an uncontrolled widget from an already normalized registry.
    #[must_use]
    pub fn from_registry(registry: PaneRegistry) -> Self {
        let controller = TabController::new(ActivationMode::Uncontrolled, None, &registry);
        let mut tabs = Self {
            registry,
            controller,
            edit: EditController::default(),
            config: TabsConfig::default(),
            animated: AnimatedFlags::default(),
            diagnostics: Vec::new(),
            strip: StripState::default(),
            layout: StripLayout::default(),
            visited: VisitedPanes::default(),
            renderer: None,
            on_change: None,
            on_tab_click: None,
            on_edit: None,
        };
        tabs.apply_config(TabsConfig::default());
        tabs.sync_visited();
        tabs
    }

    /// Set the configuration.
    #[must_use]
    pub fn config(mut self, config: TabsConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Drive activation from the host.
    #[must_use]
    pub fn active_key(mut self, key: impl Into<PaneKey>) -> Self {
        self.set_active_key(Some(key.into()));
        self
    }

    /// Initial selection for uncontrolled mode. Ignored when controlled.
    #[must_use]
    pub fn default_active_key(mut self, key: impl Into<PaneKey>) -> Self {
        if !self.controller.mode().is_controlled() {
            self.controller =
                TabController::new(ActivationMode::Uncontrolled, Some(key.into()), &self.registry);
            self.sync_visited();
        }
        self
    }

    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(&PaneKey) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_tab_click(mut self, handler: impl FnMut(&PaneKey, &Event) + 'static) -> Self {
        self.on_tab_click = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_edit(mut self, handler: impl FnMut(EditAction, &EditIntent) + 'static) -> Self {
        self.on_edit = Some(Box::new(handler));
        self
    }

    /// Replace the built-in tab bar.
    #[must_use]
    pub fn renderer(mut self, renderer: impl TabBarRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    // --- Queries ---

    /// The resolved active key.
    #[must_use]
    pub fn active(&self) -> Option<&PaneKey> {
        self.controller.active_key()
    }

    #[must_use]
    pub fn focused_key(&self) -> Option<&PaneKey> {
        self.controller.focused_key()
    }

    #[must_use]
    pub fn registry(&self) -> &PaneRegistry {
        &self.registry
    }

    #[must_use]
    pub fn controller(&self) -> &TabController {
        &self.controller
    }

    #[must_use]
    pub fn settings(&self) -> &TabsConfig {
        &self.config
    }

    /// Normalized animation switches.
    #[must_use]
    pub fn animated(&self) -> &AnimatedFlags {
        &self.animated
    }

    /// Configuration problems found by the last [`Tabs::set_config`].
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn strip_state(&self) -> &StripState {
        &self.strip
    }

    /// Layout from the last [`Tabs::layout`] or [`Tabs::render`].
    #[must_use]
    pub fn last_layout(&self) -> &StripLayout {
        &self.layout
    }

    // --- Host updates ---

    /// Replace the pane list.
    ///
    /// Returns `true` if the active key moved. Never fires `on_change`.
    pub fn set_panes(&mut self, panes: impl IntoIterator<Item = PaneSpec>) -> bool {
        self.set_registry(PaneRegistry::normalize(panes))
    }

    /// Replace the pane list with an already normalized registry.
    pub fn set_registry(&mut self, registry: PaneRegistry) -> bool {
        self.registry = registry;
        let moved = self.controller.registry_changed(&self.registry);
        self.visited.retain(&self.registry);
        if moved {
            self.strip.follow();
        }
        self.sync_visited();
        moved
    }

    /// `Some` puts the widget in controlled mode on that key; `None` returns
    /// control to the widget.
    ///
    /// Returns `true` if the active key moved. Never fires `on_change`.
    pub fn set_active_key(&mut self, key: Option<PaneKey>) -> bool {
        let mode = key.map_or(ActivationMode::Uncontrolled, ActivationMode::Controlled);
        let moved = self.controller.set_mode(mode, &self.registry);
        if moved {
            self.strip.follow();
        }
        self.sync_visited();
        moved
    }

    /// Replace the configuration, re-deriving animation switches and edit
    /// controls.
    pub fn set_config(&mut self, config: TabsConfig) {
        self.apply_config(config);
    }

    // --- User input ---

    /// Pointer activation of the tab for `key`.
    pub fn click_tab(&mut self, key: &str, event: Event) -> ActivateOutcome {
        let outcome = self
            .controller
            .activate(key, ActivationTrigger::Pointer, &self.registry);
        self.dispatch(&outcome, &event);
        outcome
    }

    /// Keyboard input routed to the strip.
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        let outcome = self.controller.handle_key(
            key,
            &self.registry,
            &self.edit,
            self.config.position,
        );
        match &outcome {
            KeyOutcome::Activated(activated) => self.dispatch(activated, &Event::Key(*key)),
            KeyOutcome::FocusMoved(request) => self.strip.ensure_visible(request.index),
            KeyOutcome::Edit(intent) => self.emit_edit(intent),
            KeyOutcome::Ignored => {}
        }
        outcome
    }

    /// Focus moved onto the tab for `key`.
    pub fn focus_tab(&mut self, key: &str) -> Option<ScrollRequest> {
        let request = self.controller.focus(key, &self.registry)?;
        self.strip.ensure_visible(request.index);
        Some(request)
    }

    /// Focus left the strip.
    pub fn blur(&mut self) {
        self.controller.blur();
    }

    /// Click on the add control.
    pub fn click_add(&mut self, event: Event) -> Option<EditIntent> {
        let intent = self.edit.request_add(event)?;
        self.emit_edit(&intent);
        Some(intent)
    }

    /// Click on the remove control of `key`.
    pub fn click_remove(&mut self, key: &str, event: Event) -> Option<EditIntent> {
        let intent = self.edit.request_remove(key, event, &self.registry)?;
        self.emit_edit(&intent);
        Some(intent)
    }

    /// Pointer input, hit-tested against the last layout.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> TabsAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(hit) = self.layout.hit_test(mouse.x, mouse.y).cloned() else {
                    return TabsAction::Ignored;
                };
                let event = Event::Mouse(*mouse);
                match hit {
                    StripHit::Tab(key) => TabsAction::Tab(self.click_tab(key.as_str(), event)),
                    StripHit::Remove(key) => self
                        .click_remove(key.as_str(), event)
                        .map_or(TabsAction::Ignored, TabsAction::Edit),
                    StripHit::Add => self
                        .click_add(event)
                        .map_or(TabsAction::Ignored, TabsAction::Edit),
                    StripHit::ScrollBack => Self::scrolled(self.strip.scroll_back()),
                    StripHit::ScrollForward => {
                        let moved = self.strip.scroll_forward(self.registry.len());
                        Self::scrolled(moved)
                    }
                }
            }
            MouseEventKind::ScrollUp if self.layout.area.contains(mouse.x, mouse.y) => {
                Self::scrolled(self.strip.scroll_back())
            }
            MouseEventKind::ScrollDown if self.layout.area.contains(mouse.x, mouse.y) => {
                let moved = self.strip.scroll_forward(self.registry.len());
                Self::scrolled(moved)
            }
            _ => TabsAction::Ignored,
        }
    }

    // --- Output ---

    /// Split `area` into the strip and the content region.
    #[must_use]
    pub fn split(&self, area: Rect) -> (Rect, Rect) {
        match self.config.position {
            TabPosition::Top | TabPosition::Bottom => {
                let bar_h = area.height.min(2);
                let content_h = area.height - bar_h;
                if self.config.position == TabPosition::Top {
                    (
                        Rect::new(area.x, area.y, area.width, bar_h),
                        Rect::new(area.x, area.y + bar_h, area.width, content_h),
                    )
                } else {
                    (
                        Rect::new(area.x, area.y + content_h, area.width, bar_h),
                        Rect::new(area.x, area.y, area.width, content_h),
                    )
                }
            }
            TabPosition::Left | TabPosition::Right => {
                let widest = self
                    .registry
                    .iter()
                    .map(|pane| {
                        let glyph = if self.edit.shows_remove(pane) {
                            display_width(self.edit.remove_glyph(pane)) + 1
                        } else {
                            0
                        };
                        display_width(pane.label()) + glyph + 2
                    })
                    .max()
                    .unwrap_or(0);
                let bar_w = cell_span(widest).min(area.width);
                let content_w = area.width - bar_w;
                if self.config.position == TabPosition::Left {
                    (
                        Rect::new(area.x, area.y, bar_w, area.height),
                        Rect::new(area.x + bar_w, area.y, content_w, area.height),
                    )
                } else {
                    (
                        Rect::new(area.x + content_w, area.y, bar_w, area.height),
                        Rect::new(area.x, area.y, content_w, area.height),
                    )
                }
            }
        }
    }

    /// Lay out the strip inside `area` and keep the result for hit testing.
    pub fn layout(&mut self, area: Rect) -> &StripLayout {
        self.layout = StripLayout::compute(
            StripInput {
                registry: &self.registry,
                active: self.controller.active_key(),
                focused: self.controller.focused_key(),
                edit: &self.edit,
                config: &self.config,
            },
            area,
            &mut self.strip,
        );
        &self.layout
    }

    /// Lay out and draw one frame into `area`.
    pub fn render(&mut self, area: Rect) -> TabsView<'_> {
        let (bar_area, content_area) = self.split(area);
        self.layout(bar_area);

        let props = TabBarProps {
            panes: &self.registry,
            active_key: self.controller.active_key(),
            focused_key: self.controller.focused_key(),
            position: self.config.position,
            layout: &self.layout,
            animated: &self.animated,
            bar_style: self.config.bar_style.as_deref(),
        };
        let bar = match &self.renderer {
            Some(renderer) => renderer.render(&props, &DefaultTabBar),
            None => DefaultTabBar.draw(&props),
        };
        let panels = PanelList::build(
            &self.registry,
            self.controller.active_key(),
            &self.visited,
            self.config.destroy_inactive,
        )
        .with_motion(self.animated.motion.as_ref());

        TabsView {
            bar_area,
            content_area,
            bar,
            panels,
        }
    }

    fn apply_config(&mut self, config: TabsConfig) {
        let (animated, diagnostic) = config.animated.normalize();
        self.animated = animated;
        self.diagnostics = diagnostic.into_iter().collect();
        self.edit = EditController::new(config.editable.clone());
        self.config = config;
    }

    fn dispatch(&mut self, outcome: &ActivateOutcome, event: &Event) {
        if let Some(key) = outcome.clicked_key()
            && let Some(handler) = self.on_tab_click.as_mut()
        {
            handler(key, event);
        }
        if let Some(key) = outcome.changed_key() {
            self.strip.follow();
            self.sync_visited();
            if let Some(handler) = self.on_change.as_mut() {
                handler(key);
            }
        }
    }

    fn emit_edit(&mut self, intent: &EditIntent) {
        if let Some(handler) = self.on_edit.as_mut() {
            handler(intent.action, intent);
        }
    }

    fn scrolled(moved: bool) -> TabsAction {
        if moved {
            TabsAction::Scrolled
        } else {
            TabsAction::Ignored
        }
    }

    fn sync_visited(&mut self) {
        if let Some(key) = self.controller.active_key() {
            self.visited.mark(key);
        }
    }
}
