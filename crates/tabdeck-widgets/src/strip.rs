#![forbid(unsafe_code)]

//! Tab strip layout.
//!
//! Places tab nodes, separators, the add control, edge content and overflow
//! markers inside an area, and keeps the scroll offset that decides which
//! tabs are visible when they do not all fit.
//!
//! Layout is pure with respect to the registry: it reads the pane list and
//! the resolved active key and never changes activation. The only state it
//! owns is [`StripState`].
//!
//! # Invariants
//!
//! - At least one tab is visible whenever the registry is non-empty and the
//!   strip has room on its main axis (an oversized tab is clipped).
//! - The anchor tab (focused, else active) is inside the visible range,
//!   unless the strip was scrolled by hand since the anchor last moved.
//! - Remove hit regions are registered before their tab's region, so a click
//!   on the glyph never counts as a tab activation.

use tabdeck_core::geometry::Rect;
use tabdeck_core::text::{cell_span, clip_to_width, display_width};

use crate::config::{TabPosition, TabsConfig};
use crate::edit::EditController;
use crate::pane::{Pane, PaneKey, PaneRegistry};

const INK_BAR: &str = "─";

/// Scroll state of the strip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripState {
    /// First visible tab index.
    pub offset: usize,
    /// Scrolled by hand; layout stops chasing the anchor tab.
    manual: bool,
}

impl StripState {
    /// Make sure `index` is not scrolled off the leading edge, and follow the
    /// anchor tab again.
    ///
    /// The trailing edge is handled during layout, where tab sizes are known.
    pub fn ensure_visible(&mut self, index: usize) {
        self.manual = false;
        if index < self.offset {
            self.offset = index;
        }
    }

    /// Follow the anchor tab again without moving.
    pub fn follow(&mut self) {
        self.manual = false;
    }

    #[must_use]
    pub const fn is_manual(&self) -> bool {
        self.manual
    }

    /// Scroll one tab toward the start.
    pub fn scroll_back(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        self.offset -= 1;
        self.manual = true;
        true
    }

    /// Scroll one tab toward the end.
    pub fn scroll_forward(&mut self, tab_count: usize) -> bool {
        if self.offset + 1 >= tab_count {
            return false;
        }
        self.offset += 1;
        self.manual = true;
        true
    }
}

/// What a point in the strip refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripHit {
    /// A tab control.
    Tab(PaneKey),
    /// The remove control inside a tab.
    Remove(PaneKey),
    /// The add control.
    Add,
    /// Leading overflow marker.
    ScrollBack,
    /// Trailing overflow marker.
    ScrollForward,
}

/// A laid-out tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripItem {
    pub key: PaneKey,
    /// Display index in the registry.
    pub index: usize,
    pub rect: Rect,
    /// Node text, including brackets and remove glyph.
    pub text: String,
    pub active: bool,
    pub focused: bool,
    pub disabled: bool,
    /// Remove glyph cells, when the pane has a remove control.
    pub remove: Option<Rect>,
}

/// What a segment of text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Tab node; the value indexes [`StripLayout::items`].
    Tab(usize),
    Separator,
    Add,
    ExtraLeft,
    ExtraRight,
    Marker,
    InkBar,
}

/// Positioned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub rect: Rect,
    pub text: String,
}

/// Borrowed inputs for a layout pass.
#[derive(Debug, Clone, Copy)]
pub struct StripInput<'a> {
    pub registry: &'a PaneRegistry,
    pub active: Option<&'a PaneKey>,
    pub focused: Option<&'a PaneKey>,
    pub edit: &'a EditController,
    pub config: &'a TabsConfig,
}

/// Result of a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripLayout {
    pub area: Rect,
    pub position: TabPosition,
    /// Visible tabs in display order.
    pub items: Vec<StripItem>,
    pub segments: Vec<Segment>,
    /// Registry index range `[start, end)` that is visible.
    pub visible: (usize, usize),
    pub overflow_left: bool,
    pub overflow_right: bool,
    /// Where the active tab indicator sits, if the active tab is visible.
    pub indicator: Option<Rect>,
    pub add: Option<Rect>,
    hits: Vec<(Rect, StripHit)>,
}

impl StripLayout {
    /// Lay out the strip for `input` inside `area`.
    pub fn compute(input: StripInput<'_>, area: Rect, state: &mut StripState) -> Self {
        let _span = tracing::debug_span!(
            "tabs.layout",
            tab_count = input.registry.len(),
            width = area.width,
            height = area.height
        )
        .entered();

        let mut layout = Self {
            area,
            position: input.config.position,
            ..Self::default()
        };
        if area.is_empty() {
            state.offset = 0;
            return layout;
        }
        if input.config.position.is_vertical() {
            layout.compute_vertical(input, state);
        } else {
            layout.compute_horizontal(input, state);
        }
        tracing::trace!(
            message = "tabs.layout.done",
            start = layout.visible.0,
            end = layout.visible.1,
            overflow = layout.overflow_left || layout.overflow_right
        );
        layout
    }

    /// What is under `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&StripHit> {
        self.hits
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, hit)| hit)
    }

    /// Visible item for `key`.
    #[must_use]
    pub fn item(&self, key: &str) -> Option<&StripItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Number of visible tabs drawn as active (0 or 1).
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| item.active).count()
    }

    /// Render one string per row of the area.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        self.render_lines_with(|_, text| text.to_owned())
    }

    /// Render, letting `wrap` rewrite each tab node's text.
    ///
    /// Wrapped text is clipped to the node's cells.
    pub fn render_lines_with(&self, wrap: impl Fn(&StripItem, &str) -> String) -> Vec<String> {
        let mut rows: Vec<Vec<(u16, u16, String)>> = vec![Vec::new(); self.area.height as usize];
        for seg in &self.segments {
            let Some(row) = seg.rect.y.checked_sub(self.area.y) else {
                continue;
            };
            let Some(cells) = rows.get_mut(row as usize) else {
                continue;
            };
            let text = match seg.kind {
                SegmentKind::Tab(idx) => wrap(&self.items[idx], &seg.text),
                _ => seg.text.clone(),
            };
            cells.push((seg.rect.x, seg.rect.width, text));
        }
        rows.into_iter()
            .map(|mut cells| {
                cells.sort_by_key(|(x, _, _)| *x);
                let mut line = String::new();
                let mut col = self.area.x;
                for (x, width, text) in cells {
                    if x < col {
                        continue;
                    }
                    line.extend(std::iter::repeat_n(' ', (x - col) as usize));
                    let clipped = clip_to_width(&text, width as usize);
                    line.push_str(clipped);
                    col = x.saturating_add(cell_span(display_width(clipped)));
                }
                let end = self.area.right();
                if col < end {
                    line.extend(std::iter::repeat_n(' ', (end - col) as usize));
                }
                line
            })
            .collect()
    }

    fn push(&mut self, kind: SegmentKind, rect: Rect, text: impl Into<String>) {
        self.segments.push(Segment {
            kind,
            rect,
            text: text.into(),
        });
    }

    fn place_item(&mut self, input: &StripInput<'_>, index: usize, rect: Rect) {
        let pane = &input.registry.as_slice()[index];
        let active = input.active.is_some_and(|k| k == pane.key());
        let focused = input.focused.is_some_and(|k| k == pane.key());
        let glyph = remove_glyph(input.edit, pane);
        let text = tab_label(pane, active, glyph);
        let remove = glyph.map(|g| {
            let gw = cell_span(display_width(g));
            // Glyph sits just before the closing bracket/padding cell.
            let gx = rect
                .x
                .saturating_add(cell_span(display_width(&text)).saturating_sub(1 + gw));
            Rect::new(gx, rect.y, gw.min(rect.width), 1)
        });
        if let Some(remove) = remove
            && remove.x < rect.right()
        {
            self.hits.push((remove, StripHit::Remove(pane.key().clone())));
        }
        self.hits.push((rect, StripHit::Tab(pane.key().clone())));
        let item_idx = self.items.len();
        self.push(SegmentKind::Tab(item_idx), rect, text.clone());
        self.items.push(StripItem {
            key: pane.key().clone(),
            index,
            rect,
            text,
            active,
            focused,
            disabled: pane.is_disabled(),
            remove,
        });
    }

    fn compute_horizontal(&mut self, input: StripInput<'_>, state: &mut StripState) {
        let area = self.area;
        let config = input.config;
        let y = if config.position == TabPosition::Bottom && area.height > 1 {
            area.bottom() - 1
        } else {
            area.y
        };

        let extra_left = non_empty(config.extra.left.as_deref());
        let extra_right = non_empty(config.extra.right.as_deref());
        let add_text = input
            .edit
            .shows_add()
            .then(|| format!(" {} ", input.edit.add_glyph()));

        let lw = extra_left.map_or(0, display_width);
        let rw = extra_right.map_or(0, display_width);
        let aw = add_text.as_deref().map_or(0, display_width);

        if let Some(text) = extra_left {
            self.push(
                SegmentKind::ExtraLeft,
                Rect::new(area.x, y, cell_span(lw).min(area.width), 1),
                text,
            );
        }
        if let Some(text) = extra_right {
            let x = area.right().saturating_sub(cell_span(rw)).max(area.x);
            self.push(SegmentKind::ExtraRight, Rect::new(x, y, cell_span(rw), 1), text);
        }

        let region_x = area.x.saturating_add(cell_span(lw));
        let region_len = (area.width as usize).saturating_sub(lw + rw + aw);

        if let Some(text) = add_text {
            let x = region_x.saturating_add(cell_span(region_len));
            let rect = Rect::new(x, y, cell_span(aw), 1);
            self.add = Some(rect);
            self.hits.push((rect, StripHit::Add));
            self.push(SegmentKind::Add, rect, text);
        }

        let registry = input.registry;
        if registry.is_empty() || region_len == 0 {
            state.offset = 0;
            return;
        }

        let sizes: Vec<usize> = registry
            .iter()
            .map(|pane| {
                let active = input.active.is_some_and(|k| k == pane.key());
                display_width(&tab_label(pane, active, remove_glyph(input.edit, pane)))
            })
            .collect();
        let sep_w = display_width(&config.separator);
        let gutter = config.gutter.unwrap_or(0) as usize;
        let spacing = sep_w + gutter;
        let anchor = anchor_index(&input, state);

        let range = visible_range(&sizes, spacing, state, anchor, region_len, 1, 1);
        self.visible = (range.start, range.end);
        self.overflow_left = range.overflow_left;
        self.overflow_right = range.overflow_right;

        let region_end = region_x.saturating_add(cell_span(region_len));
        let mut x = region_x;
        let mut right = region_end;
        if range.overflow_left {
            let rect = Rect::new(x, y, 1, 1);
            self.hits.push((rect, StripHit::ScrollBack));
            self.push(SegmentKind::Marker, rect, "<");
            x = x.saturating_add(1);
        }
        if range.overflow_right {
            right = right.saturating_sub(1);
            let rect = Rect::new(right, y, 1, 1);
            self.hits.push((rect, StripHit::ScrollForward));
            self.push(SegmentKind::Marker, rect, ">");
        }

        for idx in range.start..range.end {
            if x >= right {
                break;
            }
            if idx > range.start {
                if sep_w > 0 {
                    let w = cell_span(sep_w).min(right - x);
                    self.push(
                        SegmentKind::Separator,
                        Rect::new(x, y, w, 1),
                        config.separator.clone(),
                    );
                }
                x = x.saturating_add(cell_span(spacing));
                if x >= right {
                    break;
                }
            }
            let w = cell_span(sizes[idx]).min(right - x);
            let rect = Rect::new(x, y, w, 1);
            self.place_item(&input, idx, rect);
            x = x.saturating_add(w);
        }

        if let Some(active) = self.items.iter().find(|item| item.active).map(|item| item.rect) {
            let bar_y = if area.height < 2 {
                y
            } else if config.position == TabPosition::Bottom {
                y - 1
            } else {
                y + 1
            };
            let rect = Rect::new(active.x, bar_y, active.width, 1);
            self.indicator = Some(rect);
            if bar_y != y {
                self.push(
                    SegmentKind::InkBar,
                    rect,
                    INK_BAR.repeat(rect.width as usize),
                );
            }
        }
    }

    fn compute_vertical(&mut self, input: StripInput<'_>, state: &mut StripState) {
        let area = self.area;
        let config = input.config;
        let width = area.width;

        let extra_left = non_empty(config.extra.left.as_deref());
        let extra_right = non_empty(config.extra.right.as_deref());
        let add_text = input
            .edit
            .shows_add()
            .then(|| format!(" {} ", input.edit.add_glyph()));

        let mut top = area.y;
        let mut bottom = area.bottom();
        if let Some(text) = extra_left {
            self.push(SegmentKind::ExtraLeft, Rect::new(area.x, top, width, 1), text);
            top = top.saturating_add(1);
        }
        if let Some(text) = extra_right
            && bottom > top
        {
            bottom -= 1;
            self.push(SegmentKind::ExtraRight, Rect::new(area.x, bottom, width, 1), text);
        }
        if let Some(text) = add_text
            && bottom > top
        {
            bottom -= 1;
            let rect = Rect::new(area.x, bottom, width, 1);
            self.add = Some(rect);
            self.hits.push((rect, StripHit::Add));
            self.push(SegmentKind::Add, rect, text);
        }

        let registry = input.registry;
        let region_len = bottom.saturating_sub(top) as usize;
        if registry.is_empty() || region_len == 0 {
            state.offset = 0;
            return;
        }

        let sizes = vec![1usize; registry.len()];
        let spacing = config.gutter.unwrap_or(0) as usize;
        let anchor = anchor_index(&input, state);
        let range = visible_range(&sizes, spacing, state, anchor, region_len, 1, 1);
        self.visible = (range.start, range.end);
        self.overflow_left = range.overflow_left;
        self.overflow_right = range.overflow_right;

        let mut y = top;
        if range.overflow_left {
            let rect = Rect::new(area.x, y, width, 1);
            self.hits.push((rect, StripHit::ScrollBack));
            self.push(SegmentKind::Marker, rect, "^");
            y = y.saturating_add(1);
        }
        if range.overflow_right {
            bottom = bottom.saturating_sub(1);
            let rect = Rect::new(area.x, bottom, width, 1);
            self.hits.push((rect, StripHit::ScrollForward));
            self.push(SegmentKind::Marker, rect, "v");
        }

        for idx in range.start..range.end {
            if idx > range.start {
                y = y.saturating_add(cell_span(spacing));
            }
            if y >= bottom {
                break;
            }
            self.place_item(&input, idx, Rect::new(area.x, y, width, 1));
            y = y.saturating_add(1);
        }

        self.indicator = self.items.iter().find(|item| item.active).map(|item| {
            let x = if config.position == TabPosition::Right {
                item.rect.x
            } else {
                item.rect.right().saturating_sub(1)
            };
            Rect::new(x, item.rect.y, 1, 1)
        });
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

fn remove_glyph<'a>(edit: &'a EditController, pane: &'a Pane) -> Option<&'a str> {
    edit.shows_remove(pane).then(|| edit.remove_glyph(pane))
}

fn anchor_index(input: &StripInput<'_>, state: &StripState) -> Option<usize> {
    if state.manual {
        return None;
    }
    input
        .focused
        .or(input.active)
        .and_then(|key| input.registry.position(key.as_str()))
}

/// Node text: `[label x]` when active, ` label x ` otherwise.
fn tab_label(pane: &Pane, active: bool, remove: Option<&str>) -> String {
    let mut out = String::new();
    out.push(if active { '[' } else { ' ' });
    out.push_str(pane.label());
    if let Some(glyph) = remove {
        out.push(' ');
        out.push_str(glyph);
    }
    out.push(if active { ']' } else { ' ' });
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct VisibleRange {
    start: usize,
    end: usize,
    overflow_left: bool,
    overflow_right: bool,
}

/// Index one past the last tab that fits when starting at `offset`.
///
/// Always admits at least one tab; an oversized tab is clipped when drawn.
fn visible_end(sizes: &[usize], spacing: usize, offset: usize, length: usize) -> usize {
    if sizes.is_empty() || length == 0 {
        return offset;
    }
    let mut used = 0usize;
    let mut end = offset;
    for (idx, &w) in sizes.iter().enumerate().skip(offset) {
        if end == offset {
            used = w;
            end = idx + 1;
            if used > length {
                break;
            }
            continue;
        }
        if used.saturating_add(spacing).saturating_add(w) > length {
            break;
        }
        used = used.saturating_add(spacing).saturating_add(w);
        end = idx + 1;
    }
    end.max((offset + 1).min(sizes.len()))
}

fn visible_range(
    sizes: &[usize],
    spacing: usize,
    state: &mut StripState,
    anchor: Option<usize>,
    length: usize,
    lead_marker: usize,
    trail_marker: usize,
) -> VisibleRange {
    if sizes.is_empty() || length == 0 {
        state.offset = 0;
        return VisibleRange::default();
    }
    state.offset = state.offset.min(sizes.len() - 1);
    if let Some(anchor) = anchor {
        state.ensure_visible(anchor);
    }

    let mut available = length;
    let mut end = visible_end(sizes, spacing, state.offset, available);
    if let Some(anchor) = anchor
        && anchor >= end
    {
        state.offset = anchor;
        end = visible_end(sizes, spacing, state.offset, available);
    }

    // Markers eat into the space, which can change what fits.
    for _ in 0..3 {
        let mut next = length;
        if state.offset > 0 {
            next = next.saturating_sub(lead_marker);
        }
        if end < sizes.len() {
            next = next.saturating_sub(trail_marker);
        }
        if next == available {
            break;
        }
        available = next;
        end = visible_end(sizes, spacing, state.offset, available);
        if let Some(anchor) = anchor
            && anchor >= end
        {
            state.offset = anchor;
            end = visible_end(sizes, spacing, state.offset, available);
        }
    }

    VisibleRange {
        start: state.offset,
        end,
        overflow_left: state.offset > 0,
        overflow_right: end < sizes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TabBarExtra;
    use crate::edit::EditConfig;

    fn registry(n: usize) -> PaneRegistry {
        PaneRegistry::from_panes((0..n).map(|i| Pane::new(format!("t{i}"), format!("Tab{i}"))))
    }

    fn layout_with(
        reg: &PaneRegistry,
        active: Option<&str>,
        edit: &EditController,
        config: &TabsConfig,
        area: Rect,
        state: &mut StripState,
    ) -> StripLayout {
        let active = active.map(PaneKey::from);
        StripLayout::compute(
            StripInput {
                registry: reg,
                active: active.as_ref(),
                focused: None,
                edit,
                config,
            },
            area,
            state,
        )
    }

    fn simple(reg: &PaneRegistry, active: Option<&str>, width: u16) -> StripLayout {
        let mut state = StripState::default();
        layout_with(
            reg,
            active,
            &EditController::default(),
            &TabsConfig::default(),
            Rect::new(0, 0, width, 1),
            &mut state,
        )
    }

    #[test]
    fn active_tab_is_bracketed() {
        let reg = PaneRegistry::from_panes([
            Pane::new("a", "A"),
            Pane::new("b", "B"),
            Pane::new("c", "C"),
        ]);
        let layout = simple(&reg, Some("b"), 30);
        let row = &layout.render_lines()[0];
        assert!(row.contains("[B]"), "{row:?}");
        assert!(row.contains(" A "));
        assert!(row.contains(" C "));
        assert_eq!(layout.active_count(), 1);
    }

    #[test]
    fn no_active_key_means_no_indicator() {
        let reg = registry(2);
        let layout = simple(&reg, None, 30);
        assert_eq!(layout.active_count(), 0);
        assert!(layout.indicator.is_none());
    }

    #[test]
    fn empty_registry_renders_blank() {
        let layout = simple(&PaneRegistry::new(), None, 20);
        assert!(layout.items.is_empty());
        assert_eq!(layout.render_lines()[0].trim(), "");
    }

    #[test]
    fn zero_area_lays_out_nothing() {
        let reg = registry(3);
        let mut state = StripState {
            offset: 2,
            ..StripState::default()
        };
        let layout = layout_with(
            &reg,
            Some("t0"),
            &EditController::default(),
            &TabsConfig::default(),
            Rect::new(0, 0, 0, 1),
            &mut state,
        );
        assert!(layout.items.is_empty());
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn overflow_markers_when_tabs_do_not_fit() {
        let reg = registry(8);
        let mut state = StripState::default();
        let edit = EditController::default();
        let config = TabsConfig::default();
        let area = Rect::new(0, 0, 12, 1);
        let layout = layout_with(&reg, Some("t0"), &edit, &config, area, &mut state);
        assert!(layout.overflow_right);
        assert!(!layout.overflow_left);
        assert!(layout.render_lines()[0].ends_with('>'));

        let layout = layout_with(&reg, Some("t7"), &edit, &config, area, &mut state);
        assert!(layout.overflow_left);
        assert!(layout.render_lines()[0].starts_with('<'));
        assert!(layout.item("t7").is_some(), "active tab scrolled into view");
    }

    #[test]
    fn overflow_both_sides_for_middle_tab() {
        let reg = registry(10);
        let mut state = StripState::default();
        let layout = layout_with(
            &reg,
            Some("t5"),
            &EditController::default(),
            &TabsConfig::default(),
            Rect::new(0, 0, 15, 1),
            &mut state,
        );
        let row = &layout.render_lines()[0];
        assert!(row.starts_with('<'), "{row:?}");
        assert!(row.trim_end().ends_with('>'), "{row:?}");
    }

    #[test]
    fn focused_tab_is_anchor() {
        let reg = registry(10);
        let mut state = StripState::default();
        let active = PaneKey::from("t0");
        let focused = PaneKey::from("t9");
        let edit = EditController::default();
        let config = TabsConfig::default();
        let layout = StripLayout::compute(
            StripInput {
                registry: &reg,
                active: Some(&active),
                focused: Some(&focused),
                edit: &edit,
                config: &config,
            },
            Rect::new(0, 0, 14, 1),
            &mut state,
        );
        let item = layout.item("t9").expect("focused visible");
        assert!(item.focused);
        assert!(layout.item("t0").is_none());
    }

    #[test]
    fn gutter_spaces_every_tab_but_first() {
        let reg = PaneRegistry::from_panes([Pane::new("a", "A"), Pane::new("b", "B")]);
        let config = TabsConfig {
            gutter: Some(3),
            ..TabsConfig::default()
        };
        let mut state = StripState::default();
        let layout = layout_with(
            &reg,
            Some("a"),
            &EditController::default(),
            &config,
            Rect::new(0, 0, 30, 1),
            &mut state,
        );
        let a = layout.item("a").expect("a");
        let b = layout.item("b").expect("b");
        assert_eq!(a.rect.x, 0);
        // "[A]" is 3 wide, separator 1, gutter 3.
        assert_eq!(b.rect.x, 3 + 1 + 3);
    }

    #[test]
    fn vertical_gutter_spaces_rows() {
        let reg = PaneRegistry::from_panes([Pane::new("a", "A"), Pane::new("b", "B")]);
        let config = TabsConfig {
            gutter: Some(2),
            position: TabPosition::Right,
            ..TabsConfig::default()
        };
        let mut state = StripState::default();
        let layout = layout_with(
            &reg,
            Some("a"),
            &EditController::default(),
            &config,
            Rect::new(0, 0, 8, 10),
            &mut state,
        );
        assert_eq!(layout.item("a").map(|i| i.rect.y), Some(0));
        assert_eq!(layout.item("b").map(|i| i.rect.y), Some(3));
        assert_eq!(layout.indicator, Some(Rect::new(0, 0, 1, 1)));
    }

    #[test]
    fn vertical_overflow_uses_row_markers() {
        let reg = registry(6);
        let config = TabsConfig {
            position: TabPosition::Left,
            ..TabsConfig::default()
        };
        let mut state = StripState::default();
        let layout = layout_with(
            &reg,
            Some("t5"),
            &EditController::default(),
            &config,
            Rect::new(0, 0, 8, 3),
            &mut state,
        );
        assert!(layout.overflow_left);
        assert!(layout.item("t5").is_some());
        assert_eq!(layout.render_lines()[0].trim(), "^");
    }

    #[test]
    fn remove_and_add_controls_are_hit_targets() {
        let reg = PaneRegistry::from_panes([Pane::new("light", "light"), Pane::new("b", "b")]);
        let edit = EditController::new(Some(EditConfig::default()));
        let mut state = StripState::default();
        let layout = layout_with(
            &reg,
            Some("light"),
            &edit,
            &TabsConfig::default(),
            Rect::new(0, 0, 40, 1),
            &mut state,
        );
        let item = layout.item("light").expect("light");
        assert_eq!(item.text, "[light x]");
        let remove = item.remove.expect("remove control");
        assert_eq!(
            layout.hit_test(remove.x, 0),
            Some(&StripHit::Remove("light".into()))
        );
        assert_eq!(
            layout.hit_test(item.rect.x + 1, 0),
            Some(&StripHit::Tab("light".into()))
        );
        let add = layout.add.expect("add control");
        assert_eq!(layout.hit_test(add.x + 1, 0), Some(&StripHit::Add));
    }

    #[test]
    fn hidden_add_control_is_not_laid_out() {
        let reg = registry(2);
        let edit = EditController::new(Some(EditConfig {
            show_add: false,
            ..EditConfig::default()
        }));
        let mut state = StripState::default();
        let layout = layout_with(
            &reg,
            Some("t0"),
            &edit,
            &TabsConfig::default(),
            Rect::new(0, 0, 40, 1),
            &mut state,
        );
        assert!(layout.add.is_none());
        assert!(layout.items.iter().all(|i| i.remove.is_some()));
    }

    #[test]
    fn custom_close_icon_replaces_glyph() {
        let reg = PaneRegistry::from_panes([Pane::new("light", "light").close_icon("⊗")]);
        let edit = EditController::new(Some(EditConfig::default()));
        let mut state = StripState::default();
        let layout = layout_with(
            &reg,
            Some("light"),
            &edit,
            &TabsConfig::default(),
            Rect::new(0, 0, 40, 1),
            &mut state,
        );
        let item = layout.item("light").expect("light");
        assert_eq!(item.text, "[light ⊗]");
        let remove = item.remove.expect("remove");
        assert_eq!(layout.hit_test(remove.x, 0), Some(&StripHit::Remove("light".into())));
    }

    #[test]
    fn extra_content_on_both_edges() {
        let reg = registry(1);
        let config = TabsConfig {
            extra: TabBarExtra {
                left: Some("L".into()),
                right: Some("R".into()),
            },
            ..TabsConfig::default()
        };
        let mut state = StripState::default();
        let layout = layout_with(
            &reg,
            Some("t0"),
            &EditController::default(),
            &config,
            Rect::new(0, 0, 20, 1),
            &mut state,
        );
        let row = &layout.render_lines()[0];
        assert!(row.starts_with("L[Tab0]"), "{row:?}");
        assert!(row.ends_with('R'), "{row:?}");
    }

    #[test]
    fn ink_bar_under_active_tab() {
        let reg = PaneRegistry::from_panes([Pane::new("a", "A"), Pane::new("b", "Bee")]);
        let mut state = StripState::default();
        let layout = layout_with(
            &reg,
            Some("b"),
            &EditController::default(),
            &TabsConfig::default(),
            Rect::new(0, 0, 20, 2),
            &mut state,
        );
        let lines = layout.render_lines();
        let b = layout.item("b").expect("b");
        assert_eq!(layout.indicator, Some(Rect::new(b.rect.x, 1, b.rect.width, 1)));
        assert!(lines[1].contains("─────"));
    }

    #[test]
    fn render_with_wraps_tab_nodes() {
        let reg = PaneRegistry::from_panes([Pane::new("a", "A"), Pane::new("b", "B")]);
        let layout = simple(&reg, Some("a"), 20);
        let lines = layout.render_lines_with(|item, _| {
            if item.active { "*".to_owned() } else { "-".to_owned() }
        });
        assert!(lines[0].starts_with('*'));
        assert!(lines[0].contains('-'));
    }

    #[test]
    fn scroll_state_bounds() {
        let mut state = StripState::default();
        assert!(!state.scroll_back());
        assert!(state.scroll_forward(3));
        assert!(state.scroll_forward(3));
        assert!(!state.scroll_forward(3));
        assert_eq!(state.offset, 2);
        assert!(state.is_manual());
        state.ensure_visible(0);
        assert_eq!(state.offset, 0);
        assert!(!state.is_manual());
    }

    #[test]
    fn manual_scroll_is_not_undone_by_layout() {
        let reg = registry(8);
        let edit = EditController::default();
        let config = TabsConfig::default();
        let area = Rect::new(0, 0, 12, 1);
        let mut state = StripState::default();
        layout_with(&reg, Some("t0"), &edit, &config, area, &mut state);
        assert!(state.scroll_forward(reg.len()));
        assert!(state.scroll_forward(reg.len()));
        let layout = layout_with(&reg, Some("t0"), &edit, &config, area, &mut state);
        assert_eq!(layout.visible.0, 2);
        assert!(layout.item("t0").is_none());

        state.follow();
        let layout = layout_with(&reg, Some("t0"), &edit, &config, area, &mut state);
        assert!(layout.item("t0").is_some());
    }

    #[test]
    fn label_wider_than_u16_is_clipped_to_strip() {
        let reg = PaneRegistry::from_panes([Pane::new("wide", "w".repeat(65_537))]);
        let layout = simple(&reg, Some("wide"), 20);
        let item = layout.item("wide").expect("oversized tab still shown");
        assert_eq!(item.rect.width, 20);
        assert!(layout.render_lines()[0].starts_with("[www"));
    }

    #[test]
    fn visible_end_admits_one_oversized_tab() {
        assert_eq!(visible_end(&[50, 3], 1, 0, 10), 1);
        assert_eq!(visible_end(&[3, 3, 3], 1, 0, 7), 2);
        assert_eq!(visible_end(&[], 1, 0, 7), 0);
    }
}
