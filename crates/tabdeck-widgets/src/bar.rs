#![forbid(unsafe_code)]

//! Tab bar rendering seam.
//!
//! The widget hands every [`TabBarRenderer`] the same props the built-in bar
//! uses, plus the built-in bar itself, so a custom renderer can wrap, decorate
//! or replace it. Whatever the renderer draws, clicks still go through the
//! widget's strip hit regions, so activation and editing behave the same.

use crate::animated::AnimatedFlags;
use crate::config::TabPosition;
use crate::pane::{PaneKey, PaneRegistry};
use crate::strip::{StripItem, StripLayout};

/// Everything needed to draw the tab bar.
#[derive(Debug, Clone, Copy)]
pub struct TabBarProps<'a> {
    /// Full pane list, including panes scrolled out of view.
    pub panes: &'a PaneRegistry,
    pub active_key: Option<&'a PaneKey>,
    pub focused_key: Option<&'a PaneKey>,
    pub position: TabPosition,
    /// Placement computed for this frame.
    pub layout: &'a StripLayout,
    pub animated: &'a AnimatedFlags,
    /// Style class from the config, for renderers that understand it.
    pub bar_style: Option<&'a str>,
}

/// Draws the tab bar as one string per row.
pub trait TabBarRenderer {
    fn render(&self, props: &TabBarProps<'_>, default: &DefaultTabBar) -> Vec<String>;
}

impl<F> TabBarRenderer for F
where
    F: Fn(&TabBarProps<'_>, &DefaultTabBar) -> Vec<String>,
{
    fn render(&self, props: &TabBarProps<'_>, default: &DefaultTabBar) -> Vec<String> {
        self(props, default)
    }
}

/// Built-in tab bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultTabBar;

impl DefaultTabBar {
    /// Draw the strip as laid out.
    #[must_use]
    pub fn draw(&self, props: &TabBarProps<'_>) -> Vec<String> {
        props.layout.render_lines()
    }

    /// Draw the strip, passing each tab node through `wrap`.
    pub fn draw_with(
        &self,
        props: &TabBarProps<'_>,
        wrap: impl Fn(&StripItem, &str) -> String,
    ) -> Vec<String> {
        props.layout.render_lines_with(wrap)
    }
}

impl TabBarRenderer for DefaultTabBar {
    fn render(&self, props: &TabBarProps<'_>, _default: &DefaultTabBar) -> Vec<String> {
        self.draw(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TabsConfig;
    use crate::edit::EditController;
    use crate::pane::Pane;
    use crate::strip::{StripInput, StripState};
    use tabdeck_core::geometry::Rect;

    fn fixture() -> (PaneRegistry, StripLayout) {
        let reg = PaneRegistry::from_panes([Pane::new("a", "A"), Pane::new("b", "B")]);
        let active = PaneKey::from("a");
        let layout = StripLayout::compute(
            StripInput {
                registry: &reg,
                active: Some(&active),
                focused: None,
                edit: &EditController::default(),
                config: &TabsConfig::default(),
            },
            Rect::new(0, 0, 12, 1),
            &mut StripState::default(),
        );
        (reg, layout)
    }

    #[test]
    fn default_renderer_draws_layout() {
        let (reg, layout) = fixture();
        let active = PaneKey::from("a");
        let flags = AnimatedFlags::default();
        let props = TabBarProps {
            panes: &reg,
            active_key: Some(&active),
            focused_key: None,
            position: TabPosition::Top,
            layout: &layout,
            animated: &flags,
            bar_style: None,
        };
        let lines = DefaultTabBar.render(&props, &DefaultTabBar);
        assert_eq!(lines, layout.render_lines());
    }

    #[test]
    fn function_renderer_can_wrap_default() {
        let (reg, layout) = fixture();
        let flags = AnimatedFlags::default();
        let props = TabBarProps {
            panes: &reg,
            active_key: None,
            focused_key: None,
            position: TabPosition::Top,
            layout: &layout,
            animated: &flags,
            bar_style: Some("dense"),
        };
        fn styled(props: &TabBarProps<'_>, default: &DefaultTabBar) -> Vec<String> {
            let mut lines = default.draw(props);
            if let Some(style) = props.bar_style {
                lines.push(format!("style={style} tabs={}", props.panes.len()));
            }
            lines
        }
        let lines = styled.render(&props, &DefaultTabBar);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "style=dense tabs=2");
    }
}
