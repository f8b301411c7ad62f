#![forbid(unsafe_code)]

//! Pane declarations and the normalized pane registry.
//!
//! Hosts declare panes as [`PaneSpec`] values, which may be incomplete while
//! a UI is being assembled. [`PaneRegistry::normalize`] turns a raw list into
//! an ordered snapshot of valid [`Pane`]s.
//!
//! # Invariants
//!
//! 1. Every pane in a registry has a usable key (non-blank).
//! 2. Keys are unique within a registry snapshot.
//! 3. Registry order equals declaration order (display order).
//! 4. A registry is never mutated after construction; a new declaration list
//!    produces a new registry.
//!
//! # Failure Modes
//!
//! - Entries without a usable key are skipped, not reported.
//! - When two entries share a key the later declaration wins. It replaces the
//!   earlier entry's data but keeps the earlier display slot.

use ahash::AHashMap;
use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a pane across registry updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneKey(String);

impl PaneKey {
    /// Create a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank keys cannot identify a pane.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl fmt::Display for PaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaneKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for PaneKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for PaneKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PaneKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PaneKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A validated pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    key: PaneKey,
    label: String,
    disabled: bool,
    closable: bool,
    close_icon: Option<String>,
    content: String,
    force_render: bool,
}

impl Pane {
    /// Create an enabled, closable pane with empty content.
    #[must_use]
    pub fn new(key: impl Into<PaneKey>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            disabled: false,
            closable: true,
            close_icon: None,
            content: String::new(),
            force_render: false,
        }
    }

    /// Set whether the pane is disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set whether the pane offers a remove control when editing is enabled.
    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Replace the default remove glyph for this pane.
    #[must_use]
    pub fn close_icon(mut self, icon: impl Into<String>) -> Self {
        self.close_icon = Some(icon.into());
        self
    }

    /// Set the pane body.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Keep the pane mounted even before it is first shown.
    #[must_use]
    pub fn force_render(mut self, force: bool) -> Self {
        self.force_render = force;
        self
    }

    #[must_use]
    pub fn key(&self) -> &PaneKey {
        &self.key
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub const fn is_closable(&self) -> bool {
        self.closable
    }

    #[must_use]
    pub fn close_icon_override(&self) -> Option<&str> {
        self.close_icon.as_deref()
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn is_force_render(&self) -> bool {
        self.force_render
    }

    /// Whether a remove control is offered for this pane.
    #[must_use]
    pub const fn is_removable(&self) -> bool {
        self.closable && !self.disabled
    }
}

/// A raw pane declaration, possibly malformed.
///
/// The serialized form follows the usual item shape:
/// `{ "key", "label", "children", "disabled", "closable", "closeIcon",
/// "forceRender" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaneSpec {
    pub key: Option<PaneKey>,
    pub label: Option<String>,
    pub disabled: bool,
    pub closable: Option<bool>,
    pub close_icon: Option<String>,
    #[serde(alias = "children")]
    pub content: String,
    pub force_render: bool,
}

impl PaneSpec {
    /// Declaration with a key and label.
    #[must_use]
    pub fn new(key: impl Into<PaneKey>, label: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }

    /// Set the pane body.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Validate into a [`Pane`]. `None` if the key is missing or blank.
    ///
    /// A missing label falls back to the key so the tab stays visible.
    #[must_use]
    pub fn into_pane(self) -> Option<Pane> {
        let key = self.key.filter(PaneKey::is_usable)?;
        let label = self.label.unwrap_or_else(|| key.as_str().to_owned());
        Some(Pane {
            key,
            label,
            disabled: self.disabled,
            closable: self.closable.unwrap_or(true),
            close_icon: self.close_icon,
            content: self.content,
            force_render: self.force_render,
        })
    }
}

impl From<Pane> for PaneSpec {
    fn from(pane: Pane) -> Self {
        Self {
            key: Some(pane.key),
            label: Some(pane.label),
            disabled: pane.disabled,
            closable: Some(pane.closable),
            close_icon: pane.close_icon,
            content: pane.content,
            force_render: pane.force_render,
        }
    }
}

/// Ordered, immutable snapshot of valid panes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneRegistry {
    panes: Vec<Pane>,
}

impl PaneRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw declarations into a registry.
    pub fn normalize(raw: impl IntoIterator<Item = PaneSpec>) -> Self {
        Self::collect(raw.into_iter().enumerate().filter_map(|(idx, spec)| {
            let pane = spec.into_pane();
            if pane.is_none() {
                tracing::trace!(message = "tabs.pane.skipped", index = idx);
            }
            pane
        }))
    }

    /// Build a registry from already-valid panes.
    ///
    /// Blank keys are still dropped and duplicate keys still collapse.
    pub fn from_panes(panes: impl IntoIterator<Item = Pane>) -> Self {
        Self::collect(panes.into_iter().filter(|pane| pane.key.is_usable()))
    }

    /// Normalize a JSON array of pane declarations.
    ///
    /// Array entries that are not objects, or whose fields have the wrong
    /// type, are dropped like any other malformed entry. A value that is not
    /// an array yields an empty registry.
    #[must_use]
    pub fn from_json_value(value: &serde_json::Value) -> Self {
        let Some(items) = value.as_array() else {
            return Self::new();
        };
        Self::normalize(items.iter().filter_map(|item| {
            if !item.is_object() {
                return None;
            }
            serde_json::from_value::<PaneSpec>(item.clone()).ok()
        }))
    }

    /// Parse and normalize a JSON array of pane declarations.
    pub fn from_json_str(s: &str) -> Result<Self, crate::config::ConfigError> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Ok(Self::from_json_value(&value))
    }

    fn collect(panes: impl Iterator<Item = Pane>) -> Self {
        let mut slots: AHashMap<PaneKey, usize> = AHashMap::new();
        let mut out: Vec<Pane> = Vec::new();
        for pane in panes {
            if let Some(&slot) = slots.get(&pane.key) {
                tracing::trace!(message = "tabs.pane.duplicate", key = %pane.key);
                out[slot] = pane;
            } else {
                slots.insert(pane.key.clone(), out.len());
                out.push(pane);
            }
        }
        Self { panes: out }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pane> {
        self.panes.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Pane] {
        &self.panes
    }

    /// Look up a pane by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Pane> {
        self.panes.iter().find(|pane| pane.key == key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Display index of a key.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.panes.iter().position(|pane| pane.key == key)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Pane> {
        self.panes.first()
    }

    /// First pane in display order that is not disabled.
    #[must_use]
    pub fn first_enabled(&self) -> Option<&Pane> {
        self.panes.iter().find(|pane| !pane.disabled)
    }

    /// Keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &PaneKey> {
        self.panes.iter().map(Pane::key)
    }

    /// `true` if the key exists and is disabled.
    #[must_use]
    pub fn is_disabled(&self, key: &str) -> bool {
        self.get(key).is_some_and(Pane::is_disabled)
    }

    /// `true` if the key exists and may be activated.
    #[must_use]
    pub fn is_activatable(&self, key: &str) -> bool {
        self.get(key).is_some_and(|pane| !pane.disabled)
    }

    /// `true` if the key exists and offers a remove control.
    #[must_use]
    pub fn is_removable(&self, key: &str) -> bool {
        self.get(key).is_some_and(Pane::is_removable)
    }
}

impl<'a> IntoIterator for &'a PaneRegistry {
    type Item = &'a Pane;
    type IntoIter = std::slice::Iter<'a, Pane>;

    fn into_iter(self) -> Self::IntoIter {
        self.panes.iter()
    }
}

impl FromIterator<PaneSpec> for PaneRegistry {
    fn from_iter<T: IntoIterator<Item = PaneSpec>>(iter: T) -> Self {
        Self::normalize(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(reg: &PaneRegistry) -> Vec<&str> {
        reg.keys().map(PaneKey::as_str).collect()
    }

    #[test]
    fn normalize_preserves_order() {
        let reg = PaneRegistry::normalize([
            PaneSpec::new("light", "light"),
            PaneSpec::new("bamboo", "bamboo"),
            PaneSpec::new("cute", "cute"),
        ]);
        assert_eq!(keys(&reg), ["light", "bamboo", "cute"]);
    }

    #[test]
    fn normalize_skips_missing_and_blank_keys() {
        let reg = PaneRegistry::normalize([
            PaneSpec::new("light", "light"),
            PaneSpec::default(),
            PaneSpec::new("  ", "blank"),
            PaneSpec::new("cute", "cute"),
        ]);
        assert_eq!(keys(&reg), ["light", "cute"]);
    }

    #[test]
    fn normalize_empty_input() {
        let reg = PaneRegistry::normalize(Vec::new());
        assert!(reg.is_empty());
        assert!(reg.first().is_none());
        assert!(reg.first_enabled().is_none());
    }

    #[test]
    fn duplicate_key_last_declaration_wins_in_first_slot() {
        let reg = PaneRegistry::normalize([
            PaneSpec::new("a", "first"),
            PaneSpec::new("b", "b"),
            PaneSpec::new("a", "second").disabled(true),
        ]);
        assert_eq!(keys(&reg), ["a", "b"]);
        let a = reg.get("a").expect("a");
        assert_eq!(a.label(), "second");
        assert!(a.is_disabled());
    }

    #[test]
    fn missing_label_falls_back_to_key() {
        let spec = PaneSpec {
            key: Some("light".into()),
            ..PaneSpec::default()
        };
        let pane = spec.into_pane().expect("valid");
        assert_eq!(pane.label(), "light");
        assert!(pane.is_closable());
    }

    #[test]
    fn first_enabled_skips_disabled() {
        let reg = PaneRegistry::from_panes([
            Pane::new("a", "A").disabled(true),
            Pane::new("b", "B"),
        ]);
        assert_eq!(reg.first_enabled().map(|p| p.key().as_str()), Some("b"));
        assert_eq!(reg.first().map(|p| p.key().as_str()), Some("a"));
    }

    #[test]
    fn lookup_helpers() {
        let reg = PaneRegistry::from_panes([
            Pane::new("a", "A"),
            Pane::new("b", "B").disabled(true),
            Pane::new("c", "C").closable(false),
        ]);
        assert_eq!(reg.position("c"), Some(2));
        assert!(reg.contains("b"));
        assert!(!reg.contains("z"));
        assert!(reg.is_disabled("b"));
        assert!(!reg.is_disabled("z"));
        assert!(reg.is_activatable("a"));
        assert!(!reg.is_activatable("b"));
        assert!(reg.is_removable("a"));
        assert!(!reg.is_removable("b"));
        assert!(!reg.is_removable("c"));
    }

    #[test]
    fn pane_key_compares_with_str() {
        let key = PaneKey::from("light");
        assert_eq!(key, "light");
        assert_eq!(key.to_string(), "light");
        assert!(!PaneKey::new("").is_usable());
    }

    #[test]
    fn spec_round_trips_pane_fields() {
        let pane = Pane::new("k", "K")
            .close_icon("⊗")
            .content("body")
            .force_render(true);
        let back = PaneSpec::from(pane.clone()).into_pane().expect("valid");
        assert_eq!(back, pane);
    }

    #[test]
    fn json_drops_non_object_entries() {
        let reg = PaneRegistry::from_json_str(
            r#"[{"key":"light","label":"light","children":"Light"}, "not me", 7, {"label":"no key"}]"#,
        )
        .expect("valid json");
        assert_eq!(keys(&reg), ["light"]);
        assert_eq!(reg.get("light").map(Pane::body), Some("Light"));
    }

    #[test]
    fn json_null_is_empty_registry() {
        let reg = PaneRegistry::from_json_str("null").expect("valid json");
        assert!(reg.is_empty());
    }

    #[test]
    fn json_camel_case_fields() {
        let reg = PaneRegistry::from_json_str(
            r#"[{"key":"light","closeIcon":"x","forceRender":true,"closable":false}]"#,
        )
        .expect("valid json");
        let pane = reg.get("light").expect("light");
        assert_eq!(pane.close_icon_override(), Some("x"));
        assert!(pane.is_force_render());
        assert!(!pane.is_closable());
    }

    #[test]
    fn json_syntax_error_is_reported() {
        assert!(PaneRegistry::from_json_str("[{").is_err());
    }
}
