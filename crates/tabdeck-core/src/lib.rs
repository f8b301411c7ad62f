#![forbid(unsafe_code)]

//! Core: input events, geometry, and text measurement.
//!
//! # Role in TabDeck
//! `tabdeck-core` is the input layer shared by every widget. It owns the
//! normalized event types that interaction controllers consume, the `Rect`
//! used for hit regions, and cell-width measurement for terminal layout.
//!
//! # How it fits in the system
//! `tabdeck-widgets` takes `Event` values as the originating event of every
//! user action (tab click, key press, focus, add/remove) and hands them back
//! to host callbacks untouched, so hosts can inspect what triggered a change.

pub mod event;
pub mod geometry;
pub mod text;
