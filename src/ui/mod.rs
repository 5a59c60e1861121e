//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer hosts a [`RulerPicker`](crate::core::picker::RulerPicker)
//! inside a terminal: it measures the viewport, drives scrolling, and turns
//! the core's geometry into cells.  No index math happens here.

pub mod popup;
pub mod ruler_widget;
pub mod scroll_surface;
pub mod theme;
