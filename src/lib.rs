//! A snapping ruler picker.
//!
//! A scrollable tape of tick marks (full/mid/small lines) with labels that
//! always comes to rest on a whole value under a fixed center indicator.
//!
//! - [`core`] holds the headless logic: [`Metrics`], [`Configuration`],
//!   [`SnapEngine`] and the [`RulerPicker`] controller.
//! - [`ui`] hosts a picker inside a Ratatui terminal: the scroll surface that
//!   drives drags and deceleration, and the widget that draws the tape.

pub mod core;
pub mod error;
pub mod ui;

pub use crate::core::configuration::{Alignment, Configuration, ScrollDirection};
pub use crate::core::labels::ValueLabels;
pub use crate::core::metrics::{Metrics, TickTier};
pub use crate::core::picker::{DataSource, Delegate, Renderer, RulerPicker, ScrollRequest};
pub use crate::core::snap::SnapEngine;
pub use crate::error::PickerError;
