//! Core picker logic: metrics, snapping, and the controller.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Hosts feed
//! scroll offsets in and receive geometry out through the collaborator
//! traits in [`picker`].

pub mod configuration;
pub mod geometry;
pub mod labels;
pub mod metrics;
pub mod picker;
pub mod snap;
