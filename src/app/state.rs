//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Each picker owns its own configuration and labels, so nothing ever needs
//! to ask "which picker is this?" beyond the [`PickerId`] used for focus.

use tokio::sync::mpsc;

use ruler_picker::ui::ruler_widget::RulerState;
use ruler_picker::ui::scroll_surface::ScrollSurface;
use ruler_picker::{PickerError, RulerPicker};

use super::event::{AppEvent, ChannelDelegate};
use crate::config::{AppConfig, PickerSpec};

/// Which of the two on-screen pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerId {
    #[default]
    Weight,
    Height,
}

impl PickerId {
    pub fn other(self) -> Self {
        match self {
            PickerId::Weight => PickerId::Height,
            PickerId::Height => PickerId::Weight,
        }
    }
}

/// Top-level application state.
pub struct AppState {
    pub weight: RulerState,
    pub height: RulerState,
    /// Picker that receives keyboard input.
    pub focus: PickerId,
    /// Picker currently being dragged with the mouse.
    pub dragging: Option<PickerId>,
    /// User configuration (picker specs, keybindings).
    pub config: AppConfig,
    /// Whether the controls popup is shown.
    pub show_help: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// # Errors
    ///
    /// Fails when either picker spec does not describe a valid configuration.
    pub fn new(config: AppConfig, tx: mpsc::UnboundedSender<AppEvent>) -> Result<Self, PickerError> {
        let weight = build_ruler(&config.weight, PickerId::Weight, config.deceleration, tx.clone())?;
        let height = build_ruler(&config.height, PickerId::Height, config.deceleration, tx)?;
        Ok(Self {
            weight,
            height,
            focus: PickerId::default(),
            dragging: None,
            config,
            show_help: false,
            should_quit: false,
            status_message: None,
        })
    }

    pub fn ruler(&self, id: PickerId) -> &RulerState {
        match id {
            PickerId::Weight => &self.weight,
            PickerId::Height => &self.height,
        }
    }

    pub fn ruler_mut(&mut self, id: PickerId) -> &mut RulerState {
        match id {
            PickerId::Weight => &mut self.weight,
            PickerId::Height => &mut self.height,
        }
    }

    pub fn spec(&self, id: PickerId) -> &PickerSpec {
        match id {
            PickerId::Weight => &self.config.weight,
            PickerId::Height => &self.config.height,
        }
    }

    pub fn focused_mut(&mut self) -> &mut RulerState {
        self.ruler_mut(self.focus)
    }

    /// Picker whose tape contains the given terminal cell.
    pub fn picker_at(&self, column: u16, row: u16) -> Option<PickerId> {
        [PickerId::Weight, PickerId::Height]
            .into_iter()
            .find(|&id| self.ruler(id).contains(column, row))
    }

    /// One turn of host work for both pickers.  Settles are reported through
    /// the pickers' delegates, not the return value.
    pub fn advance(&mut self) {
        let _ = self.weight.tick();
        let _ = self.height.tick();
    }

    /// `"Weight: 55 KG, Height: 155 cm"` from the current highlights.
    pub fn report(&self) -> String {
        let text = |id: PickerId| {
            let title = &self.spec(id).title;
            let value = self.ruler(id).picker.indicator_text().unwrap_or("nil");
            format!("{title}: {value}")
        };
        format!("{}, {}", text(PickerId::Weight), text(PickerId::Height))
    }
}

fn build_ruler(
    spec: &PickerSpec,
    id: PickerId,
    deceleration: f64,
    tx: mpsc::UnboundedSender<AppEvent>,
) -> Result<RulerState, PickerError> {
    let picker = RulerPicker::new(spec.to_configuration()?, spec.labels())
        .with_delegate(ChannelDelegate::new(id, tx));
    Ok(RulerState::new(picker, ScrollSurface::new(deceleration)))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::*;

    fn state() -> (AppState, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (AppState::new(AppConfig::default(), tx).unwrap(), rx)
    }

    #[test]
    fn test_initial_values_are_defaults() {
        let (state, _rx) = state();
        assert_eq!(state.weight.picker.highlighted_value(), 55);
        assert_eq!(state.height.picker.highlighted_value(), 155);
        assert_eq!(state.report(), "Weight: 55 KG, Height: 155 cm");
    }

    #[test]
    fn test_invalid_spec_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut config = AppConfig::default();
        config.weight.divisions = 0;
        assert_eq!(AppState::new(config, tx).err(), Some(PickerError::ZeroDivisions));
    }

    #[test]
    fn test_picker_at_uses_drawn_areas() {
        let (mut state, _rx) = state();
        state.height.area = Rect::new(1, 1, 18, 20);
        state.weight.area = Rect::new(21, 1, 58, 6);
        assert_eq!(state.picker_at(5, 5), Some(PickerId::Height));
        assert_eq!(state.picker_at(30, 3), Some(PickerId::Weight));
        assert_eq!(state.picker_at(30, 15), None);
    }

    #[test]
    fn test_settle_reaches_channel() {
        let (mut state, mut rx) = state();
        state.weight.area = Rect::new(0, 0, 40, 6);
        state.weight.picker.set_viewport(ruler_picker::core::geometry::Viewport::new(40.0, 6.0));
        state.advance();
        state.weight.step(5);
        for _ in 0..200 {
            state.advance();
        }
        match rx.try_recv() {
            Ok(AppEvent::Settled { picker, index }) => {
                assert_eq!(picker, PickerId::Weight);
                assert_eq!(index, 25);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
