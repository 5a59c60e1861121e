//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;

use super::state::{AppState, PickerId};

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // Any key closes the controls popup.
    if state.show_help {
        state.show_help = false;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    tracing::trace!(?action, focus = ?state.focus, "key action");

    let divisions = i64::from(state.focused_mut().picker.metrics().divisions());
    match action {
        Action::Quit => state.should_quit = true,
        Action::ToggleHelp => state.show_help = true,
        Action::SwitchPicker => state.focus = state.focus.other(),
        Action::Report => state.status_message = Some(state.report()),
        Action::StepBack => state.focused_mut().step(-1),
        Action::StepForward => state.focused_mut().step(1),
        Action::JumpBack => state.focused_mut().step(-divisions),
        Action::JumpForward => state.focused_mut().step(divisions),
        Action::First => {
            let ruler = state.focused_mut();
            let min = ruler.picker.metrics().minimum_value();
            ruler.picker.scroll_to_value(min, true);
        }
        Action::Last => {
            let ruler = state.focused_mut();
            let max = ruler.picker.metrics().maximum_value();
            ruler.picker.scroll_to_value(max, true);
        }
    }
}

/// Process a mouse event: press-drag-release scrolls a tape, the wheel
/// nudges it one tick per notch.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(id) = state.picker_at(column, row) else {
                return;
            };
            state.focus = id;
            state.dragging = Some(id);
            state.ruler_mut(id).begin_drag(column, row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(id) = state.dragging {
                state.ruler_mut(id).drag_to(column, row);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(id) = state.dragging.take() {
                state.ruler_mut(id).end_drag();
            }
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            if let Some(id) = state.picker_at(column, row) {
                state.ruler_mut(id).scroll_ticks(1);
            }
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            if let Some(id) = state.picker_at(column, row) {
                state.ruler_mut(id).scroll_ticks(-1);
            }
        }
        _ => {}
    }
}

/// A picker committed a selection.
pub fn handle_settled(state: &mut AppState, picker: PickerId, index: usize) {
    let value = state.ruler(picker).picker.metrics().value_for_index(index);
    let spec = state.spec(picker);
    tracing::debug!(?picker, index, value, "selection committed");
    state.status_message = Some(format!("{}: {}", spec.title, spec.highlight_label(value)));
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;
    use ruler_picker::core::geometry::Viewport;
    use tokio::sync::mpsc;

    use super::*;
    use crate::app::event::AppEvent;
    use crate::config::AppConfig;

    fn state() -> (AppState, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = AppState::new(AppConfig::default(), tx).unwrap();
        state.weight.area = Rect::new(21, 1, 40, 6);
        state.weight.picker.set_viewport(Viewport::new(40.0, 6.0));
        state.height.area = Rect::new(1, 1, 18, 20);
        state.height.picker.set_viewport(Viewport::new(20.0, 18.0));
        state.advance();
        (state, rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn settle(state: &mut AppState) {
        for _ in 0..200 {
            state.advance();
        }
    }

    #[test]
    fn test_keys_step_the_focused_picker() {
        let (mut state, _rx) = state();
        handle_key(&mut state, press(KeyCode::Right));
        handle_key(&mut state, press(KeyCode::Right));
        settle(&mut state);
        assert_eq!(state.weight.picker.highlighted_value(), 57);

        handle_key(&mut state, press(KeyCode::Tab));
        assert_eq!(state.focus, PickerId::Height);
        handle_key(&mut state, press(KeyCode::PageDown));
        settle(&mut state);
        assert_eq!(state.height.picker.highlighted_value(), 160);
        handle_key(&mut state, press(KeyCode::End));
        settle(&mut state);
        assert_eq!(state.height.picker.highlighted_value(), 250);
    }

    #[test]
    fn test_key_repeat_during_animation_is_not_lost() {
        let (mut state, _rx) = state();
        for _ in 0..3 {
            handle_key(&mut state, press(KeyCode::Right));
            state.advance();
        }
        settle(&mut state);
        assert_eq!(state.weight.picker.highlighted_value(), 58);
    }

    #[test]
    fn test_report_and_help() {
        let (mut state, _rx) = state();
        handle_key(&mut state, press(KeyCode::Enter));
        assert_eq!(state.status_message.as_deref(), Some("Weight: 55 KG, Height: 155 cm"));

        handle_key(&mut state, press(KeyCode::Char('?')));
        assert!(state.show_help);
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(!state.show_help);
        assert!(!state.should_quit);
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn test_mouse_drag_focuses_and_settles() {
        let (mut state, mut rx) = state();
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 5, 10));
        assert_eq!(state.focus, PickerId::Height);
        // Dragging up by three rows advances three ticks (stride 1).
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 5, 7));
        assert_eq!(state.height.picker.highlighted_value(), 158);
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 5, 7));
        assert_eq!(state.dragging, None);
        settle(&mut state);

        let Ok(AppEvent::Settled { picker, index }) = rx.try_recv() else {
            panic!("expected a settle event");
        };
        assert_eq!(picker, PickerId::Height);
        handle_settled(&mut state, picker, index);
        let value = state.height.picker.highlighted_value();
        assert_eq!(state.status_message, Some(format!("Height: {value} cm")));
    }

    #[test]
    fn test_resize_mid_drag_still_settles() {
        let (mut state, mut rx) = state();
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 30, 3));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 26, 3));
        state.weight.picker.set_viewport(Viewport::new(50.0, 6.0));
        state.advance();
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 24, 3));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 24, 3));
        settle(&mut state);

        let Ok(AppEvent::Settled { picker, index }) = rx.try_recv() else {
            panic!("expected a settle event");
        };
        assert_eq!(picker, PickerId::Weight);
        assert_eq!(index, state.weight.picker.highlighted_index());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_wheel_moves_one_tick_per_notch() {
        let (mut state, _rx) = state();
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 30, 3));
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 30, 3));
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollUp, 30, 3));
        settle(&mut state);
        assert_eq!(state.weight.picker.highlighted_value(), 56);
        // Outside any tape: ignored.
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 70, 20));
        settle(&mut state);
        assert_eq!(state.weight.picker.highlighted_value(), 56);
    }
}
