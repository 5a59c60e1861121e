//! Host scroll surface with exponential ease-out deceleration.
//!
//! The surface owns the live content offset.  Drags move it directly; on
//! release the picker is asked where the content must come to rest, and each
//! tick the remaining distance decays toward that target until it lands,
//! at which point the settle callback fires exactly once.

use crate::core::picker::RulerPicker;

/// Remaining distance below which the animation snaps onto its target.
const SETTLE_EPSILON: f64 = 0.05;

/// How far (in drag-deltas) a release is projected forward before snapping.
const MOMENTUM_FACTOR: f64 = 4.0;

/// Drag + deceleration driver for one picker.
#[derive(Debug, Clone)]
pub struct ScrollSurface {
    /// Current content offset along the scroll axis.
    offset: f64,
    /// Tick the running animation will come to rest on.  Kept as an index
    /// so a layout change mid-flight moves the destination with it.
    target: Option<usize>,
    /// Pointer position of the last drag event, while a drag is active.
    drag_anchor: Option<f64>,
    /// Offset delta of the most recent drag event.
    velocity: f64,
    /// Damping: `remaining *= (1 - speed)` each tick.
    /// Higher speed = faster settle.  Good range: 0.25–0.45 at 30 fps.
    speed: f64,
}

impl ScrollSurface {
    pub fn new(speed: f64) -> Self {
        Self {
            offset: 0.0,
            target: None,
            drag_anchor: None,
            velocity: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// True while content is still moving toward a resting offset.
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn target_index(&self) -> Option<usize> {
        self.target
    }

    // ── gestures ───────────────────────────────────────────────

    /// Pointer pressed at `pos` (along the scroll axis).  Stops any running
    /// deceleration where it is.
    pub fn begin_drag(&mut self, pos: f64) {
        self.target = None;
        self.drag_anchor = Some(pos);
        self.velocity = 0.0;
    }

    /// Pointer moved to `pos`.  Content follows the pointer, so moving
    /// toward the leading edge scrolls forward.
    pub fn drag_to(&mut self, pos: f64, picker: &mut RulerPicker) {
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        let delta = anchor - pos;
        self.drag_anchor = Some(pos);
        self.velocity = delta;
        self.move_to(self.offset + delta, picker);
    }

    /// Pointer released.  The projected momentum target is handed to the
    /// picker, which overrides it with the nearest tick.
    pub fn end_drag(&mut self, picker: &mut RulerPicker) {
        if self.drag_anchor.take().is_none() {
            return;
        }
        let proposed = self.offset + self.velocity * MOMENTUM_FACTOR;
        let target = picker.on_will_end_dragging(proposed, self.velocity);
        self.velocity = 0.0;
        self.target = Some(picker.engine().index_for_offset(target));
    }

    /// Wheel / key nudge: behaves like a drag of `delta` released at rest.
    /// Consecutive nudges accumulate from the running target.
    pub fn scroll_by(&mut self, delta: f64, picker: &mut RulerPicker) {
        self.drag_anchor = None;
        let base = self
            .target
            .map_or(self.offset, |index| picker.engine().offset_for_index(index));
        let target = picker.on_will_end_dragging(base + delta, 0.0);
        self.target = Some(picker.engine().index_for_offset(target));
    }

    // ── per-turn driving ───────────────────────────────────────

    /// Apply a programmatic scroll the picker queued since the last turn.
    ///
    /// A layout re-centering does not interrupt a gesture: a drag keeps its
    /// pointer anchor and a deceleration keeps its destination tick, both
    /// continuing from the re-centered offset.
    pub fn apply_pending(&mut self, picker: &mut RulerPicker) {
        let Some(request) = picker.take_scroll_request() else {
            return;
        };
        if request.relayout && (self.is_dragging() || self.is_animating()) {
            tracing::trace!(offset = request.offset, "gesture rebased onto new layout");
            self.offset = request.offset;
            picker.on_scroll_position_changed(self.offset);
            return;
        }
        self.drag_anchor = None;
        if request.animated {
            self.target = Some(picker.engine().index_for_offset(request.offset));
        } else {
            self.target = None;
            self.offset = request.offset;
            picker.on_scroll_position_changed(self.offset);
        }
    }

    /// Advance the deceleration by one frame.  Returns the settled index on
    /// the frame the content comes to rest.
    pub fn tick(&mut self, picker: &mut RulerPicker) -> Option<usize> {
        let index = self.target?;
        let target = picker.engine().offset_for_index(index);
        let remaining = target - self.offset;
        if remaining.abs() < SETTLE_EPSILON {
            self.offset = target;
            self.target = None;
            return Some(picker.on_scroll_settled(self.offset));
        }
        self.offset += remaining * self.speed;
        picker.on_scroll_position_changed(self.offset);
        None
    }

    fn move_to(&mut self, offset: f64, picker: &mut RulerPicker) {
        let (first, last) = picker.engine().offset_bounds();
        self.offset = offset.clamp(first, last);
        picker.on_scroll_position_changed(self.offset);
    }
}

impl Default for ScrollSurface {
    fn default() -> Self {
        Self::new(0.35)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::configuration::{Alignment, Configuration, ScrollDirection};
    use crate::core::geometry::Viewport;
    use crate::core::labels::ValueLabels;
    use crate::core::metrics::Metrics;
    use crate::core::picker::Delegate;

    #[derive(Clone, Default)]
    struct Settles(Rc<RefCell<Vec<usize>>>);

    impl Delegate for Settles {
        fn on_selection_settled(&mut self, index: usize) {
            self.0.borrow_mut().push(index);
        }
    }

    fn picker_with(settles: &Settles) -> RulerPicker {
        let metrics = Metrics::new(35, 55, 150, 5, 3.0, 2.0, 1.0).unwrap();
        let config =
            Configuration::new(ScrollDirection::Horizontal, Alignment::End, 1.0, 1.0, metrics).unwrap();
        let mut picker = RulerPicker::new(config, ValueLabels::new()).with_delegate(settles.clone());
        picker.set_viewport(Viewport::new(40.0, 6.0));
        picker
    }

    fn run_until_settled(surface: &mut ScrollSurface, picker: &mut RulerPicker) -> usize {
        for _ in 0..500 {
            if let Some(index) = surface.tick(picker) {
                return index;
            }
        }
        panic!("surface never settled");
    }

    #[test]
    fn test_apply_pending_jumps_without_animation() {
        let settles = Settles::default();
        let mut picker = picker_with(&settles);
        let mut surface = ScrollSurface::default();
        surface.apply_pending(&mut picker);
        assert_eq!(surface.offset(), picker.engine().offset_for_value(55));
        assert!(!surface.is_animating());
        assert!(surface.tick(&mut picker).is_none());
        assert!(settles.0.borrow().is_empty());
    }

    #[test]
    fn test_drag_release_settles_on_tick_exactly_once() {
        let settles = Settles::default();
        let mut picker = picker_with(&settles);
        let mut surface = ScrollSurface::default();
        surface.apply_pending(&mut picker);

        surface.begin_drag(30.0);
        surface.drag_to(27.0, &mut picker);
        surface.drag_to(26.0, &mut picker);
        assert!(surface.is_dragging());
        // Dragged four cells toward the leading edge: two ticks forward.
        assert_eq!(picker.highlighted_value(), 57);

        surface.end_drag(&mut picker);
        let index = run_until_settled(&mut surface, &mut picker);

        assert_eq!(surface.offset(), picker.engine().offset_for_index(index));
        assert_eq!(*settles.0.borrow(), vec![index]);
        assert_eq!(picker.highlighted_index(), index);
        assert!(surface.tick(&mut picker).is_none());
        assert_eq!(settles.0.borrow().len(), 1);
    }

    #[test]
    fn test_drag_clamps_to_tape_ends() {
        let settles = Settles::default();
        let mut picker = picker_with(&settles);
        let mut surface = ScrollSurface::default();
        surface.apply_pending(&mut picker);

        surface.begin_drag(0.0);
        surface.drag_to(10_000.0, &mut picker);
        assert_eq!(picker.highlighted_value(), 35);
        surface.end_drag(&mut picker);
        assert_eq!(run_until_settled(&mut surface, &mut picker), 0);
    }

    #[test]
    fn test_scroll_by_moves_whole_ticks() {
        let settles = Settles::default();
        let mut picker = picker_with(&settles);
        let mut surface = ScrollSurface::default();
        surface.apply_pending(&mut picker);

        let stride = picker.engine().cell_stride();
        surface.scroll_by(stride, &mut picker);
        surface.scroll_by(stride, &mut picker);
        let index = run_until_settled(&mut surface, &mut picker);
        assert_eq!(picker.metrics().value_for_index(index), 57);
        assert_eq!(settles.0.borrow().len(), 1);
    }

    #[test]
    fn test_animated_request_decelerates_to_target() {
        let settles = Settles::default();
        let mut picker = picker_with(&settles);
        let mut surface = ScrollSurface::default();
        surface.apply_pending(&mut picker);

        picker.scroll_to_value(100, true);
        surface.apply_pending(&mut picker);
        assert!(surface.is_animating());
        let index = run_until_settled(&mut surface, &mut picker);
        assert_eq!(picker.metrics().value_for_index(index), 100);
        assert_eq!(picker.highlighted_value(), 100);
    }

    #[test]
    fn test_drag_survives_viewport_change() {
        let settles = Settles::default();
        let mut picker = picker_with(&settles);
        let mut surface = ScrollSurface::default();
        surface.apply_pending(&mut picker);

        surface.begin_drag(30.0);
        surface.drag_to(26.0, &mut picker);
        assert_eq!(picker.highlighted_value(), 57);

        picker.set_viewport(Viewport::new(50.0, 6.0));
        surface.apply_pending(&mut picker);
        assert!(surface.is_dragging());
        assert_eq!(surface.offset(), picker.engine().offset_for_value(57));

        surface.drag_to(24.0, &mut picker);
        assert_eq!(picker.highlighted_value(), 58);
        surface.end_drag(&mut picker);
        let index = run_until_settled(&mut surface, &mut picker);
        assert_eq!(surface.offset(), picker.engine().offset_for_index(index));
        assert_eq!(picker.highlighted_index(), index);
        assert_eq!(*settles.0.borrow(), vec![index]);
    }

    #[test]
    fn test_deceleration_keeps_destination_across_viewport_change() {
        let settles = Settles::default();
        let mut picker = picker_with(&settles);
        let mut surface = ScrollSurface::default();
        surface.apply_pending(&mut picker);

        picker.scroll_to_value(100, true);
        surface.apply_pending(&mut picker);
        assert!(surface.tick(&mut picker).is_none());

        picker.set_viewport(Viewport::new(30.0, 6.0));
        surface.apply_pending(&mut picker);
        assert!(surface.is_animating());
        assert_eq!(surface.target_index(), Some(picker.metrics().index_for_value(100)));

        let index = run_until_settled(&mut surface, &mut picker);
        assert_eq!(picker.metrics().value_for_index(index), 100);
        assert_eq!(surface.offset(), picker.engine().offset_for_value(100));
        assert_eq!(settles.0.borrow().len(), 1);
    }

    #[test]
    fn test_relayout_at_rest_jumps_without_settle() {
        let settles = Settles::default();
        let mut picker = picker_with(&settles);
        let mut surface = ScrollSurface::default();
        surface.apply_pending(&mut picker);

        picker.set_viewport(Viewport::new(50.0, 6.0));
        surface.apply_pending(&mut picker);
        assert_eq!(surface.offset(), picker.engine().offset_for_value(55));
        assert!(surface.tick(&mut picker).is_none());
        assert!(settles.0.borrow().is_empty());
    }
}
