//! The ruler picker controller.
//!
//! [`RulerPicker`] owns one [`Configuration`], the [`SnapEngine`] derived from
//! it, and the live [`PickerState`].  It never moves content itself: the host
//! scroll surface reports offsets in and drains [`ScrollRequest`]s out.
//!
//! Collaborators:
//! - [`DataSource`] supplies tape and indicator labels,
//! - [`Delegate`] hears about committed selections,
//! - [`Renderer`] receives per-tick and indicator geometry.

use super::configuration::Configuration;
use super::geometry::{place_across, Extent, IndicatorGeometry, TickGeometry, Viewport};
use super::metrics::Metrics;
use super::snap::SnapEngine;

/// Ticks rendered beyond each viewport edge so labels centered on an
/// off-screen tick can still bleed in.
const OVERSCAN_TICKS: f64 = 4.0;

// ───────────────────────────────────────── collaborators ─────

/// Supplies label text.  Returning `None` renders no label.
pub trait DataSource {
    fn title_for_index(&self, metrics: &Metrics, index: usize) -> Option<String>;
    fn highlight_title_for_index(&self, metrics: &Metrics, index: usize) -> Option<String>;
}

/// Notified once per settle with the committed tick index.
pub trait Delegate {
    fn on_selection_settled(&mut self, index: usize);
}

/// Draws computed geometry.  Has no say in index math.
pub trait Renderer {
    fn draw_tick(&mut self, tick: &TickGeometry);
    fn draw_indicator(&mut self, indicator: &IndicatorGeometry);
}

// ───────────────────────────────────────── state ─────────────

/// A programmatic scroll the host should perform on its next turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub offset: f64,
    pub animated: bool,
    /// Re-centering after a viewport change.  A drag or deceleration in
    /// progress should carry on under the new layout instead of stopping.
    pub relayout: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingScroll {
    value: i64,
    animated: bool,
    relayout: bool,
}

/// Mutable per-control state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickerState {
    /// Tick nearest the center indicator, in `[0, item_count - 1]`.
    pub highlighted_index: usize,
    /// Last scroll offset reported by the host (or set by a re-snap).
    pub offset: f64,
    pub indicator_text: Option<String>,
    pub indicator_extent: Extent,
}

// ───────────────────────────────────────── controller ────────

pub struct RulerPicker {
    configuration: Configuration,
    engine: SnapEngine,
    viewport: Viewport,
    state: PickerState,
    /// The pending programmatic scroll.  Its offset is resolved when the
    /// host takes it, after layout.
    pending_scroll: Option<PendingScroll>,
    data_source: Box<dyn DataSource>,
    delegate: Option<Box<dyn Delegate>>,
}

impl RulerPicker {
    pub fn new(configuration: Configuration, data_source: impl DataSource + 'static) -> Self {
        let engine = SnapEngine::new(&configuration, 0.0);
        let mut picker = Self {
            configuration: Configuration::default(),
            engine,
            viewport: Viewport::default(),
            state: PickerState::default(),
            pending_scroll: None,
            data_source: Box::new(data_source),
            delegate: None,
        };
        picker.set_configuration(configuration);
        picker
    }

    pub fn with_delegate(mut self, delegate: impl Delegate + 'static) -> Self {
        self.set_delegate(delegate);
        self
    }

    pub fn set_delegate(&mut self, delegate: impl Delegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn metrics(&self) -> &Metrics {
        self.configuration.metrics()
    }

    pub fn engine(&self) -> &SnapEngine {
        &self.engine
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn highlighted_index(&self) -> usize {
        self.state.highlighted_index
    }

    pub fn highlighted_value(&self) -> i64 {
        self.metrics().value_for_index(self.state.highlighted_index)
    }

    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub fn indicator_text(&self) -> Option<&str> {
        self.state.indicator_text.as_deref()
    }

    pub fn item_count(&self) -> usize {
        self.engine.item_count()
    }

    // ── configuration & layout ─────────────────────────────────

    /// Replace the configuration wholesale and re-snap to its default value
    /// without animation.
    pub fn set_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration;
        self.engine = SnapEngine::new(&self.configuration, self.viewport.main);
        let value = self.metrics().default_value();
        tracing::debug!(
            min = self.metrics().minimum_value(),
            max = self.metrics().maximum_value(),
            default = value,
            divisions = self.metrics().divisions(),
            direction = ?self.configuration.scroll_direction(),
            "configuration applied"
        );
        self.resnap(value);
        self.scroll_to_value(value, false);
    }

    /// Layout pass: the host reports the control's current size.  A changed
    /// viewport moves the inset, so the highlighted tick is re-centered.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        tracing::trace!(main = viewport.main, cross = viewport.cross, "viewport changed");
        self.viewport = viewport;
        self.engine = SnapEngine::new(&self.configuration, viewport.main);
        let value = self.highlighted_value();
        self.resnap(value);
        if self.pending_scroll.is_none() {
            self.pending_scroll = Some(PendingScroll {
                value,
                animated: false,
                relayout: true,
            });
        }
    }

    /// Re-query the data source for the indicator text.
    pub fn reload(&mut self) {
        self.state.indicator_text = self
            .data_source
            .highlight_title_for_index(self.configuration.metrics(), self.state.highlighted_index);
        self.remeasure_indicator();
    }

    fn resnap(&mut self, value: i64) {
        let index = self.metrics().index_for_value(value);
        self.state.highlighted_index = index;
        self.state.offset = self.engine.offset_for_index(index);
        self.reload();
    }

    fn remeasure_indicator(&mut self) {
        self.state.indicator_extent = self
            .state
            .indicator_text
            .as_deref()
            .map(Extent::of_text)
            .unwrap_or_default();
    }

    // ── programmatic scrolling ─────────────────────────────────

    /// Ask the host to center `value`, clamped into range.  The request is
    /// deferred to the host's next turn; a later call replaces it.
    pub fn scroll_to_value(&mut self, value: i64, animated: bool) {
        let clamped = self.metrics().clamp_value(value);
        if clamped != value {
            tracing::trace!(value, clamped, "scroll target clamped");
        }
        self.pending_scroll = Some(PendingScroll {
            value: clamped,
            animated,
            relayout: false,
        });
    }

    /// Drain the pending scroll, resolving its offset against the current
    /// layout.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        let pending = self.pending_scroll.take()?;
        Some(ScrollRequest {
            offset: self.engine.offset_for_value(pending.value),
            animated: pending.animated,
            relayout: pending.relayout,
        })
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll.is_some()
    }

    /// Value of the pending `scroll_to_value` call, if any.  Layout
    /// re-centering does not count: it keeps the current selection.
    pub fn pending_value(&self) -> Option<i64> {
        self.pending_scroll
            .filter(|pending| !pending.relayout)
            .map(|pending| pending.value)
    }

    // ── host scroll callbacks ──────────────────────────────────

    /// Every position update from the host.  The data source is only asked
    /// for new indicator text when the highlighted tick changes.
    pub fn on_scroll_position_changed(&mut self, offset: f64) {
        self.state.offset = offset;
        let index = self.engine.index_for_offset(offset);
        if index != self.state.highlighted_index {
            self.state.highlighted_index = index;
            self.state.indicator_text = self
                .data_source
                .highlight_title_for_index(self.configuration.metrics(), index);
        }
        self.remeasure_indicator();
    }

    /// Drag released: returns the offset the host must decelerate to.
    /// `velocity` does not weight the result; the snap is nearest-tick.
    pub fn on_will_end_dragging(&self, proposed_offset: f64, velocity: f64) -> f64 {
        let target = self.engine.snap_target(proposed_offset);
        tracing::debug!(proposed_offset, velocity, target, "drag released");
        target
    }

    /// Momentum has fully stopped.  Returns the committed index after
    /// notifying the delegate.
    pub fn on_scroll_settled(&mut self, offset: f64) -> usize {
        self.on_scroll_position_changed(offset);
        let index = self.engine.settled_index(offset);
        tracing::debug!(index, value = self.metrics().value_for_index(index), "selection settled");
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_selection_settled(index);
        }
        index
    }

    // ── rendering ──────────────────────────────────────────────

    /// Indices whose ticks fall inside the viewport (plus overscan).
    pub fn visible_indices(&self) -> std::ops::RangeInclusive<usize> {
        let stride = self.engine.cell_stride();
        let overscan = stride * OVERSCAN_TICKS;
        let last_index = self.item_count() - 1;
        let first = ((self.state.offset - overscan) / stride).floor().max(0.0);
        let last = ((self.state.offset + self.viewport.main + overscan) / stride)
            .ceil()
            .min(last_index as f64);
        if last < first {
            // Fully scrolled past either end: an empty range.
            return 1..=0;
        }
        (first as usize)..=(last as usize)
    }

    /// Hand every visible tick and then the indicator to `renderer`.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let config = &self.configuration;
        let metrics = config.metrics();
        let horizontal = config.is_horizontal();
        let stride = self.engine.cell_stride();

        for index in self.visible_indices() {
            let tier = metrics.tick_tier(index);
            let line_length = metrics.line_length(tier);
            let title = self.data_source.title_for_index(metrics, index);
            let label_extent = title
                .as_deref()
                .map(|t| Extent::of_text(t).cross(horizontal))
                .unwrap_or(0.0);
            // Vertical labels line up in a column past the longest line.
            let anchor = if horizontal { line_length } else { metrics.full_line_size() };
            let (line_cross, label_cross) = place_across(
                config.alignment(),
                self.viewport.cross,
                line_length,
                anchor,
                label_extent,
                config.line_and_label_spacing(),
            );
            renderer.draw_tick(&TickGeometry {
                index,
                tier,
                main: index as f64 * stride - self.state.offset,
                line_cross,
                line_length,
                title,
                label_cross,
            });
        }

        renderer.draw_indicator(&self.indicator_geometry());
    }

    pub fn indicator_geometry(&self) -> IndicatorGeometry {
        let config = &self.configuration;
        let full = config.metrics().full_line_size();
        let extent = self.state.indicator_extent;
        let (line_cross, label_cross) = place_across(
            config.alignment(),
            self.viewport.cross,
            full,
            full,
            extent.cross(config.is_horizontal()),
            config.line_and_label_spacing(),
        );
        IndicatorGeometry {
            main: self.engine.leading_inset(),
            line_cross,
            line_length: full,
            text: self.state.indicator_text.clone(),
            text_extent: extent,
            label_cross,
        }
    }
}
