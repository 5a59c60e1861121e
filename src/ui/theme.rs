//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::metrics::TickTier;

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── tape ───────────────────────────────────────────────────
    pub fn tick_style(tier: TickTier) -> Style {
        match tier {
            TickTier::Full => Style::default().fg(Color::Gray),
            TickTier::Mid => Style::default().fg(Color::DarkGray),
            TickTier::Small => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        }
    }

    pub fn label_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    // ── indicator ──────────────────────────────────────────────
    pub fn indicator_line_style(focused: bool) -> Style {
        let color = if focused { Color::Yellow } else { Color::White };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn indicator_label_style(focused: bool) -> Style {
        let color = if focused { Color::Yellow } else { Color::White };
        Style::default()
            .fg(color)
            .bg(Color::Reset)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn readout_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
