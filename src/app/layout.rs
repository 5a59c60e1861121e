//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the vertical height tape on the left, the
/// horizontal weight tape and a readout on the right, and a bottom status bar.
pub struct AppLayout {
    pub height_area: Rect,
    pub weight_area: Rect,
    pub readout_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // pickers (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20), // height tape
                Constraint::Min(10),    // weight tape + readout
            ])
            .split(rows[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8), // weight tape (6 rows inside the border)
                Constraint::Min(0),    // readout
            ])
            .split(columns[1]);

        Self {
            height_area: columns[0],
            weight_area: right[0],
            readout_area: right[1],
            status_area: rows[1],
        }
    }
}
