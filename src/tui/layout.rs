//! Root layout computation: header, search bar, content, status line.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the branded header (border + one line).
pub const HEADER_HEIGHT: u16 = 3;
/// Height of the search bar (bordered single-line input).
pub const SEARCH_HEIGHT: u16 = 3;
/// Drop the header below this terminal height so content keeps priority.
pub const COMPACT_HEIGHT_THRESHOLD: u16 = 14;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Branded header (None on short terminals).
    pub header: Option<Rect>,
    /// Topic search bar.
    pub search: Rect,
    /// Main content area (trending grid / spinner / error / dashboard).
    pub content: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    pub fn compute(area: Rect) -> Self {
        let compact = area.height < COMPACT_HEIGHT_THRESHOLD;

        if compact {
            let rows = Layout::vertical([
                Constraint::Length(SEARCH_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            AppLayout {
                header: None,
                search: rows[0],
                content: rows[1],
                status: rows[2],
            }
        } else {
            let rows = Layout::vertical([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(SEARCH_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            AppLayout {
                header: Some(rows[0]),
                search: rows[1],
                content: rows[2],
                status: rows[3],
            }
        }
    }
}
