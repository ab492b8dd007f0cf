//! Sentiment score gauge widget.
//!
//! Draws a horizontal −100..+100 dial with the filled portion colored by
//! the score thresholds, the numeric score centered below, and the
//! classification label under that.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::core::model::{Classification, SCORE_MAX, SCORE_MIN};
use crate::tui::theme;

pub struct ScoreGauge {
    score: i32,
    classification: Classification,
}

impl ScoreGauge {
    pub fn new(score: i32, classification: Classification) -> Self {
        Self {
            // Records always carry a clamped score; clamp again so a bad
            // caller cannot overflow the bar.
            score: score.clamp(SCORE_MIN, SCORE_MAX),
            classification,
        }
    }

    /// Number of filled cells for a track of `width` cells.
    fn fill_cells(&self, width: u16) -> u16 {
        let normalized = (self.score - SCORE_MIN) as u32;
        let span = (SCORE_MAX - SCORE_MIN) as u32;
        ((normalized * width as u32) / span) as u16
    }

    fn score_text(&self) -> String {
        if self.score > 0 {
            format!("+{}", self.score)
        } else {
            self.score.to_string()
        }
    }
}

impl Widget for ScoreGauge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height == 0 {
            return;
        }

        let color = theme::score_color(self.score);
        let track_width = area.width - 2;
        let track_x = area.x + 1;
        let fill = self.fill_cells(track_width);

        // Row 0: the dial track.
        for i in 0..track_width {
            let (symbol, style) = if i < fill {
                ("█", Style::default().fg(color))
            } else {
                ("░", Style::default().fg(theme::TEXT_DIM))
            };
            buf.set_string(track_x + i, area.y, symbol, style);
        }

        // Row 1: axis labels.
        if area.height >= 2 && track_width >= 12 {
            let y = area.y + 1;
            buf.set_string(track_x, y, "-100", theme::dim());
            buf.set_string(track_x + track_width / 2, y, "0", theme::dim());
            buf.set_string(
                track_x + track_width.saturating_sub(4),
                y,
                "+100",
                theme::dim(),
            );
        }

        // Row 2: the numeric score, centered.
        if area.height >= 3 {
            let text = self.score_text();
            let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
            buf.set_string(
                x,
                area.y + 2,
                &text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        // Row 3: the classification label, centered.
        if area.height >= 4 {
            let label = self.classification.label().to_uppercase();
            let x = area.x + (area.width.saturating_sub(label.len() as u16)) / 2;
            buf.set_string(x, area.y + 3, &label, theme::muted());
        }
    }
}
