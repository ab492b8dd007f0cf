//! Topic search input: a single-line buffer with cursor management and
//! mode-aware rendering (placeholder when empty, block cursor in insert
//! mode).

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

/// Placeholder shown while the input is empty.
pub const PLACEHOLDER: &str =
    "Enter a topic (e.g., 'Bitcoin', 'New Marvel Movie', 'Remote Work')";

/// Whether keystrokes edit the topic or drive navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

/// Single-line text input with a byte-indexed cursor.
pub struct TopicInput {
    content: String,
    cursor: usize,
}

impl TopicInput {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Replace the content (e.g. when a trend card is selected) and move
    /// the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.content = text.to_string();
        self.cursor = self.content.len();
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    /// True when the content is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Render the input into the search bar area.
    pub fn render(&self, frame: &mut Frame, area: Rect, mode: InputMode) {
        let (block, text_style) = match mode {
            InputMode::Insert => (
                theme::block_focused("Topic (Enter to analyze, Esc to cancel)"),
                Style::default().fg(theme::TEXT),
            ),
            InputMode::Normal => (
                theme::block_default("Topic (press i to edit)"),
                Style::default().fg(theme::TEXT_MUTED),
            ),
        };

        let line = if self.content.is_empty() {
            Line::styled(PLACEHOLDER, theme::dim())
        } else if mode == InputMode::Insert {
            // Split around the cursor so the char under it can be inverted.
            let before = &self.content[..self.cursor];
            let cursor_char = self.content[self.cursor..]
                .chars()
                .next()
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after = if self.cursor < self.content.len() {
                &self.content[self.cursor + cursor_char.len()..]
            } else {
                ""
            };

            Line::from(vec![
                Span::styled(before.to_string(), text_style),
                Span::styled(
                    cursor_char,
                    Style::default().bg(theme::TEXT).fg(theme::BG_BASE),
                ),
                Span::styled(after.to_string(), text_style),
            ])
        } else {
            Line::styled(self.content.clone(), text_style)
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

impl Default for TopicInput {
    fn default() -> Self {
        Self::new()
    }
}
