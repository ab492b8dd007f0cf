//! Trending-topic card grid, shown while idle.
//!
//! Topics arrive once at startup (fallback already applied upstream) and
//! are replaced wholesale. Cards are navigated with arrows/hjkl; Enter
//! analyzes the selected topic.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::model::TrendingTopic;
use crate::tui::theme;

/// Rendered height of one topic card (border + two text lines + border).
const CARD_HEIGHT: u16 = 4;

/// Columns for a given content width (mirrors the 1/2/3-column breakpoints
/// of the original grid).
pub(crate) fn columns_for_width(width: u16) -> usize {
    if width >= 78 {
        3
    } else if width >= 52 {
        2
    } else {
        1
    }
}

pub struct TrendingState {
    topics: Vec<TrendingTopic>,
    selected: usize,
    loaded: bool,
    /// Column count from the last render, used for row-wise navigation.
    columns: usize,
}

impl TrendingState {
    pub fn new() -> Self {
        Self {
            topics: Vec::new(),
            selected: 0,
            loaded: false,
            columns: 1,
        }
    }

    /// Replace the whole batch (never mutated per-item).
    pub fn set_topics(&mut self, topics: Vec<TrendingTopic>) {
        self.topics = topics;
        self.selected = 0;
        self.loaded = true;
    }

    pub fn topics(&self) -> &[TrendingTopic] {
        &self.topics
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn selected_topic(&self) -> Option<&TrendingTopic> {
        self.topics.get(self.selected)
    }

    /// Handle a key in normal mode while idle. Returns the topic name to
    /// analyze when Enter selects a card.
    pub fn handle_input(&mut self, event: &Event) -> Option<String> {
        let Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        if self.topics.is_empty() {
            return None;
        }

        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected + 1 < self.topics.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(self.columns);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + self.columns < self.topics.len() {
                    self.selected += self.columns;
                }
            }
            KeyCode::Enter => {
                return self.selected_topic().map(|t| t.name.clone());
            }
            _ => {}
        }

        None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Trending Now");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.topics.is_empty() {
            let msg = if self.loaded {
                "No trending topics available."
            } else {
                "Loading trends..."
            };
            frame.render_widget(
                Paragraph::new(Line::styled(msg, theme::dim())).centered(),
                inner,
            );
            return;
        }

        self.columns = columns_for_width(inner.width);
        let card_width = inner.width / self.columns as u16;

        for (i, topic) in self.topics.iter().enumerate() {
            let row = (i / self.columns) as u16;
            let col = (i % self.columns) as u16;

            let y = inner.y + row * CARD_HEIGHT;
            if y + CARD_HEIGHT > inner.y + inner.height {
                break;
            }

            let card = Rect::new(inner.x + col * card_width, y, card_width, CARD_HEIGHT);
            self.render_card(frame, card, topic, i == self.selected);
        }
    }

    fn render_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        topic: &TrendingTopic,
        selected: bool,
    ) {
        let block = if selected {
            theme::block_focused("")
        } else {
            theme::block_default("")
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let name_style = if selected {
            Style::default().fg(theme::TEXT).patch(theme::highlight())
        } else {
            Style::default().fg(theme::TEXT)
        };

        let lines = vec![
            Line::from(Span::styled(
                topic.category.clone(),
                Style::default().fg(theme::PRIMARY),
            )),
            Line::from(vec![
                Span::styled(if selected { "▸ " } else { "  " }, theme::highlight()),
                Span::styled(topic.name.clone(), name_style),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for TrendingState {
    fn default() -> Self {
        Self::new()
    }
}
