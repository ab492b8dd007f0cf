//! Results dashboard: topic header with classification badge, score
//! gauge, executive summary, numbered key insights, and the cited-source
//! list with open-in-browser.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::model::SentimentRecord;
use crate::tui::theme;
use crate::tui::widgets::gauge::ScoreGauge;

/// Fixed width of the gauge panel.
const GAUGE_PANEL_WIDTH: u16 = 32;
/// Source rows visible at once.
const MAX_VISIBLE_SOURCES: usize = 4;

/// Outcome of a key handled by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardResult {
    Consumed,
    /// Open the given URI in the system browser.
    OpenSource(String),
}

pub struct DashboardState {
    record: Option<SentimentRecord>,
    selected_source: usize,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            record: None,
            selected_source: 0,
        }
    }

    /// Store a fresh record (replaces any previous one).
    pub fn set_record(&mut self, record: SentimentRecord) {
        self.record = Some(record);
        self.selected_source = 0;
    }

    /// Drop the current record (entering Loading does this).
    pub fn clear(&mut self) {
        self.record = None;
        self.selected_source = 0;
    }

    pub fn record(&self) -> Option<&SentimentRecord> {
        self.record.as_ref()
    }

    pub fn selected_source(&self) -> usize {
        self.selected_source
    }

    /// URI of the currently selected source, if any.
    pub fn selected_uri(&self) -> Option<&str> {
        self.record
            .as_ref()
            .and_then(|r| r.sources.get(self.selected_source))
            .map(|s| s.uri.as_str())
    }

    /// Handle a key in normal mode while results are shown.
    pub fn handle_input(&mut self, event: &Event) -> Option<DashboardResult> {
        let Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        let sources = self.record.as_ref().map(|r| r.sources.len()).unwrap_or(0);

        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_source = self.selected_source.saturating_sub(1);
                Some(DashboardResult::Consumed)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_source + 1 < sources {
                    self.selected_source += 1;
                }
                Some(DashboardResult::Consumed)
            }
            KeyCode::Enter | KeyCode::Char('o') => self
                .selected_uri()
                .map(|uri| DashboardResult::OpenSource(uri.to_string())),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(record) = self.record.as_ref() else {
            return;
        };

        let sources_height = if record.sources.is_empty() {
            0
        } else {
            record.sources.len().min(MAX_VISIBLE_SOURCES) as u16 + 2
        };

        let rows = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(sources_height),
        ])
        .split(area);

        self.render_header(frame, rows[0], record);
        self.render_body(frame, rows[1], record);
        if sources_height > 0 {
            self.render_sources(frame, rows[2], record);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, record: &SentimentRecord) {
        let block = theme::block_default("");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let badge_color = theme::classification_color(record.classification);
        let title_line = Line::from(vec![
            Span::styled(
                record.topic.clone(),
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" {} Sentiment ", record.classification),
                Style::default()
                    .fg(theme::BG_BASE)
                    .bg(badge_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let mut meta_spans = vec![Span::styled(
            format!("Analysis generated at {}", record.analyzed_at),
            theme::muted(),
        )];
        if !record.anomalies.is_empty() {
            meta_spans.push(Span::styled(
                format!(
                    "  · low-confidence parse ({} field(s) defaulted)",
                    record.anomalies.len()
                ),
                Style::default().fg(theme::WARNING),
            ));
        }

        frame.render_widget(
            Paragraph::new(vec![title_line, Line::from(meta_spans)]),
            inner,
        );
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, record: &SentimentRecord) {
        let cols = Layout::horizontal([
            Constraint::Length(GAUGE_PANEL_WIDTH.min(area.width / 2)),
            Constraint::Min(20),
        ])
        .split(area);

        // Gauge panel.
        let gauge_block = theme::block_default("Sentiment Score");
        let gauge_inner = gauge_block.inner(cols[0]);
        frame.render_widget(gauge_block, cols[0]);
        frame.render_widget(
            ScoreGauge::new(record.score, record.classification),
            gauge_inner,
        );

        // Summary + key points.
        let right = Layout::vertical([Constraint::Length(6), Constraint::Min(4)]).split(cols[1]);

        let summary_block = theme::block_default("Executive Summary");
        let summary_inner = summary_block.inner(right[0]);
        frame.render_widget(summary_block, right[0]);
        frame.render_widget(
            Paragraph::new(record.summary.clone())
                .style(Style::default().fg(theme::TEXT))
                .wrap(Wrap { trim: true }),
            summary_inner,
        );

        let points_block = theme::block_default("Key Insights");
        let points_inner = points_block.inner(right[1]);
        frame.render_widget(points_block, right[1]);

        let lines: Vec<Line> = if record.key_points.is_empty() {
            vec![Line::styled("No key points extracted.", theme::dim())]
        } else {
            record
                .key_points
                .iter()
                .enumerate()
                .map(|(i, point)| {
                    Line::from(vec![
                        Span::styled(format!(" {}. ", i + 1), theme::heading()),
                        Span::styled(point.clone(), Style::default().fg(theme::TEXT)),
                    ])
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), points_inner);
    }

    fn render_sources(&self, frame: &mut Frame, area: Rect, record: &SentimentRecord) {
        let block = theme::block_default("Sources & Grounding (o to open)");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Keep the selection visible within the window.
        let visible = inner.height as usize;
        let offset = self
            .selected_source
            .saturating_sub(visible.saturating_sub(1));

        let lines: Vec<Line> = record
            .sources
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, source)| {
                let selected = i == self.selected_source;
                let marker = if selected { "▸ " } else { "  " };
                let title_style = if selected {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                Line::from(vec![
                    Span::styled(marker, theme::highlight()),
                    Span::styled(source.title.clone(), title_style),
                    Span::styled(format!("  — {}", source.hostname()), theme::dim()),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
