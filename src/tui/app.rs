//! Central application state and event loop (Elm architecture).
//!
//! `AppState` owns the four-state view controller. The view only changes
//! through the named transition handlers, and analysis results carry a
//! request generation so a stale in-flight request can never overwrite the
//! state of a newer one.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Notification, NotificationLevel, ViewState};
use super::layout::AppLayout;
use super::services::Services;
use super::theme;
use super::views::dashboard::{DashboardResult, DashboardState};
use super::views::trending::TrendingState;
use super::widgets::spinner;
use super::widgets::topic_input::{InputMode, TopicInput};
use crate::core::model::SentimentRecord;

/// The one user-facing failure message for sentiment analysis.
pub const ANALYSIS_ERROR_MESSAGE: &str = "Failed to analyze sentiment. Please try again later.";

/// Central application state.
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Current view; mutated only by the transition handlers below.
    view: ViewState,
    /// Topic search input.
    input: TopicInput,
    /// Whether keystrokes edit the topic or navigate.
    input_mode: InputMode,
    /// Trending grid state (loaded once at startup).
    trending: TrendingState,
    /// Results dashboard state.
    dashboard: DashboardState,
    /// Fixed user-facing message while in the Error state.
    error: Option<String>,
    /// Generation of the newest analysis request; older results are stale.
    generation: u64,
    /// Tick counter driving the spinner.
    tick: u64,
    /// Active notifications (max 3 visible).
    notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    show_help: bool,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender for pushing events from spawned tasks.
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        services: Services,
    ) -> Self {
        Self {
            running: true,
            view: ViewState::Idle,
            input: TopicInput::new(),
            input_mode: InputMode::Normal,
            trending: TrendingState::new(),
            dashboard: DashboardState::new(),
            error: None,
            generation: 0,
            tick: 0,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            event_tx,
            services,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_record(&self) -> Option<&SentimentRecord> {
        self.dashboard.record()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        // Trending loads once, outside the view state machine.
        self.request_trending();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => self.handle_input(crossterm_event),
            AppEvent::Tick => self.on_tick(),
            AppEvent::TrendsLoaded(topics) => {
                self.trending.set_topics(topics);
            }
            AppEvent::AnalysisReady { generation, record } => {
                self.on_analysis_ready(generation, *record);
            }
            AppEvent::AnalysisFailed { generation, reason } => {
                self.on_analysis_failed(generation, &reason);
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    fn handle_input(&mut self, event: Event) {
        let Some((code, modifiers)) = key_press(&event) else {
            return;
        };

        // Ctrl+C always quits.
        if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        // Priority 1: help modal consumes all input when open.
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        // Priority 2: insert mode edits the topic.
        if self.input_mode == InputMode::Insert {
            self.handle_insert_key(code, modifiers);
            return;
        }

        // Priority 3: the focused view.
        if self.dispatch_view_input(&event) {
            return;
        }

        // Priority 4: global keybindings.
        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('i') | KeyCode::Char('/') => {
                self.input_mode = InputMode::Insert;
            }
            _ => {}
        }
    }

    fn handle_insert_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                let topic = self.input.text().to_string();
                if !topic.trim().is_empty() {
                    self.input_mode = InputMode::Normal;
                    self.submit_topic(&topic);
                }
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert_char(c);
            }
            _ => {}
        }
    }

    /// Dispatch input to the current view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.view {
            ViewState::Idle => {
                if let Some(name) = self.trending.handle_input(event) {
                    // Fill the input for visual feedback, then analyze.
                    self.input.set_text(&name);
                    self.submit_topic(&name);
                    return true;
                }
                false
            }
            ViewState::Analyzed => match self.dashboard.handle_input(event) {
                Some(DashboardResult::Consumed) => true,
                Some(DashboardResult::OpenSource(uri)) => {
                    self.open_source(&uri);
                    true
                }
                None => false,
            },
            ViewState::Loading | ViewState::Error => false,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Analyze(topic) => self.submit_topic(&topic),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::OpenSelectedSource => {
                if let Some(uri) = self.dashboard.selected_uri().map(str::to_string) {
                    self.open_source(&uri);
                }
            }
            Action::Quit => self.running = false,
        }
    }

    // ── State transitions ───────────────────────────────────────────────

    /// Transition `* → Loading`.
    ///
    /// A blank topic is a strict no-op: no state change, no request. Any
    /// previous error and record are cleared before the request is issued;
    /// older in-flight requests become stale via the generation bump.
    pub fn submit_topic(&mut self, topic: &str) {
        let topic = topic.trim().to_string();
        if topic.is_empty() {
            return;
        }

        self.error = None;
        self.dashboard.clear();
        self.view = ViewState::Loading;
        self.generation += 1;
        let generation = self.generation;

        log::info!("submitting analysis #{generation} for {topic:?}");
        let analysis = self.services.analysis.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match analysis.analyze_sentiment(&topic).await {
                Ok(record) => {
                    let _ = tx.send(AppEvent::AnalysisReady {
                        generation,
                        record: Box::new(record),
                    });
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::AnalysisFailed {
                        generation,
                        reason: e.to_string(),
                    });
                }
            }
        });
    }

    /// Transition `Loading → Analyzed`. Stale results are discarded.
    pub fn on_analysis_ready(&mut self, generation: u64, record: SentimentRecord) {
        if generation != self.generation {
            log::debug!(
                "discarding stale analysis result #{generation} (current #{})",
                self.generation
            );
            return;
        }
        self.error = None;
        self.dashboard.set_record(record);
        self.view = ViewState::Analyzed;
    }

    /// Transition `Loading → Error`. Stale failures are discarded; the
    /// stored message is the fixed user-facing one, the cause only logged.
    pub fn on_analysis_failed(&mut self, generation: u64, reason: &str) {
        if generation != self.generation {
            log::debug!(
                "discarding stale analysis failure #{generation} (current #{})",
                self.generation
            );
            return;
        }
        log::error!("analysis #{generation} failed: {reason}");
        self.error = Some(ANALYSIS_ERROR_MESSAGE.to_string());
        self.view = ViewState::Error;
    }

    // ── Background requests ─────────────────────────────────────────────

    /// Fire the one-shot trending fetch. Independent of the view state
    /// machine; its failures are absorbed into fallback data upstream.
    fn request_trending(&self) {
        let analysis = self.services.analysis.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let topics = analysis.fetch_trending().await;
            let _ = tx.send(AppEvent::TrendsLoaded(topics));
        });
    }

    fn open_source(&mut self, uri: &str) {
        match open::that_detached(uri) {
            Ok(()) => {
                log::info!("opened source {uri}");
                self.push_notification("Opened link in browser".to_string(), NotificationLevel::Success);
            }
            Err(e) => {
                log::error!("failed to open {uri}: {e}");
                self.push_notification("Failed to open link".to_string(), NotificationLevel::Error);
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 30,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: advance the spinner, expire notifications.
    fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        if let Some(header_area) = layout.header {
            self.render_header(frame, header_area);
        }

        self.input.render(frame, layout.search, self.input_mode);
        self.render_content(frame, layout.content);
        self.render_status_bar(frame, layout.status);

        self.render_notifications(frame, area);
        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(" TrendPulse ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled("Decode the Internet's Emotion", theme::title()),
            Span::raw("  "),
            Span::styled("Powered by Gemini · Grounded with Google Search", theme::dim()),
        ]))
        .block(theme::block_default(""));
        frame.render_widget(header, area);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        match self.view {
            ViewState::Idle => self.trending.render(frame, area),
            ViewState::Loading => self.render_loading(frame, area),
            ViewState::Error => self.render_error(frame, area),
            ViewState::Analyzed => self.dashboard.render(frame, area),
        }
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("{} Reading the internet...", spinner::frame(self.tick)),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Gathering the latest news, opinions, and discussions.",
                theme::muted(),
            )),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(theme::block_default("")),
            area,
        );
    }

    fn render_error(&self, frame: &mut Frame, area: Rect) {
        let message = self.error.as_deref().unwrap_or(ANALYSIS_ERROR_MESSAGE);
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                "⚠",
                Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(theme::ERROR),
            )),
            Line::raw(""),
            Line::from(Span::styled("Press i to try another topic.", theme::muted())),
        ];

        let block = ratatui::widgets::Block::default()
            .borders(ratatui::widgets::Borders::ALL)
            .border_style(Style::default().fg(theme::ERROR));

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mode_indicator = match self.input_mode {
            InputMode::Insert => Span::styled(" INSERT ", theme::insert_badge()),
            InputMode::Normal => Span::raw(""),
        };

        let api_status = if self.view == ViewState::Loading {
            Span::styled("analyzing", Style::default().fg(theme::PRIMARY_LIGHT))
        } else {
            Span::styled("ready", Style::default().fg(theme::TEXT_MUTED))
        };

        let status = Line::from(vec![
            Span::styled(" TrendPulse ", theme::brand_badge()),
            Span::raw(" "),
            mode_indicator,
            Span::raw(" "),
            Span::styled(
                self.view.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled("Gemini:", theme::key_hint()),
            Span::raw(" "),
            api_status,
            Span::raw(" │ "),
            Span::styled("i", theme::key_hint()),
            Span::raw(":topic "),
            Span::styled("Enter", theme::key_hint()),
            Span::raw(":analyze "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(n.message.clone()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let keybindings = [
            ("Global:", ""),
            ("q / Ctrl+C", "Quit application"),
            ("?", "Toggle this help"),
            ("i / /", "Edit the topic"),
            ("Esc", "Close modal / leave input"),
            ("", ""),
            ("Topic input:", ""),
            ("Enter", "Analyze the typed topic"),
            ("", ""),
            ("Trending grid:", ""),
            ("h/j/k/l or arrows", "Move between cards"),
            ("Enter", "Analyze the selected topic"),
            ("", ""),
            ("Results:", ""),
            ("j/k", "Select a source"),
            ("o / Enter", "Open source in browser"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::title())),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<20}", key),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to close"),
        ]));

        let block = ratatui::widgets::Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(ratatui::widgets::Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Extract the code and modifiers of a key press, ignoring everything else.
fn key_press(event: &Event) -> Option<(KeyCode, KeyModifiers)> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => Some((*code, *modifiers)),
        _ => None,
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::AnalysisClient;
    use crate::core::model::Classification;
    use crate::core::provider::{GroundedProvider, GroundedReply, ProviderError};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Provider that always fails; transition tests drive the handlers
    /// directly, so no reply is ever needed.
    struct NeverProvider;

    #[async_trait]
    impl GroundedProvider for NeverProvider {
        fn id(&self) -> &str {
            "never"
        }

        fn model(&self) -> &str {
            "never"
        }

        async fn generate_grounded(
            &self,
            _prompt: &str,
        ) -> Result<GroundedReply, ProviderError> {
            Err(ProviderError::NotConfigured("test".to_string()))
        }
    }

    fn app() -> AppState {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let services = Services {
            analysis: AnalysisClient::new(Arc::new(NeverProvider)),
        };
        AppState::new(event_rx, event_tx, services)
    }

    fn record(topic: &str) -> SentimentRecord {
        SentimentRecord {
            topic: topic.to_string(),
            classification: Classification::Neutral,
            score: 0,
            summary: "s".to_string(),
            key_points: Vec::new(),
            sources: Vec::new(),
            analyzed_at: "10:00:00".to_string(),
            anomalies: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_initial_state_is_idle() {
        let app = app();
        assert_eq!(app.view(), ViewState::Idle);
        assert!(app.current_record().is_none());
        assert!(app.error_message().is_none());
    }

    #[tokio::test]
    async fn test_blank_submission_is_noop() {
        let mut app = app();
        app.submit_topic("   ");
        assert_eq!(app.view(), ViewState::Idle);
        assert_eq!(app.generation(), 0);
    }

    #[tokio::test]
    async fn test_submit_enters_loading_and_bumps_generation() {
        let mut app = app();
        app.submit_topic("Bitcoin");
        assert_eq!(app.view(), ViewState::Loading);
        assert_eq!(app.generation(), 1);
    }

    #[tokio::test]
    async fn test_success_transition() {
        let mut app = app();
        app.submit_topic("Bitcoin");
        app.on_analysis_ready(1, record("Bitcoin"));
        assert_eq!(app.view(), ViewState::Analyzed);
        assert_eq!(app.current_record().unwrap().topic, "Bitcoin");
    }

    #[tokio::test]
    async fn test_failure_transition_stores_fixed_message() {
        let mut app = app();
        app.submit_topic("Bitcoin");
        app.on_analysis_failed(1, "connection refused");
        assert_eq!(app.view(), ViewState::Error);
        assert_eq!(app.error_message(), Some(ANALYSIS_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_stale_result_is_discarded() {
        let mut app = app();
        app.submit_topic("first");
        app.submit_topic("second");
        assert_eq!(app.generation(), 2);

        // Result from the first request arrives last — must be dropped.
        app.on_analysis_ready(1, record("first"));
        assert_eq!(app.view(), ViewState::Loading);
        assert!(app.current_record().is_none());

        app.on_analysis_ready(2, record("second"));
        assert_eq!(app.view(), ViewState::Analyzed);
        assert_eq!(app.current_record().unwrap().topic, "second");
    }

    #[tokio::test]
    async fn test_stale_failure_is_discarded() {
        let mut app = app();
        app.submit_topic("first");
        app.submit_topic("second");
        app.on_analysis_failed(1, "old failure");
        assert_eq!(app.view(), ViewState::Loading);
        assert!(app.error_message().is_none());
    }

    #[tokio::test]
    async fn test_resubmit_from_error_clears_message() {
        let mut app = app();
        app.submit_topic("Bitcoin");
        app.on_analysis_failed(1, "boom");
        assert_eq!(app.view(), ViewState::Error);

        app.submit_topic("Ethereum");
        assert_eq!(app.view(), ViewState::Loading);
        assert!(app.error_message().is_none());
    }

    #[tokio::test]
    async fn test_resubmit_from_analyzed_clears_record() {
        let mut app = app();
        app.submit_topic("Bitcoin");
        app.on_analysis_ready(1, record("Bitcoin"));
        assert_eq!(app.view(), ViewState::Analyzed);

        app.submit_topic("Ethereum");
        assert_eq!(app.view(), ViewState::Loading);
        assert!(app.current_record().is_none());
    }

    #[tokio::test]
    async fn test_trends_loaded_does_not_touch_view_state() {
        let mut app = app();
        app.submit_topic("Bitcoin");
        app.handle_event(AppEvent::TrendsLoaded(AnalysisClient::fallback_trending()));
        assert_eq!(app.view(), ViewState::Loading);
        assert_eq!(app.trending.topics().len(), 3);
    }

    #[tokio::test]
    async fn test_notifications_dedup_and_cap() {
        let mut app = app();
        app.push_notification("same".to_string(), NotificationLevel::Info);
        app.push_notification("same".to_string(), NotificationLevel::Info);
        assert_eq!(app.notifications.len(), 1);

        for i in 0..5 {
            app.push_notification(format!("n{i}"), NotificationLevel::Info);
        }
        assert_eq!(app.notifications.len(), 3);
    }

    #[tokio::test]
    async fn test_tick_expires_notifications() {
        let mut app = app();
        app.push_notification("bye".to_string(), NotificationLevel::Info);
        for _ in 0..31 {
            app.on_tick();
        }
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_centered_rect_within_parent() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(50, 50, area);
        assert!(centered.x > 0);
        assert!(centered.y > 0);
        assert!(centered.x + centered.width <= area.width);
        assert!(centered.y + centered.height <= area.height);
    }

    #[tokio::test]
    async fn test_analyze_action_enters_loading() {
        let mut app = app();
        app.handle_event(AppEvent::Action(Action::Analyze("Bitcoin".to_string())));
        assert_eq!(app.view(), ViewState::Loading);
        assert_eq!(app.generation(), 1);
    }

    #[tokio::test]
    async fn test_insert_mode_enter_submits() {
        let mut app = app();
        app.input_mode = InputMode::Insert;
        for c in "Bitcoin".chars() {
            app.handle_insert_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.handle_insert_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.view(), ViewState::Loading);
        assert_eq!(app.input_mode, InputMode::Normal);
        // The topic stays in the box for visual feedback.
        assert_eq!(app.input.text(), "Bitcoin");
    }

    #[tokio::test]
    async fn test_insert_mode_enter_on_blank_does_nothing() {
        let mut app = app();
        app.input_mode = InputMode::Insert;
        app.handle_insert_key(KeyCode::Char(' '), KeyModifiers::NONE);
        app.handle_insert_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.view(), ViewState::Idle);
        // Still in insert mode: nothing was submitted.
        assert_eq!(app.input_mode, InputMode::Insert);
    }
}
