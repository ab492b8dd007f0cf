//! Events flowing through the Elm-architecture event loop, plus the
//! four-state view controller type.

use crate::core::model::{SentimentRecord, TrendingTopic};

/// Events delivered to the app's event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Periodic tick for the spinner and notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Trending list finished loading (fallback already applied inside).
    TrendsLoaded(Vec<TrendingTopic>),
    /// A sentiment analysis completed.
    AnalysisReady {
        generation: u64,
        record: Box<SentimentRecord>,
    },
    /// A sentiment analysis failed.
    AnalysisFailed { generation: u64, reason: String },
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Analyze the given topic (from the input field or a trend card).
    Analyze(String),
    ShowHelp,
    CloseHelp,
    OpenSelectedSource,
    Quit,
}

/// What the content area currently shows. Only the app's transition
/// handlers mutate this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Startup state; shows the trending grid once loaded.
    #[default]
    Idle,
    /// An analysis request is in flight.
    Loading,
    /// A parsed record is on screen.
    Analyzed,
    /// The last analysis failed.
    Error,
}

impl ViewState {
    pub fn label(self) -> &'static str {
        match self {
            ViewState::Idle => "Trending",
            ViewState::Loading => "Analyzing",
            ViewState::Analyzed => "Results",
            ViewState::Error => "Error",
        }
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
