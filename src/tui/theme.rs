//! Centralized Midnight Blue & Violet color theme for the TrendPulse TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::model::Classification;

// ── Primary palette ─────────────────────────────────────────────────────────

/// Blue — primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x3B, 0x82, 0xF6);
/// Light blue — highlights, hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x60, 0xA5, 0xFA);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Violet — accent, calls to action, important items.
pub const ACCENT: Color = Color::Rgb(0x8B, 0x5C, 0xF6);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Deep slate — base background.
pub const BG_BASE: Color = Color::Rgb(0x0F, 0x17, 0x2A);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE2, 0xE8, 0xF0);
/// Muted text — secondary labels, borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x94, 0xA3, 0xB8);
/// Dim text — disabled items, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x47, 0x55, 0x69);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error / strongly negative sentiment.
pub const ERROR: Color = Color::Rgb(0xF4, 0x3F, 0x5E);
/// Success / strongly positive sentiment.
pub const SUCCESS: Color = Color::Rgb(0x10, 0xB9, 0x81);
/// Warning — degraded status, low-confidence notes.
pub const WARNING: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
/// Info / balanced sentiment.
pub const INFO: Color = Color::Rgb(0x38, 0xBD, 0xF8);

// ── Domain helpers ──────────────────────────────────────────────────────────

/// Gauge/score color: strongly positive green, strongly negative red,
/// balanced blue.
pub fn score_color(score: i32) -> Color {
    if score > 25 {
        SUCCESS
    } else if score < -25 {
        ERROR
    } else {
        INFO
    }
}

/// Badge color for a classification label.
pub fn classification_color(classification: Classification) -> Color {
    match classification {
        Classification::Positive => SUCCESS,
        Classification::Negative => ERROR,
        Classification::Neutral => PRIMARY,
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent-colored bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Focused border style.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Unfocused border style.
pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Dim text for disabled/faint items.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Insert mode badge.
pub fn insert_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}
