//! Night-tide palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const AQUA: Color = Color::Rgb(127, 219, 202); // #7fdbca
pub const AMBER: Color = Color::Rgb(255, 203, 107); // #ffcb6b
pub const ROSE: Color = Color::Rgb(255, 83, 112); // #ff5370
pub const MOSS: Color = Color::Rgb(195, 232, 141); // #c3e88d
pub const LILAC: Color = Color::Rgb(199, 146, 234); // #c792ea

// ── Extended Palette ──────────────────────────────────────────────────

pub const FOG: Color = Color::Rgb(214, 222, 235); // #d6deeb
pub const SLATE: Color = Color::Rgb(105, 112, 152); // #697098
pub const BG_HIGHLIGHT: Color = Color::Rgb(29, 59, 83); // #1d3b53

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(AQUA).add_modifier(Modifier::BOLD)
}

/// Panel border.
pub fn border_default() -> Style {
    Style::default().fg(SLATE)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(AQUA)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Header cell of the active sort column.
pub fn table_header_active() -> Style {
    Style::default()
        .fg(AMBER)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Header cell under the keyboard column cursor.
pub fn table_header_cursor() -> Style {
    Style::default()
        .fg(LILAC)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED | Modifier::REVERSED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(FOG)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default().bg(BG_HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Status-line text (fetch failures, empty-table notes).
pub fn status_dim() -> Style {
    Style::default().fg(SLATE)
}

/// Status-line error text.
pub fn status_error() -> Style {
    Style::default().fg(ROSE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(AQUA).add_modifier(Modifier::BOLD)
}

/// Search overlay text.
pub fn search_style() -> Style {
    Style::default().fg(AMBER)
}
