// UI rendering module
//
// This module contains all UI rendering components for pointfield.
// The main draw() function lays out the header, the scrollable page with the
// animated hero backdrop, and the status bar.

mod backdrop;
mod banner;
mod page;
mod status_bar;

use crate::app::AppState;
use crate::theme::chrome;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};
use std::time::Instant;

use banner::render_banner;
use page::render_page;
use status_bar::render_status_bar;

/// Main UI drawing function
///
/// Also the layout pass: the page reports where the canvas ended up, which
/// mounts, resizes, pauses or resumes the point field.
pub fn draw(f: &mut Frame, app: &mut AppState, now: Instant) {
    let size = f.area();
    let chrome = chrome(app.theme.mode());

    f.render_widget(
        Block::default().style(Style::default().bg(chrome.background)),
        size,
    );

    // Main layout: banner, page, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Banner
            Constraint::Min(0),    // Page
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_banner(f, chunks[0], app, &chrome);
    render_page(f, chunks[1], app, &chrome, now);
    render_status_bar(f, chunks[2], app, &chrome);
}
