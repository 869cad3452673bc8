// Banner rendering module
//
// Renders the one-line navigation header above the page.

use crate::app::AppState;
use crate::theme::Chrome;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const NAV: [&str; 5] = ["About", "Services", "Projects", "Skills", "Contact"];

pub fn render_banner(f: &mut Frame, area: Rect, app: &AppState, chrome: &Chrome) {
    let mode_icon = if app.theme.is_dark() { "☾" } else { "☀" };

    let mut spans = vec![
        Span::styled(
            " pointfield ",
            Style::default()
                .fg(chrome.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(chrome.border)),
    ];
    for item in NAV {
        spans.push(Span::styled(item, Style::default().fg(chrome.muted)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(mode_icon, Style::default().fg(chrome.text)));

    let banner = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(chrome.background))
        .alignment(Alignment::Left);

    f.render_widget(banner, area);
}
