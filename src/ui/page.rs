// Page rendering module
//
// The page is a full-height hero with the animated backdrop, followed by
// static content sections. Scrolling moves the hero up and out of view;
// the part of the hero still on screen decides whether the field animates.

use crate::app::{AppState, CanvasViewport};
use crate::theme::Chrome;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

use super::backdrop::render_backdrop;
use crate::app::config::CELL_HEIGHT_PX;

/// Text centered over the hero
const HERO_LINES: [&str; 3] = [
    "Hi, I'm Alex Morgan",
    "Full-stack developer building fast, accessible web experiences",
    "scroll down to see more",
];

/// Static content below the hero
struct Section {
    title: &'static str,
    body: &'static [&'static str],
}

const SECTIONS: &[Section] = &[
    Section {
        title: "About",
        body: &[
            "Developer and designer with a focus on interactive front ends.",
            "Based in Berlin, working remotely with teams across Europe.",
        ],
    },
    Section {
        title: "Services",
        body: &[
            "Web applications, design systems, performance audits.",
            "Workshops on animation and rendering in the browser.",
        ],
    },
    Section {
        title: "Projects",
        body: &[
            "Realtime dashboard for a logistics startup.",
            "Open-source component library with 2k stars.",
            "Generative art experiments on canvas.",
        ],
    },
    Section {
        title: "Skills",
        body: &["TypeScript, Rust, WebGL, accessibility, UX writing."],
    },
    Section {
        title: "Contact",
        body: &["hello@example.com"],
    },
];

/// Where everything on the page lands for a given scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub viewport: CanvasViewport,
    /// Screen area left for the content sections
    pub content: Rect,
    /// Rows of content scrolled past
    pub content_scroll: u16,
    pub max_scroll: u16,
}

impl PageLayout {
    /// Lay the page out in `area`
    ///
    /// The hero is as tall as the page area itself.
    pub fn compute(area: Rect, scroll: u16, content_height: u16) -> Self {
        let hero_rows = area.height;
        let max_scroll = content_height;
        let scroll = scroll.min(max_scroll);

        let hidden_rows = scroll.min(hero_rows);
        let visible_rows = hero_rows - hidden_rows;

        Self {
            viewport: CanvasViewport {
                cols: area.width,
                rows: hero_rows,
                hidden_rows,
                visible: Rect::new(area.x, area.y, area.width, visible_rows),
            },
            content: Rect::new(area.x, area.y + visible_rows, area.width, hidden_rows),
            content_scroll: scroll.saturating_sub(hero_rows),
            max_scroll,
        }
    }
}

fn content_lines(chrome: &Chrome) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in SECTIONS {
        lines.push(Line::from(Span::styled(
            format!("  {}", section.title),
            Style::default()
                .fg(chrome.accent)
                .add_modifier(Modifier::BOLD),
        )));
        for body in section.body {
            lines.push(Line::from(Span::styled(
                format!("    {}", body),
                Style::default().fg(chrome.text),
            )));
        }
        lines.push(Line::from(""));
    }
    lines
}

pub fn render_page(f: &mut Frame, area: Rect, app: &mut AppState, chrome: &Chrome, now: Instant) {
    let lines = content_lines(chrome);
    let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let layout = PageLayout::compute(area, app.scroll, content_height);

    app.max_scroll = layout.max_scroll;
    app.scroll = app.scroll.min(layout.max_scroll);
    app.sync_viewport(layout.viewport, now);

    let viewport = layout.viewport;
    if let Some(list) = app.backdrop.display_list() {
        render_backdrop(
            f,
            viewport.visible,
            list,
            viewport.hidden_rows as f64 * CELL_HEIGHT_PX,
        );
    }
    render_hero_text(f, viewport, chrome);

    if layout.content.height > 0 {
        let content = Paragraph::new(lines)
            .style(Style::default().bg(chrome.background))
            .wrap(Wrap { trim: false })
            .scroll((layout.content_scroll, 0));
        f.render_widget(content, layout.content);
    }
}

/// Hero headline, moving up with the hero as the page scrolls
fn render_hero_text(f: &mut Frame, viewport: CanvasViewport, chrome: &Chrome) {
    let first_row = (viewport.rows / 2).saturating_sub(1);
    let styles = [
        Style::default()
            .fg(chrome.text)
            .add_modifier(Modifier::BOLD),
        Style::default().fg(chrome.accent),
        Style::default().fg(chrome.muted),
    ];

    for (i, (text, style)) in HERO_LINES.iter().zip(styles).enumerate() {
        let hero_row = first_row + (i as u16) * 2;
        if hero_row < viewport.hidden_rows || hero_row >= viewport.rows {
            continue;
        }
        let width = (text.chars().count() as u16).min(viewport.cols);
        let x = viewport.visible.x + (viewport.cols - width) / 2;
        let y = viewport.visible.y + hero_row - viewport.hidden_rows;
        let area = Rect::new(x, y, width, 1);

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(*text, style))).alignment(Alignment::Center),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect {
        x: 0,
        y: 1,
        width: 80,
        height: 20,
    };

    #[test]
    fn test_top_of_page_shows_whole_hero() {
        let layout = PageLayout::compute(AREA, 0, 30);
        assert_eq!(layout.viewport.visible, AREA);
        assert_eq!(layout.viewport.intersection_ratio(), 1.0);
        assert_eq!(layout.content.height, 0);
    }

    #[test]
    fn test_scrolling_splits_hero_and_content() {
        let layout = PageLayout::compute(AREA, 5, 30);
        assert_eq!(layout.viewport.hidden_rows, 5);
        assert_eq!(layout.viewport.visible, Rect::new(0, 1, 80, 15));
        assert_eq!(layout.content, Rect::new(0, 16, 80, 5));
        assert_eq!(layout.content_scroll, 0);
        assert_eq!(layout.viewport.intersection_ratio(), 0.75);
    }

    #[test]
    fn test_hero_scrolled_away() {
        let layout = PageLayout::compute(AREA, 25, 30);
        assert_eq!(layout.viewport.visible.height, 0);
        assert_eq!(layout.viewport.intersection_ratio(), 0.0);
        assert_eq!(layout.content, AREA);
        assert_eq!(layout.content_scroll, 5);
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let layout = PageLayout::compute(AREA, 500, 30);
        assert_eq!(layout.max_scroll, 30);
        assert_eq!(layout.content_scroll, 10);
    }

    #[test]
    fn test_content_has_every_section() {
        let chrome = crate::theme::chrome(crate::theme::ThemeMode::Dark);
        let lines = content_lines(&chrome);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        for section in SECTIONS {
            assert!(text.iter().any(|l| l.trim() == section.title));
        }
    }
}
