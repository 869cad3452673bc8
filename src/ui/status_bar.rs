// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts and state indicators.

use crate::app::AppState;
use crate::schedule::RunState;
use crate::theme::Chrome;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// A key hint; lower priority numbers are kept first when space runs out
struct Hint {
    priority: u8,
    key: &'static str,
    desc: &'static str,
}

static HINTS: [Hint; 7] = [
    Hint {
        priority: 1,
        key: "Q:",
        desc: "Quit | ",
    },
    Hint {
        priority: 1,
        key: "D:",
        desc: "Theme | ",
    },
    Hint {
        priority: 1,
        key: "G:",
        desc: "Preset | ",
    },
    Hint {
        priority: 2,
        key: "I:",
        desc: "Interact | ",
    },
    Hint {
        priority: 2,
        key: "+/-:",
        desc: "Speed | ",
    },
    Hint {
        priority: 3,
        key: "[/]:",
        desc: "Reach | ",
    },
    Hint {
        priority: 3,
        key: "↑↓:",
        desc: "Scroll ",
    },
];

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState, chrome: &Chrome) {
    let indicators = build_indicators(app, chrome);
    let indicator_width: usize = indicators.iter().map(|s| s.width()).sum();

    // Hints only get what the indicators leave over (borders take 2)
    let available_width = (area.width as usize)
        .saturating_sub(2)
        .saturating_sub(indicator_width + 1);

    let mut spans = Vec::new();
    for hint in visible_hints(available_width) {
        spans.push(Span::styled(
            hint.key,
            Style::default()
                .fg(chrome.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(hint.desc, Style::default().fg(chrome.text)));
    }

    spans.push(Span::raw(" "));
    spans.extend(indicators);

    let status_bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(chrome.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(chrome.border)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

/// Hints that fit into `available_width`, in display order
fn visible_hints(available_width: usize) -> Vec<&'static Hint> {
    let mut used = 0;
    let mut chosen = Vec::new();

    for priority in 1..=3 {
        for (index, hint) in HINTS.iter().enumerate() {
            if hint.priority != priority {
                continue;
            }
            let hint_width = hint.key.chars().count() + hint.desc.chars().count();
            if used + hint_width <= available_width {
                chosen.push((index, hint));
                used += hint_width;
            }
        }
    }

    chosen.sort_by_key(|(index, _)| *index);
    chosen.into_iter().map(|(_, hint)| hint).collect()
}

/// Build state indicator spans for the status bar
///
/// Shows [▶ Active|⏸ Paused] [N pts] [dark|light] [preset] [I:ON/OFF]
/// [x speed] [reach], plus [reduced] when the performance guard kicked in.
pub fn build_indicators(app: &AppState, chrome: &Chrome) -> Vec<Span<'static>> {
    let bracket = Style::default().fg(chrome.muted);
    let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    let mut push = |text: String, color: Color| {
        spans.push(Span::styled("[", bracket));
        spans.push(Span::styled(text, value(color)));
        spans.push(Span::styled("] ", bracket));
    };

    let state = app.backdrop.state();
    let (state_icon, state_color) = match state {
        RunState::Active => ("▶", chrome.accent),
        RunState::Paused => ("⏸", chrome.muted),
    };
    push(format!("{} {}", state_icon, state.label()), state_color);
    push(format!("{} pts", app.backdrop.point_count()), chrome.text);
    push(app.theme.mode().as_str().to_string(), chrome.text);
    push(app.settings.preset.label().to_string(), chrome.text);

    let (interactive_text, interactive_color) = if app.settings.interactive {
        ("I:ON", chrome.accent)
    } else {
        ("I:OFF", chrome.muted)
    };
    push(interactive_text.to_string(), interactive_color);
    push(format!("x{:.1}", app.settings.speed), chrome.text);
    push(format!("{:.0}px", app.settings.connection_distance), chrome.text);

    if app.animation_reduced {
        push("reduced".to_string(), Color::Yellow);
    }

    spans
}
