// Terminal event handling
//
// Keyboard, mouse and focus events update the application state. None of the
// handlers draw; the next frame picks the changes up.

use super::AppState;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEvent, MouseEventKind};
use std::time::Instant;

/// Dispatch a terminal event
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
pub fn handle_event(app: &mut AppState, event: Event, now: Instant) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            handle_key_event(app, key.code, now)
        }
        Event::Mouse(mouse) => {
            handle_mouse_event(app, mouse);
            true
        }
        Event::FocusGained => {
            app.set_focused(true, now);
            true
        }
        Event::FocusLost => {
            app.set_focused(false, now);
            true
        }
        // The layout pass picks up the new canvas size on the next draw
        Event::Resize(_, _) => true,
        _ => true,
    }
}

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q`, `Esc` - Quit the application
/// - `d`, `D` - Toggle dark/light mode
/// - `g`, `G` - Switch background preset (Network/Geometric)
/// - `i`, `I` - Toggle pointer interaction
/// - `+`, `=` - Speed up points
/// - `-`, `_` - Slow down points
/// - `]` - Widen connection distance
/// - `[` - Narrow connection distance
/// - `Up`/`Down`, `PageUp`/`PageDown`, `Home` - Scroll the page
pub fn handle_key_event(app: &mut AppState, key: KeyCode, now: Instant) -> bool {
    match key {
        // Quit on 'q', 'Q', or Esc
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.shutdown();
            false
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            app.toggle_theme(now);
            true
        }
        // Field changes give full complexity another try
        KeyCode::Char('g') | KeyCode::Char('G') => {
            app.reset_animation_reduction();
            app.cycle_preset(now);
            true
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            app.reset_animation_reduction();
            app.toggle_interactive(now);
            true
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.reset_animation_reduction();
            app.increase_speed(now);
            true
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.reset_animation_reduction();
            app.decrease_speed(now);
            true
        }
        KeyCode::Char(']') => {
            app.reset_animation_reduction();
            app.widen_connections(now);
            true
        }
        KeyCode::Char('[') => {
            app.reset_animation_reduction();
            app.narrow_connections(now);
            true
        }
        KeyCode::Up => {
            app.scroll_up();
            true
        }
        KeyCode::Down => {
            app.scroll_down();
            true
        }
        KeyCode::PageUp => {
            app.page_up();
            true
        }
        KeyCode::PageDown => {
            app.page_down();
            true
        }
        KeyCode::Home => {
            app.scroll_home();
            true
        }
        _ => true,
    }
}

/// Track the pointer over the canvas
pub fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.pointer_at(mouse.column, mouse.row);
        }
        MouseEventKind::ScrollUp => app.scroll_up(),
        MouseEventKind::ScrollDown => app.scroll_down(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CanvasViewport;
    use crate::field::Preset;
    use crate::schedule::RunState;
    use crate::theme::store::MemoryThemeStore;
    use crate::theme::{ThemeMode, ThemeState};
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;

    fn mounted_app(now: Instant) -> AppState {
        let mut app = AppState::new(ThemeState::init(Box::new(MemoryThemeStore::default()), None));
        app.sync_viewport(
            CanvasViewport {
                cols: 100,
                rows: 40,
                hidden_rows: 0,
                visible: Rect::new(0, 1, 100, 40),
            },
            now,
        );
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        let now = Instant::now();
        for key in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            let mut app = mounted_app(now);
            assert!(app.running);
            assert!(!handle_key_event(&mut app, key, now));
            assert!(!app.running);
            assert!(!app.backdrop.is_mounted());
        }
    }

    #[test]
    fn test_toggle_theme() {
        let now = Instant::now();
        let mut app = mounted_app(now);
        assert_eq!(app.theme.mode(), ThemeMode::Light);

        handle_key_event(&mut app, KeyCode::Char('d'), now);
        assert_eq!(app.theme.mode(), ThemeMode::Dark);

        handle_key_event(&mut app, KeyCode::Char('D'), now);
        assert_eq!(app.theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_switch_preset() {
        let now = Instant::now();
        let mut app = mounted_app(now);

        handle_key_event(&mut app, KeyCode::Char('g'), now);
        assert_eq!(app.settings.preset, Preset::Geometric);
        assert_eq!(app.backdrop.config().preset, Preset::Geometric);
        assert!(app.backdrop.is_mounted());

        handle_key_event(&mut app, KeyCode::Char('G'), now);
        assert_eq!(app.settings.preset, Preset::Network);
    }

    #[test]
    fn test_toggle_interactive_drops_pointer() {
        let now = Instant::now();
        let mut app = mounted_app(now);
        handle_mouse_event(&mut app, mouse(MouseEventKind::Moved, 10, 10));
        assert!(app.backdrop.pointer().is_some());

        handle_key_event(&mut app, KeyCode::Char('i'), now);
        assert!(!app.settings.interactive);
        assert_eq!(app.backdrop.pointer(), None);

        handle_mouse_event(&mut app, mouse(MouseEventKind::Moved, 12, 10));
        assert_eq!(app.backdrop.pointer(), None);
    }

    #[test]
    fn test_speed_and_distance_keys() {
        let now = Instant::now();
        let mut app = mounted_app(now);

        handle_key_event(&mut app, KeyCode::Char('+'), now);
        assert!((app.settings.speed - 0.4).abs() < 1e-9);
        handle_key_event(&mut app, KeyCode::Char('-'), now);
        handle_key_event(&mut app, KeyCode::Char('_'), now);
        assert!((app.settings.speed - 0.2).abs() < 1e-9);

        handle_key_event(&mut app, KeyCode::Char(']'), now);
        assert_eq!(app.backdrop.config().connection_distance, 160.0);
        handle_key_event(&mut app, KeyCode::Char('['), now);
        handle_key_event(&mut app, KeyCode::Char('['), now);
        assert_eq!(app.backdrop.config().connection_distance, 140.0);
    }

    #[test]
    fn test_scroll_keys() {
        let now = Instant::now();
        let mut app = mounted_app(now);
        app.max_scroll = 30;

        handle_key_event(&mut app, KeyCode::Down, now);
        assert_eq!(app.scroll, 1);
        handle_key_event(&mut app, KeyCode::PageDown, now);
        assert_eq!(app.scroll, 11);
        handle_key_event(&mut app, KeyCode::PageDown, now);
        handle_key_event(&mut app, KeyCode::PageDown, now);
        assert_eq!(app.scroll, 30);
        handle_key_event(&mut app, KeyCode::PageUp, now);
        assert_eq!(app.scroll, 20);
        handle_key_event(&mut app, KeyCode::Home, now);
        assert_eq!(app.scroll, 0);
        handle_key_event(&mut app, KeyCode::Up, now);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_focus_events_pause_and_resume() {
        let now = Instant::now();
        let mut app = mounted_app(now);

        assert!(handle_event(&mut app, Event::FocusLost, now));
        assert_eq!(app.backdrop.state(), RunState::Paused);
        assert!(handle_event(&mut app, Event::FocusGained, now));
        assert_eq!(app.backdrop.state(), RunState::Active);
    }

    #[test]
    fn test_mouse_leaving_canvas_clears_pointer() {
        let now = Instant::now();
        let mut app = mounted_app(now);

        handle_event(&mut app, Event::Mouse(mouse(MouseEventKind::Moved, 3, 2)), now);
        assert_eq!(app.backdrop.pointer(), Some((28.0, 24.0)));

        handle_event(&mut app, Event::Mouse(mouse(MouseEventKind::Moved, 3, 45)), now);
        assert_eq!(app.backdrop.pointer(), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let now = Instant::now();
        let mut app = mounted_app(now);
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        assert!(handle_event(&mut app, Event::Key(release), now));
        assert!(app.running);
        assert!(!handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            now
        ));
    }
}
