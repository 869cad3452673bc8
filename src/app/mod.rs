// Application state management
//
// This module contains the main AppState struct and re-exports
// configuration types from the config submodule.

pub mod config;
pub mod event;

// Re-export config types for convenience
pub use config::{FieldSettings, FrameConfig};

use crate::field::{AnimatedPointField, CanvasSize};
use crate::theme::{field_colors, page_background, ThemeMode, ThemeState};
use config::{
    CELL_HEIGHT_PX, CELL_WIDTH_PX, FRAME_TIME_THRESHOLD_MS, PAGE_SCROLL_STEP, SCROLL_STEP,
    SLOW_FRAME_COUNT_THRESHOLD,
};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// Where the backdrop canvas currently sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasViewport {
    /// Full canvas size in terminal cells
    pub cols: u16,
    pub rows: u16,
    /// Rows of the canvas scrolled off the top of the screen
    pub hidden_rows: u16,
    /// On-screen rectangle of the visible part (may be empty)
    pub visible: Rect,
}

impl CanvasViewport {
    /// Canvas size in virtual pixels
    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(
            self.cols as f64 * CELL_WIDTH_PX,
            self.rows as f64 * CELL_HEIGHT_PX,
        )
    }

    /// Fraction of the canvas inside the terminal viewport
    pub fn intersection_ratio(&self) -> f64 {
        if self.rows == 0 || self.cols == 0 {
            return 0.0;
        }
        self.visible.height as f64 / self.rows as f64
    }

    /// Map a terminal cell to the center of that cell in canvas pixels
    pub fn cell_to_canvas(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let v = self.visible;
        if v.width == 0
            || v.height == 0
            || column < v.x
            || row < v.y
            || column >= v.x + v.width
            || row >= v.y + v.height
        {
            return None;
        }
        let x = (column - v.x) as f64 * CELL_WIDTH_PX + CELL_WIDTH_PX / 2.0;
        let y = (row - v.y + self.hidden_rows) as f64 * CELL_HEIGHT_PX + CELL_HEIGHT_PX / 2.0;
        Some((x, y))
    }
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// Dark/light mode with persistence
    pub theme: ThemeState,

    /// User-adjustable field settings
    pub settings: FieldSettings,

    /// Frame pacing
    pub frame_config: FrameConfig,

    /// The animated backdrop behind the hero section
    pub backdrop: AnimatedPointField,

    /// Page scroll offset in rows
    pub scroll: u16,

    /// Largest useful scroll offset, updated by the UI on each draw
    pub max_scroll: u16,

    /// Whether the terminal has focus (document visibility)
    pub focused: bool,

    /// Where the canvas was laid out on the last draw
    pub viewport: Option<CanvasViewport>,

    /// Counter for consecutive slow frames (frame time > 100ms)
    /// Used to trigger automatic animation complexity reduction
    slow_frame_count: u32,

    /// Whether animation complexity has been auto-reduced due to performance
    /// When true, the point field runs with half its point budget
    pub animation_reduced: bool,
}

impl AppState {
    /// Create a new AppState with default settings
    pub fn new(theme: ThemeState) -> Self {
        let settings = FieldSettings::default();
        let frame_config = FrameConfig::default();
        let backdrop = build_backdrop(&settings, theme.mode(), &frame_config);

        Self {
            running: true,
            theme,
            settings,
            frame_config,
            backdrop,
            scroll: 0,
            max_scroll: 0,
            focused: true,
            viewport: None,
            slow_frame_count: 0,
            animation_reduced: false,
        }
    }

    /// Run the animation frame if one is due
    ///
    /// Returns whether a new frame was drawn.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.backdrop.tick(now)
    }

    /// How long the event loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.backdrop.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => self.frame_config.idle_interval(),
        }
    }

    /// Layout pass reported where the canvas is
    ///
    /// Mounts the field on first layout, regenerates it when the canvas
    /// changed size and feeds the viewport intersection to the scheduler.
    pub fn sync_viewport(&mut self, viewport: CanvasViewport, now: Instant) {
        if !self.running {
            return;
        }
        let was_mounted = self.backdrop.is_mounted();
        self.backdrop.resize(viewport.canvas_size(), now);
        if !was_mounted && self.backdrop.is_mounted() {
            self.backdrop.set_document_visible(self.focused, now);
        }
        self.backdrop
            .set_intersection_ratio(viewport.intersection_ratio(), now);
        self.viewport = Some(viewport);
    }

    /// Terminal focus changed
    pub fn set_focused(&mut self, focused: bool, now: Instant) {
        self.focused = focused;
        self.backdrop.set_document_visible(focused, now);
    }

    /// Mouse moved to a terminal cell
    pub fn pointer_at(&mut self, column: u16, row: u16) {
        match self
            .viewport
            .and_then(|viewport| viewport.cell_to_canvas(column, row))
        {
            Some((x, y)) => self.backdrop.pointer_moved(x, y),
            None => self.backdrop.pointer_left(),
        }
    }

    pub fn toggle_theme(&mut self, now: Instant) {
        let mode = self.theme.toggle();
        tracing::info!(mode = mode.as_str(), "Theme toggled");
        self.remount(now);
    }

    pub fn cycle_preset(&mut self, now: Instant) {
        self.settings.cycle_preset();
        self.remount(now);
    }

    pub fn toggle_interactive(&mut self, now: Instant) {
        self.settings.interactive = !self.settings.interactive;
        self.remount(now);
    }

    pub fn increase_speed(&mut self, now: Instant) {
        self.settings.faster();
        self.remount(now);
    }

    pub fn decrease_speed(&mut self, now: Instant) {
        self.settings.slower();
        self.remount(now);
    }

    pub fn widen_connections(&mut self, now: Instant) {
        self.settings.wider();
        self.remount(now);
    }

    pub fn narrow_connections(&mut self, now: Instant) {
        self.settings.narrower();
        self.remount(now);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(SCROLL_STEP).min(self.max_scroll);
    }

    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(PAGE_SCROLL_STEP);
    }

    pub fn page_down(&mut self) {
        self.scroll = self.scroll.saturating_add(PAGE_SCROLL_STEP).min(self.max_scroll);
    }

    pub fn scroll_home(&mut self) {
        self.scroll = 0;
    }

    /// Tear the field down; nothing runs after this
    pub fn shutdown(&mut self) {
        self.backdrop.unmount();
        self.running = false;
    }

    /// Replace the backdrop after a configuration change
    ///
    /// The new field starts from scratch (fresh points, first frame right
    /// away) on the same canvas and with the same visibility.
    fn remount(&mut self, now: Instant) {
        self.backdrop.unmount();
        self.backdrop = build_backdrop(&self.settings, self.theme.mode(), &self.frame_config);
        self.backdrop.set_reduced(self.animation_reduced);

        if let Some(viewport) = self.viewport {
            self.backdrop.mount(viewport.canvas_size(), now);
            self.backdrop.set_document_visible(self.focused, now);
            self.backdrop
                .set_intersection_ratio(viewport.intersection_ratio(), now);
        }
        tracing::debug!(
            preset = self.settings.preset.label(),
            speed = self.settings.speed,
            distance = self.settings.connection_distance,
            interactive = self.settings.interactive,
            "Point field remounted"
        );
    }

    /// Record how long the last frame took and auto-reduce if needed
    ///
    /// If frame time consistently exceeds FRAME_TIME_THRESHOLD_MS (100ms),
    /// the point field's budget is halved until the settings change.
    pub fn record_frame_time(&mut self, frame_time: Duration) {
        let frame_time = frame_time.as_millis();

        if frame_time > FRAME_TIME_THRESHOLD_MS {
            self.slow_frame_count += 1;

            if self.slow_frame_count >= SLOW_FRAME_COUNT_THRESHOLD && !self.animation_reduced {
                self.animation_reduced = true;
                self.backdrop.set_reduced(true);
                tracing::info!(
                    frame_time_ms = frame_time,
                    slow_frame_count = self.slow_frame_count,
                    "Auto-reducing point budget due to slow frame times"
                );
            }
        } else if !self.animation_reduced {
            self.slow_frame_count = 0;
        }
    }

    /// Reset animation complexity reduction
    ///
    /// Called when the user changes the field, so full complexity is tried again.
    pub fn reset_animation_reduction(&mut self) {
        self.animation_reduced = false;
        self.slow_frame_count = 0;
        self.backdrop.set_reduced(false);
    }
}

fn build_backdrop(
    settings: &FieldSettings,
    mode: ThemeMode,
    frame_config: &FrameConfig,
) -> AnimatedPointField {
    let mut backdrop = AnimatedPointField::new(
        settings.field_config(),
        field_colors(settings.preset, mode),
        frame_config.frame_interval(),
    );
    backdrop.set_backdrop(page_background(mode));
    backdrop
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Preset;
    use crate::schedule::RunState;
    use crate::theme::store::MemoryThemeStore;
    use proptest::prelude::*;

    fn app() -> AppState {
        AppState::new(ThemeState::init(Box::new(MemoryThemeStore::default()), None))
    }

    fn viewport(cols: u16, rows: u16, hidden_rows: u16) -> CanvasViewport {
        CanvasViewport {
            cols,
            rows,
            hidden_rows,
            visible: Rect::new(0, 1, cols, rows.saturating_sub(hidden_rows)),
        }
    }

    #[test]
    fn test_first_layout_mounts_field() {
        let mut app = app();
        let now = Instant::now();
        assert!(!app.backdrop.is_mounted());

        app.sync_viewport(viewport(200, 50, 0), now);
        assert!(app.backdrop.is_mounted());
        assert_eq!(app.backdrop.state(), RunState::Active);
        assert_eq!(app.backdrop.point_count(), 70);
        assert!(app.on_tick(now));
    }

    #[test]
    fn test_zero_sized_terminal_renders_nothing() {
        let mut app = app();
        let now = Instant::now();
        app.sync_viewport(viewport(0, 0, 0), now);
        assert!(!app.backdrop.is_mounted());
        assert!(app.backdrop.display_list().is_none());
        assert!(!app.on_tick(now));
        assert_eq!(app.poll_timeout(now), app.frame_config.idle_interval());
    }

    #[test]
    fn test_scrolling_hero_away_pauses() {
        let mut app = app();
        let now = Instant::now();
        app.sync_viewport(viewport(100, 40, 0), now);

        app.sync_viewport(viewport(100, 40, 38), now);
        assert_eq!(app.backdrop.state(), RunState::Paused);

        app.sync_viewport(viewport(100, 40, 10), now);
        assert_eq!(app.backdrop.state(), RunState::Active);
    }

    #[test]
    fn test_focus_loss_pauses() {
        let mut app = app();
        let now = Instant::now();
        app.sync_viewport(viewport(100, 40, 0), now);

        app.set_focused(false, now);
        assert_eq!(app.backdrop.state(), RunState::Paused);
        assert!(!app.on_tick(now + Duration::from_secs(1)));

        app.set_focused(true, now);
        assert_eq!(app.backdrop.state(), RunState::Active);
    }

    #[test]
    fn test_remount_keeps_visibility() {
        let mut app = app();
        let now = Instant::now();
        app.sync_viewport(viewport(100, 40, 0), now);
        app.set_focused(false, now);

        app.increase_speed(now);
        assert!(app.backdrop.is_mounted());
        assert_eq!(app.backdrop.state(), RunState::Paused);
        assert!((app.backdrop.config().speed - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_theme_toggle_switches_palette() {
        let mut app = app();
        let now = Instant::now();
        app.sync_viewport(viewport(100, 40, 0), now);
        assert_eq!(app.theme.mode(), ThemeMode::Light);

        app.toggle_theme(now);
        assert_eq!(app.theme.mode(), ThemeMode::Dark);
        assert_eq!(
            *app.backdrop.colors(),
            field_colors(Preset::Network, ThemeMode::Dark)
        );
    }

    #[test]
    fn test_pointer_mapping() {
        let mut app = app();
        let now = Instant::now();
        app.sync_viewport(viewport(100, 40, 0), now);

        app.pointer_at(10, 5);
        assert_eq!(app.backdrop.pointer(), Some((84.0, 72.0)));

        // Outside the canvas clears the pointer
        app.pointer_at(10, 0);
        assert_eq!(app.backdrop.pointer(), None);
    }

    #[test]
    fn test_pointer_mapping_accounts_for_scroll() {
        let v = viewport(100, 40, 10);
        assert_eq!(v.cell_to_canvas(0, 1), Some((4.0, 168.0)));
        assert_eq!(v.cell_to_canvas(0, 31), None);
    }

    #[test]
    fn test_shutdown_stops_field() {
        let mut app = app();
        let now = Instant::now();
        app.sync_viewport(viewport(100, 40, 0), now);
        app.shutdown();
        assert!(!app.running);
        for i in 0..60 {
            assert!(!app.on_tick(now + Duration::from_millis(33 * i)));
        }
    }

    #[test]
    fn test_slow_frames_reduce_budget() {
        let mut app = app();
        let now = Instant::now();
        app.sync_viewport(viewport(200, 50, 0), now);

        for _ in 0..SLOW_FRAME_COUNT_THRESHOLD {
            app.record_frame_time(Duration::from_millis(150));
        }
        assert!(app.animation_reduced);
        assert_eq!(app.backdrop.point_count(), 35);

        app.reset_animation_reduction();
        assert_eq!(app.backdrop.point_count(), 70);
    }

    #[test]
    fn test_fast_frame_resets_slow_counter() {
        let mut app = app();
        for _ in 0..SLOW_FRAME_COUNT_THRESHOLD - 1 {
            app.record_frame_time(Duration::from_millis(150));
        }
        app.record_frame_time(Duration::from_millis(10));
        app.record_frame_time(Duration::from_millis(150));
        assert!(!app.animation_reduced);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Scrolling never goes past the page content
        #[test]
        fn prop_scroll_bounded(max in 0u16..200, presses in proptest::collection::vec(0u8..5, 0..60)) {
            let mut app = app();
            app.max_scroll = max;
            for press in presses {
                match press {
                    0 => app.scroll_up(),
                    1 => app.scroll_down(),
                    2 => app.page_up(),
                    3 => app.page_down(),
                    _ => app.scroll_home(),
                }
                prop_assert!(app.scroll <= max);
            }
        }
    }
}
