// Application configuration types
//
// This module contains configuration constants and structs for:
// - Frame pacing and performance guard
// - Terminal cell to canvas pixel mapping
// - Runtime-adjustable field settings
// - Page scrolling

use std::time::Duration;

use crate::field::{FieldConfig, Preset};

// ============================================================================
// Constants
// ============================================================================

/// Target interval between animation frames (~30 fps)
pub const FRAME_INTERVAL_MS: u64 = 33;

/// Input poll timeout while no frame is pending (paused or unmounted)
pub const IDLE_POLL_MS: u64 = 250;

/// Virtual pixels per terminal cell, horizontally
pub const CELL_WIDTH_PX: f64 = 8.0;

/// Virtual pixels per terminal cell, vertically
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Frame time threshold for auto-reducing animation complexity (100ms)
/// If frame time consistently exceeds this, the point budget is halved
pub const FRAME_TIME_THRESHOLD_MS: u128 = 100;

/// Number of consecutive slow frames before triggering complexity reduction
pub const SLOW_FRAME_COUNT_THRESHOLD: u32 = 5;

/// Speed multiplier adjustment step and bounds
pub const SPEED_STEP: f64 = 0.1;
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 3.0;

/// Connection distance adjustment step and bounds (pixels)
pub const DISTANCE_STEP: f64 = 10.0;
pub const MIN_DISTANCE: f64 = 40.0;
pub const MAX_DISTANCE: f64 = 300.0;

/// Rows scrolled per arrow key / page key
pub const SCROLL_STEP: u16 = 1;
pub const PAGE_SCROLL_STEP: u16 = 10;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Field settings the user can change at runtime
///
/// Any change remounts the point field with a config derived from these.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    pub preset: Preset,
    pub speed: f64,
    pub connection_distance: f64,
    pub interactive: bool,
}

impl FieldSettings {
    /// Settings matching the defaults of a preset
    pub fn for_preset(preset: Preset) -> Self {
        let config = FieldConfig::for_preset(preset);
        Self {
            preset,
            speed: config.speed,
            connection_distance: config.connection_distance,
            interactive: config.interactive,
        }
    }

    /// Full field configuration for these settings
    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            speed: self.speed,
            connection_distance: self.connection_distance,
            interactive: self.interactive,
            ..FieldConfig::for_preset(self.preset)
        }
    }

    pub fn faster(&mut self) {
        self.speed = round_step(self.speed + SPEED_STEP).clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn slower(&mut self) {
        self.speed = round_step(self.speed - SPEED_STEP).clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn wider(&mut self) {
        self.connection_distance =
            (self.connection_distance + DISTANCE_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn narrower(&mut self) {
        self.connection_distance =
            (self.connection_distance - DISTANCE_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Switch to the next preset, taking over its defaults
    pub fn cycle_preset(&mut self) {
        *self = Self::for_preset(self.preset.next());
    }
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self::for_preset(Preset::default())
    }
}

/// Frame pacing configuration
#[derive(Debug, Clone)]
pub struct FrameConfig {
    pub frame_ms: u64,
    pub idle_ms: u64,
}

impl FrameConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_INTERVAL_MS,
            idle_ms: IDLE_POLL_MS,
        }
    }
}

/// Keep decimal steps from accumulating float noise (0.30000000000000004)
fn round_step(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
