// Point model and per-frame motion
//
// A point drifts with constant velocity, bounces off the canvas walls,
// pulses its opacity between two bounds and (optionally) shies away from
// the pointer.

/// Canvas dimensions in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Area in square pixels; degenerate or non-finite sizes count as zero
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// True when nothing can be drawn on a canvas of this size
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Pointer position in canvas space plus the radius it pushes points away within
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Opacity oscillation bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseRange {
    pub min: f64,
    pub max: f64,
}

impl PulseRange {
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[allow(dead_code)]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A single animated dot
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
    pub pulse_speed: f64,
    /// +1.0 while brightening, -1.0 while dimming
    pub pulse_direction: f64,
    /// Set for the current frame when the pointer repelled this point
    pub highlighted: bool,
}

impl Point {
    /// Advance position by one frame, bouncing off the canvas edges
    ///
    /// Each axis is checked on its own: if the next position along an axis
    /// would leave `[0, extent]`, that velocity component is negated before
    /// the move. The result is clamped so tiny canvases (extent smaller than
    /// a single step) still keep the point inside.
    pub fn advance(&mut self, size: CanvasSize) {
        (self.x, self.vx) = bounce_axis(self.x, self.vx, size.width);
        (self.y, self.vy) = bounce_axis(self.y, self.vy, size.height);
    }

    /// Advance opacity by one frame along a triangle wave
    ///
    /// The value is held at a bound when it reaches it, and the direction
    /// flips exactly then.
    pub fn pulse(&mut self, range: PulseRange) {
        let next = self.opacity + self.pulse_speed * self.pulse_direction;
        if next >= range.max {
            self.opacity = range.max;
            self.pulse_direction = -1.0;
        } else if next <= range.min {
            self.opacity = range.min;
            self.pulse_direction = 1.0;
        } else {
            self.opacity = next;
        }
    }

    /// Push the point away from the pointer when it is within reach
    ///
    /// Returns whether the point was affected; the caller uses this as the
    /// highlight flag for the frame.
    pub fn repel(&mut self, pointer: &Pointer, strength: f64, size: CanvasSize) -> bool {
        let dx = self.x - pointer.x;
        let dy = self.y - pointer.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance >= pointer.radius {
            return false;
        }

        self.x = (self.x + dx * strength).clamp(0.0, size.width.max(0.0));
        self.y = (self.y + dy * strength).clamp(0.0, size.height.max(0.0));
        true
    }

    /// Euclidean distance between two points
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

fn bounce_axis(position: f64, velocity: f64, extent: f64) -> (f64, f64) {
    let extent = extent.max(0.0);
    let next = position + velocity;
    let velocity = if next < 0.0 || next > extent {
        -velocity
    } else {
        velocity
    };
    ((position + velocity).clamp(0.0, extent), velocity)
}
