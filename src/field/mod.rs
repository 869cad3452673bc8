// Point field: generation, per-frame update and drawing
//
// This module holds the animation core. `PointField` owns the points of a
// single mount; `animated::AnimatedPointField` wraps it with scheduling,
// pointer tracking and surface management.

pub mod animated;
pub mod point;
pub mod surface;

pub use animated::AnimatedPointField;
pub use point::{CanvasSize, Point, Pointer, PulseRange};
pub use surface::{DisplayList, DrawCommand, Rgb, Surface};

use rand::Rng;

/// Hard upper bound on the number of points in any field
///
/// The connection pass is O(n²), so this bounds per-frame cost no matter
/// what the configuration asks for.
pub const MAX_POINTS: usize = 100;

/// Lower and upper bound of the random per-point pulse rate
const PULSE_SPEED_MIN: f64 = 0.005;
const PULSE_SPEED_SPREAD: f64 = 0.01;

/// Opacity used by presets that do not pulse
const STATIC_OPACITY: f64 = 1.0;

/// Background variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Pulsing points that react to the pointer
    #[default]
    Network,
    /// Small steady dots in a single accent color
    Geometric,
}

impl Preset {
    pub fn label(&self) -> &'static str {
        match self {
            Preset::Network => "Network",
            Preset::Geometric => "Geometric",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Preset::Network => Preset::Geometric,
            Preset::Geometric => Preset::Network,
        }
    }
}

/// Tunable parameters of a point field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub preset: Preset,
    /// Requested number of points before area and cap limits apply
    pub point_count: usize,
    /// Canvas area (px²) that "pays" for one point
    pub density_factor: f64,
    /// Points closer than this are joined by a line
    pub connection_distance: f64,
    /// Multiplier on the random per-point velocity
    pub speed: f64,
    /// Maximum radius on top of the 1px base
    pub point_size: f64,
    pub interactive: bool,
    /// Pointer reach in pixels
    pub interaction_radius: f64,
    /// Fraction of the pointer offset applied per frame
    pub repel_strength: f64,
    /// Opacity oscillation, `None` for a steady fully opaque point
    pub pulse: Option<PulseRange>,
    /// Extra factor on every line's alpha
    pub line_alpha_scale: f64,
    pub line_width: f64,
}

impl FieldConfig {
    /// Pulsing, pointer-aware field
    pub fn network() -> Self {
        Self {
            preset: Preset::Network,
            point_count: 70,
            density_factor: 15_000.0,
            connection_distance: 150.0,
            speed: 0.3,
            point_size: 2.0,
            interactive: true,
            interaction_radius: 100.0,
            repel_strength: 0.02,
            pulse: Some(PulseRange::new(0.2, 0.7)),
            line_alpha_scale: 0.5,
            line_width: 0.5,
        }
    }

    /// Steady dots, denser and slower
    pub fn geometric() -> Self {
        let density = 15.0;
        Self {
            preset: Preset::Geometric,
            point_count: MAX_POINTS,
            density_factor: 20_000.0 / density,
            connection_distance: 120.0,
            speed: 0.2,
            point_size: 0.0,
            interactive: false,
            interaction_radius: 100.0,
            repel_strength: 0.02,
            pulse: None,
            line_alpha_scale: 1.0,
            line_width: 0.5,
        }
    }

    pub fn for_preset(preset: Preset) -> Self {
        match preset {
            Preset::Network => Self::network(),
            Preset::Geometric => Self::geometric(),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::network()
    }
}

/// Colors used to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldColors {
    pub background: Rgb,
    pub point: Rgb,
    pub line: Rgb,
    /// Alpha baked into the line color itself
    pub line_opacity: f64,
    pub highlight: Rgb,
}

/// Number of points a canvas of `size` gets under `config`
///
/// `min(MAX_POINTS, point_count, floor(area / density_factor))`. Degenerate
/// sizes and densities yield zero points.
pub fn effective_point_count(size: CanvasSize, config: &FieldConfig) -> usize {
    let density = config.density_factor;
    if !(density.is_finite() && density > 0.0) {
        return 0;
    }

    let by_area = (size.area() / density).floor();
    let by_area = if by_area.is_finite() && by_area > 0.0 {
        by_area.min(MAX_POINTS as f64) as usize
    } else {
        0
    };

    by_area.min(config.point_count).min(MAX_POINTS)
}

/// Alpha of a proximity line between two points `distance` apart
///
/// Linear falloff: 1.0 at distance 0, 0.0 at (and beyond) the threshold.
pub fn line_alpha(distance: f64, connection_distance: f64) -> f64 {
    if connection_distance <= 0.0 || !connection_distance.is_finite() {
        return 0.0;
    }
    (1.0 - distance / connection_distance).clamp(0.0, 1.0)
}

/// The points of one mount plus the canvas they live on
#[derive(Debug, Clone)]
pub struct PointField {
    config: FieldConfig,
    size: CanvasSize,
    points: Vec<Point>,
}

impl PointField {
    /// Generate a fresh point set for a canvas
    pub fn initialize<R: Rng>(size: CanvasSize, config: FieldConfig, rng: &mut R) -> Self {
        let count = effective_point_count(size, &config);
        let speed = if config.speed.is_finite() { config.speed.max(0.0) } else { 0.0 };
        let point_size = if config.point_size.is_finite() {
            config.point_size.max(0.0)
        } else {
            0.0
        };

        let points = (0..count)
            .map(|_| {
                let (opacity, pulse_speed) = match config.pulse {
                    Some(range) => (
                        range.min + rng.random::<f64>() * (range.max - range.min),
                        rng.random::<f64>() * PULSE_SPEED_SPREAD + PULSE_SPEED_MIN,
                    ),
                    None => (STATIC_OPACITY, 0.0),
                };
                Point {
                    x: rng.random::<f64>() * size.width,
                    y: rng.random::<f64>() * size.height,
                    vx: (rng.random::<f64>() - 0.5) * speed,
                    vy: (rng.random::<f64>() - 0.5) * speed,
                    radius: rng.random::<f64>() * point_size + 1.0,
                    opacity,
                    pulse_speed,
                    pulse_direction: 1.0,
                    highlighted: false,
                }
            })
            .collect();

        Self {
            config,
            size,
            points,
        }
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[allow(dead_code)]
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    #[allow(dead_code)]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Advance every point by one frame
    ///
    /// The pointer is ignored unless the field is interactive.
    pub fn step(&mut self, pointer: Option<&Pointer>) {
        let size = self.size;
        let pointer = pointer.filter(|_| self.config.interactive);

        for point in &mut self.points {
            point.advance(size);
            if let Some(range) = self.config.pulse {
                point.pulse(range);
            }
            point.highlighted = match pointer {
                Some(pointer) => point.repel(pointer, self.config.repel_strength, size),
                None => false,
            };
        }
    }

    /// Draw the current frame onto `surface`
    ///
    /// Leaves the surface's global alpha as it found it.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, colors: &FieldColors) {
        let saved_alpha = surface.global_alpha();

        surface.clear(colors.background, 0.0);

        for point in &self.points {
            let color = if point.highlighted {
                colors.highlight
            } else {
                colors.point
            };
            surface.set_global_alpha(point.opacity);
            surface.fill_circle(point.x, point.y, point.radius, color);
        }

        let reach = self.config.connection_distance;
        for (i, a) in self.points.iter().enumerate() {
            for b in &self.points[i + 1..] {
                let distance = a.distance_to(b);
                if distance < reach {
                    let alpha =
                        line_alpha(distance, reach) * self.config.line_alpha_scale * colors.line_opacity;
                    surface.set_global_alpha(alpha);
                    surface.stroke_line((a.x, a.y), (b.x, b.y), self.config.line_width, colors.line);
                }
            }
        }

        surface.set_global_alpha(saved_alpha);
    }
}
