// Drawing surface abstraction
//
// The field never talks to the terminal directly. It issues primitive draw
// calls against a `Surface`, which keeps a global alpha the way a 2D canvas
// context does. `DisplayList` is the retained implementation: it records the
// resolved primitives of the last frame so the UI can paint them on every
// redraw, including while the animation is paused.

use super::point::CanvasSize;

/// Plain RGB color, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Mix `self` over `backdrop` with the given opacity
    ///
    /// Terminal cells cannot blend, so translucency is approximated by
    /// interpolating toward the color underneath.
    pub fn over(self, backdrop: Rgb, alpha: f64) -> Rgb {
        let a = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |fg: u8, bg: u8| (bg as f64 + (fg as f64 - bg as f64) * a).round() as u8;
        Rgb(
            mix(self.0, backdrop.0),
            mix(self.1, backdrop.1),
            mix(self.2, backdrop.2),
        )
    }
}

/// Minimal 2D drawing context used by the point field
pub trait Surface {
    /// Size of the drawable area in canvas pixels
    fn size(&self) -> CanvasSize;

    /// Clear the frame and paint the (possibly transparent) background
    fn clear(&mut self, background: Rgb, alpha: f64);

    /// Current global alpha
    fn global_alpha(&self) -> f64;

    /// Set the global alpha applied to subsequent primitives
    fn set_global_alpha(&mut self, alpha: f64);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb);
}

/// A recorded primitive with translucency already resolved
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgb,
        alpha: f64,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgb,
        alpha: f64,
    },
}

/// Retained drawing surface that records one frame of primitives
#[derive(Debug, Clone)]
pub struct DisplayList {
    size: CanvasSize,
    backdrop: Rgb,
    background: Option<(Rgb, f64)>,
    alpha: f64,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Acquire a surface for a canvas of the given size
    ///
    /// Returns `None` when the canvas has no drawable area; callers treat
    /// that as "render nothing".
    pub fn acquire(size: CanvasSize, backdrop: Rgb) -> Option<Self> {
        if size.is_empty() {
            return None;
        }
        Some(Self {
            size,
            backdrop,
            background: None,
            alpha: 1.0,
            commands: Vec::new(),
        })
    }

    /// Color the terminal shows underneath the canvas
    pub fn backdrop(&self) -> Rgb {
        self.backdrop
    }

    pub fn set_backdrop(&mut self, backdrop: Rgb) {
        self.backdrop = backdrop;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Background painted by the last `clear`, if any
    pub fn background(&self) -> Option<(Rgb, f64)> {
        self.background
    }

    #[allow(dead_code)]
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    #[allow(dead_code)]
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Color of a recorded command as it should appear on the terminal
    pub fn resolved_color(&self, command: &DrawCommand) -> Rgb {
        match command {
            DrawCommand::Circle { color, alpha, .. } | DrawCommand::Line { color, alpha, .. } => {
                color.over(self.backdrop, *alpha)
            }
        }
    }
}

impl Surface for DisplayList {
    fn size(&self) -> CanvasSize {
        self.size
    }

    fn clear(&mut self, background: Rgb, alpha: f64) {
        self.commands.clear();
        self.background = Some((background, alpha));
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 };
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
            alpha: self.alpha,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
            alpha: self.alpha,
        });
    }
}
