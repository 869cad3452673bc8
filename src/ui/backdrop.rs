// Backdrop rendering module
//
// Paints the last recorded frame of the point field on a Braille canvas.
// Canvas pixels map onto the hero section, with y flipped because the
// terminal canvas grows upward. Only the part of the hero that is still on
// screen is drawn; rows scrolled off the top are cut away via the y bounds.

use crate::field::{DisplayList, DrawCommand, Rgb, Surface};
use crate::theme::to_color;
use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points},
    Frame,
};

/// Circles smaller than a Braille dot (4 px) are plotted as a single dot
const DOT_RADIUS_MAX: f64 = 4.0;

/// A primitive in terminal canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    Dot { x: f64, y: f64, color: Color },
    Disc { x: f64, y: f64, radius: f64, color: Color },
    Segment { x1: f64, y1: f64, x2: f64, y2: f64, color: Color },
}

/// Convert the recorded frame into canvas glyphs
///
/// Lines come first so that points stay legible on top of them.
pub fn glyphs(list: &DisplayList) -> Vec<Glyph> {
    let height = list.size().height;
    let flip = |y: f64| height - y;

    let segments = list.commands().iter().filter_map(|command| match command {
        DrawCommand::Line { from, to, .. } => Some(Glyph::Segment {
            x1: from.0,
            y1: flip(from.1),
            x2: to.0,
            y2: flip(to.1),
            color: to_color(list.resolved_color(command)),
        }),
        DrawCommand::Circle { .. } => None,
    });

    let points = list.commands().iter().filter_map(|command| match command {
        DrawCommand::Circle { x, y, radius, .. } => {
            let color = to_color(list.resolved_color(command));
            Some(if *radius < DOT_RADIUS_MAX {
                Glyph::Dot {
                    x: *x,
                    y: flip(*y),
                    color,
                }
            } else {
                Glyph::Disc {
                    x: *x,
                    y: flip(*y),
                    radius: *radius,
                    color,
                }
            })
        }
        DrawCommand::Line { .. } => None,
    });

    segments.chain(points).collect()
}

/// Color the canvas area is filled with
pub fn background(list: &DisplayList) -> Rgb {
    match list.background() {
        Some((color, alpha)) => color.over(list.backdrop(), alpha),
        None => list.backdrop(),
    }
}

/// Render the visible part of the backdrop into `area`
///
/// `hidden_px` is how much of the canvas top is scrolled out of view.
pub fn render_backdrop(f: &mut Frame, area: Rect, list: &DisplayList, hidden_px: f64) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let size = list.size();
    let visible_height = (size.height - hidden_px).max(0.0);
    let glyphs = glyphs(list);

    let canvas = Canvas::default()
        .background_color(to_color(background(list)))
        .marker(Marker::Braille)
        .x_bounds([0.0, size.width])
        .y_bounds([0.0, visible_height])
        .paint(move |ctx| {
            for glyph in &glyphs {
                match *glyph {
                    Glyph::Segment {
                        x1,
                        y1,
                        x2,
                        y2,
                        color,
                    } => ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color,
                    }),
                    Glyph::Dot { x, y, color } => ctx.draw(&Points {
                        coords: &[(x, y)],
                        color,
                    }),
                    Glyph::Disc {
                        x,
                        y,
                        radius,
                        color,
                    } => ctx.draw(&Circle {
                        x,
                        y,
                        radius,
                        color,
                    }),
                }
            }
        });

    f.render_widget(canvas, area);
}
