// Animated point field component
//
// Ties the point set, its drawing surface, the pointer and the frame
// scheduler together. Event handlers only touch lightweight state; drawing
// happens exclusively in `tick` when the scheduler hands out a frame.

use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};

use super::{
    effective_point_count, CanvasSize, DisplayList, FieldColors, FieldConfig, PointField, Pointer,
    Rgb, Surface,
};
use crate::schedule::{Animator, FrameClock, RunState};

/// A self-contained animated backdrop
#[derive(Debug)]
pub struct AnimatedPointField {
    config: FieldConfig,
    colors: FieldColors,
    backdrop: Rgb,
    reduced: bool,
    rng: StdRng,
    field: Option<PointField>,
    surface: Option<DisplayList>,
    pointer: Option<(f64, f64)>,
    animator: Animator<FrameClock>,
}

impl AnimatedPointField {
    /// Create an unmounted field drawing with entropy-seeded randomness
    pub fn new(config: FieldConfig, colors: FieldColors, frame_interval: Duration) -> Self {
        Self::with_rng(config, colors, frame_interval, StdRng::from_os_rng())
    }

    /// Create an unmounted field with an explicit random source
    pub fn with_rng(
        config: FieldConfig,
        colors: FieldColors,
        frame_interval: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            config,
            backdrop: colors.background,
            colors,
            reduced: false,
            rng,
            field: None,
            surface: None,
            pointer: None,
            animator: Animator::new(FrameClock::new(frame_interval)),
        }
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[allow(dead_code)]
    pub fn colors(&self) -> &FieldColors {
        &self.colors
    }

    pub fn state(&self) -> RunState {
        self.animator.state()
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some() && self.animator.is_mounted()
    }

    pub fn canvas_size(&self) -> Option<CanvasSize> {
        self.surface.as_ref().map(|s| s.size())
    }

    pub fn point_count(&self) -> usize {
        self.field.as_ref().map_or(0, PointField::len)
    }

    #[allow(dead_code)]
    pub fn field(&self) -> Option<&PointField> {
        self.field.as_ref()
    }

    /// Last drawn frame; `None` when there is nothing to show
    pub fn display_list(&self) -> Option<&DisplayList> {
        self.surface.as_ref()
    }

    /// When the host loop should wake up for the next frame
    pub fn next_deadline(&self) -> Option<Instant> {
        self.animator.next_deadline()
    }

    #[allow(dead_code)]
    pub fn frames_drawn(&self) -> u64 {
        self.animator.scheduler().fired()
    }

    /// Color of whatever the canvas is layered over
    pub fn set_backdrop(&mut self, backdrop: Rgb) {
        self.backdrop = backdrop;
        if let Some(surface) = self.surface.as_mut() {
            surface.set_backdrop(backdrop);
        }
    }

    #[allow(dead_code)]
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Attach to a canvas and start animating
    ///
    /// When no surface can be acquired for `size` the component stays inert.
    pub fn mount(&mut self, size: CanvasSize, now: Instant) {
        let Some(surface) = DisplayList::acquire(size, self.backdrop) else {
            tracing::debug!(?size, "no drawable area, point field stays unmounted");
            return;
        };
        self.surface = Some(surface);
        self.regenerate(size);
        self.animator.mount(now);
    }

    /// Detach from the canvas; no frame is drawn afterwards
    pub fn unmount(&mut self) {
        self.animator.unmount();
        self.field = None;
        self.surface = None;
        self.pointer = None;
    }

    /// Canvas changed size: regenerate points, keep the run state
    pub fn resize(&mut self, size: CanvasSize, now: Instant) {
        if self.canvas_size() == Some(size) {
            return;
        }
        if !self.is_mounted() {
            self.mount(size, now);
            return;
        }
        if size.is_empty() {
            self.unmount();
            return;
        }

        self.surface = DisplayList::acquire(size, self.backdrop);
        self.regenerate(size);
        tracing::debug!(?size, points = self.point_count(), "point field resized");
    }

    pub fn set_document_visible(&mut self, visible: bool, now: Instant) {
        self.animator.set_document_visible(visible, now);
    }

    pub fn set_intersection_ratio(&mut self, ratio: f64, now: Instant) {
        self.animator.set_intersection_ratio(ratio, now);
    }

    /// Pointer moved to canvas coordinates; ignored unless interactive
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.config.interactive {
            self.pointer = Some((x, y));
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    #[allow(dead_code)]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    /// Halve the point budget (or restore it) and regenerate if it changed
    pub fn set_reduced(&mut self, reduced: bool) {
        if self.reduced == reduced {
            return;
        }
        self.reduced = reduced;
        if let Some(size) = self.canvas_size() {
            self.regenerate(size);
        }
    }

    /// Run a frame if one is due: step every point, then draw
    ///
    /// Returns whether a frame was drawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.animator.poll(now) {
            return false;
        }
        let (Some(field), Some(surface)) = (self.field.as_mut(), self.surface.as_mut()) else {
            return false;
        };

        let pointer = self.pointer.map(|(x, y)| Pointer {
            x,
            y,
            radius: self.config.interaction_radius,
        });
        field.step(pointer.as_ref());
        field.draw(surface, &self.colors);
        true
    }

    fn regenerate(&mut self, size: CanvasSize) {
        let mut config = self.config.clone();
        if self.reduced {
            config.point_count = effective_point_count(size, &config) / 2;
        }
        self.field = Some(PointField::initialize(size, config, &mut self.rng));
    }
}
