// Frame scheduling
//
// A cancellable "next frame" request plus the Active/Paused state machine
// that decides whether another frame should be requested at all.
//
// The host loop asks the scheduler for the next deadline, sleeps (polling
// input) until then, and hands any due frame to the animator. At most one
// frame is ever pending.

use std::time::{Duration, Instant};

/// Intersection ratio below which the canvas counts as off-screen
pub const INTERSECTION_THRESHOLD: f64 = 0.1;

/// Opaque identifier of a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Host-side per-frame callback scheduling
pub trait FrameScheduler {
    /// Request the next frame; returns the pending handle if one exists
    fn request_frame(&mut self, now: Instant) -> FrameHandle;

    /// Drop a pending frame request
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Pop the pending frame if it is due
    fn take_due(&mut self, now: Instant) -> Option<FrameHandle>;

    /// When the pending frame becomes due, if any
    fn next_deadline(&self) -> Option<Instant>;
}

#[derive(Debug, Clone, Copy)]
struct PendingFrame {
    handle: FrameHandle,
    due: Instant,
}

/// Wall-clock scheduler firing at a fixed frame interval
///
/// A request is due at the next frame boundary after the last fired frame,
/// or immediately when nothing has fired yet or that boundary has passed.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    pending: Option<PendingFrame>,
    last_fired: Option<Instant>,
    next_id: u64,
    fired: u64,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            last_fired: None,
            next_id: 0,
            fired: 0,
        }
    }

    #[allow(dead_code)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[allow(dead_code)]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total number of frames handed out by `take_due`
    #[allow(dead_code)]
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self, now: Instant) -> FrameHandle {
        if let Some(pending) = self.pending {
            return pending.handle;
        }

        let due = match self.last_fired {
            Some(last) => (last + self.interval).max(now),
            None => now,
        };
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(PendingFrame { handle, due });
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.map(|p| p.handle) == Some(handle) {
            self.pending = None;
        }
    }

    fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        let pending = self.pending?;
        if pending.due > now {
            return None;
        }
        self.pending = None;
        self.last_fired = Some(now);
        self.fired += 1;
        Some(pending.handle)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }
}

/// Animation loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// A frame is scheduled and each fired frame schedules the next
    Active,
    /// Nothing is drawn and nothing is scheduled
    Paused,
}

impl RunState {
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Active => "Active",
            RunState::Paused => "Paused",
        }
    }
}

/// Active/Paused state machine on top of a frame scheduler
///
/// The loop runs only while mounted, the document is visible and the canvas
/// intersects the viewport. Resuming schedules exactly one frame; pausing
/// and unmounting cancel the pending one.
#[derive(Debug)]
pub struct Animator<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameHandle>,
    state: RunState,
    mounted: bool,
    document_visible: bool,
    intersecting: bool,
}

impl<S: FrameScheduler> Animator<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            state: RunState::Paused,
            mounted: false,
            document_visible: true,
            intersecting: true,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[allow(dead_code)]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[allow(dead_code)]
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.and(self.scheduler.next_deadline())
    }

    /// Start the loop; the first frame is requested immediately
    pub fn mount(&mut self, now: Instant) {
        self.mounted = true;
        self.reconcile(now);
    }

    /// Stop the loop for good; no frame fires afterwards
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.cancel_pending();
        self.state = RunState::Paused;
    }

    /// Page (terminal focus) visibility changed
    pub fn set_document_visible(&mut self, visible: bool, now: Instant) {
        self.document_visible = visible;
        self.reconcile(now);
    }

    /// Fraction of the canvas inside the viewport changed
    pub fn set_intersection_ratio(&mut self, ratio: f64, now: Instant) {
        self.intersecting = ratio >= INTERSECTION_THRESHOLD;
        self.reconcile(now);
    }

    /// Fire the pending frame if due
    ///
    /// Returns `true` when the caller should step and draw a frame. The next
    /// frame is requested before returning so the loop keeps running.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(handle) = self.scheduler.take_due(now) else {
            return false;
        };
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        if self.state != RunState::Active {
            return false;
        }
        self.pending = Some(self.scheduler.request_frame(now));
        true
    }

    fn should_run(&self) -> bool {
        self.mounted && self.document_visible && self.intersecting
    }

    fn reconcile(&mut self, now: Instant) {
        match (self.state, self.should_run()) {
            (RunState::Paused, true) => {
                self.state = RunState::Active;
                if self.pending.is_none() {
                    self.pending = Some(self.scheduler.request_frame(now));
                }
                tracing::debug!("point field animation resumed");
            }
            (RunState::Active, false) => {
                self.state = RunState::Paused;
                self.cancel_pending();
                tracing::debug!(
                    visible = self.document_visible,
                    intersecting = self.intersecting,
                    "point field animation paused"
                );
            }
            _ => {}
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}
