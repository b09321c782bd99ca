use std::time::{Duration, Instant};

/// Minimum spacing between applied drag samples (60 Hz).
pub const DRAG_SAMPLE_INTERVAL: Duration = Duration::from_micros(16_667);

/// Pointer-drag state of the panel's top edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { anchor_y: u16 },
}

impl DragState {
    pub fn press(y: u16) -> Self {
        DragState::Dragging { anchor_y: y }
    }

    /// Applies one pointer sample. Dragging up (smaller `y`) yields a positive height delta;
    /// the anchor moves to the sampled position.
    pub fn sample(self, y: u16) -> (DragState, i32) {
        match self {
            DragState::Idle => (DragState::Idle, 0),
            DragState::Dragging { anchor_y } => (
                DragState::Dragging { anchor_y: y },
                i32::from(anchor_y) - i32::from(y),
            ),
        }
    }

    pub fn release(self) -> Self {
        DragState::Idle
    }

    pub fn anchor(self) -> Option<u16> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { anchor_y } => Some(anchor_y),
        }
    }
}

/// Rate limiter for drag samples. Samples arriving inside the interval are held back and
/// the latest one is applied on the next tick or on release.
#[derive(Debug)]
struct DragThrottle {
    interval: Duration,
    last_applied: Option<Instant>,
    pending_y: Option<u16>,
}

impl DragThrottle {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_applied: None,
            pending_y: None,
        }
    }

    fn reset(&mut self) {
        self.last_applied = None;
        self.pending_y = None;
    }

    fn is_due(&self, now: Instant) -> bool {
        match self.last_applied {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }
}

/// Geometry and scroll state of the transcript panel. Owned by the view; the session
/// orchestrator never touches it.
#[derive(Debug)]
pub struct ConsolePanel {
    height: u16,
    collapsed: bool,
    drag: DragState,
    throttle: DragThrottle,
    scroll_from_bottom: usize,
    seen_version: u64,
}

impl ConsolePanel {
    pub fn new(initial_height: u16, collapsed: bool) -> Self {
        Self {
            height: initial_height,
            collapsed,
            drag: DragState::Idle,
            throttle: DragThrottle::new(DRAG_SAMPLE_INTERVAL),
            scroll_from_bottom: 0,
            seen_version: 0,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Height the body is drawn with before clamping to the terminal.
    pub fn rendered_height(&self) -> u16 {
        if self.collapsed {
            0
        } else {
            self.height
        }
    }

    /// Horizontal padding of the body; collapsed panels have none.
    pub fn padding(&self) -> u16 {
        if self.collapsed {
            0
        } else {
            1
        }
    }

    /// Adopts the height actually on screen when that is less than the stored one, so a
    /// resize gesture starts from what the user sees. Only the drag path calls this; the layout
    /// clamps the rendered height without touching the stored one.
    pub fn settle_height(&mut self, shown: u16) {
        if !self.collapsed && !self.is_dragging() {
            self.height = self.height.min(shown);
        }
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
        self.drag = self.drag.release();
        self.throttle.reset();
    }

    /// Starts a resize gesture at pointer row `y`. Ignored while collapsed.
    pub fn begin_drag(&mut self, y: u16) -> bool {
        if self.collapsed {
            return false;
        }
        self.drag = DragState::press(y);
        self.throttle.reset();
        true
    }

    pub fn drag_to(&mut self, y: u16, now: Instant) -> bool {
        if !self.is_dragging() {
            return false;
        }
        if self.throttle.is_due(now) {
            self.throttle.pending_y = None;
            self.apply_sample(y, now);
            return true;
        }
        self.throttle.pending_y = Some(y);
        false
    }

    pub fn end_drag(&mut self, now: Instant) -> bool {
        if !self.is_dragging() {
            return false;
        }
        let changed = self.flush_pending(now);
        self.drag = self.drag.release();
        self.throttle.reset();
        changed
    }

    /// Applies a held-back drag sample once the interval has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.throttle.pending_y.is_some() && self.throttle.is_due(now) {
            return self.flush_pending(now);
        }
        false
    }

    fn flush_pending(&mut self, now: Instant) -> bool {
        match self.throttle.pending_y.take() {
            Some(y) => {
                self.apply_sample(y, now);
                true
            }
            None => false,
        }
    }

    fn apply_sample(&mut self, y: u16, now: Instant) {
        let (next, delta) = self.drag.sample(y);
        self.drag = next;
        let delta = delta.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
        self.height = self.height.saturating_add_signed(delta);
        self.throttle.last_applied = Some(now);
    }

    pub fn scroll_from_bottom(&self) -> usize {
        self.scroll_from_bottom
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    pub fn clamp_scroll(&mut self, max_scroll: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.min(max_scroll);
    }

    /// Jumps back to the newest entry whenever the transcript grew.
    pub fn follow_transcript(&mut self, version: u64) -> bool {
        if version == self.seen_version {
            return false;
        }
        self.seen_version = version;
        self.scroll_from_bottom = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsolePanel, DragState, DRAG_SAMPLE_INTERVAL};
    use std::time::Instant;

    #[test]
    fn drag_transition_reports_delta_and_reanchors() {
        let state = DragState::press(20);
        let (state, delta) = state.sample(17);
        assert_eq!(delta, 3);
        assert_eq!(state.anchor(), Some(17));

        let (state, delta) = state.sample(22);
        assert_eq!(delta, -5);
        assert_eq!(state, DragState::Dragging { anchor_y: 22 });

        assert_eq!(DragState::Idle.sample(5), (DragState::Idle, 0));
        assert_eq!(state.release(), DragState::Idle);
    }

    #[test]
    fn unthrottled_drag_ends_at_initial_plus_total_movement() {
        let start = Instant::now();
        let mut panel = ConsolePanel::new(10, false);
        let samples = [30_u16, 28, 25, 27, 21];

        assert!(panel.begin_drag(samples[0]));
        for (step, y) in samples.iter().enumerate().skip(1) {
            panel.drag_to(*y, start + DRAG_SAMPLE_INTERVAL * step as u32);
        }
        panel.end_drag(start + DRAG_SAMPLE_INTERVAL * 10);

        assert_eq!(panel.height(), 10 + (30 - 21));
        assert!(!panel.is_dragging());
    }

    #[test]
    fn throttled_samples_are_flushed_on_release() {
        let start = Instant::now();
        let mut panel = ConsolePanel::new(10, false);
        panel.begin_drag(40);

        assert!(panel.drag_to(38, start));
        // Inside the interval: held back.
        assert!(!panel.drag_to(36, start));
        assert!(!panel.drag_to(33, start));
        assert_eq!(panel.height(), 12);

        assert!(panel.end_drag(start));
        assert_eq!(panel.height(), 10 + (40 - 33));
    }

    #[test]
    fn tick_applies_pending_sample_after_interval() {
        let start = Instant::now();
        let mut panel = ConsolePanel::new(5, false);
        panel.begin_drag(20);
        panel.drag_to(19, start);
        panel.drag_to(15, start);

        assert!(!panel.tick(start));
        assert!(panel.tick(start + DRAG_SAMPLE_INTERVAL));
        assert_eq!(panel.height(), 10);
        assert!(panel.is_dragging());
    }

    #[test]
    fn dragging_down_shrinks_but_never_below_zero() {
        let now = Instant::now();
        let mut panel = ConsolePanel::new(3, false);
        panel.begin_drag(10);
        panel.drag_to(30, now);
        panel.end_drag(now);
        assert_eq!(panel.height(), 0);
    }

    #[test]
    fn collapsed_panel_renders_nothing_and_refuses_drag() {
        let now = Instant::now();
        let mut panel = ConsolePanel::new(12, false);
        panel.toggle();

        assert!(panel.is_collapsed());
        assert_eq!(panel.rendered_height(), 0);
        assert_eq!(panel.padding(), 0);
        assert!(!panel.begin_drag(20));
        assert!(!panel.drag_to(10, now));
        assert_eq!(panel.height(), 12);

        panel.toggle();
        assert_eq!(panel.rendered_height(), 12);
        assert!(panel.begin_drag(20));
    }

    #[test]
    fn toggle_cancels_a_live_drag() {
        let now = Instant::now();
        let mut panel = ConsolePanel::new(8, false);
        panel.begin_drag(20);
        panel.toggle();
        assert!(!panel.is_dragging());
        assert!(!panel.drag_to(5, now));
        assert_eq!(panel.height(), 8);
    }

    #[test]
    fn settle_height_skips_live_drags_and_collapsed_panels() {
        let now = Instant::now();
        let mut panel = ConsolePanel::new(30, false);
        panel.begin_drag(10);
        panel.settle_height(12);
        assert_eq!(panel.height(), 30);

        panel.end_drag(now);
        panel.toggle();
        panel.settle_height(0);
        assert_eq!(panel.height(), 30);

        panel.toggle();
        panel.settle_height(12);
        assert_eq!(panel.height(), 12);
    }

    #[test]
    fn new_transcript_entries_reset_scroll() {
        let mut panel = ConsolePanel::new(8, false);
        panel.scroll_up(5);
        assert!(!panel.follow_transcript(0));
        assert_eq!(panel.scroll_from_bottom(), 5);

        assert!(panel.follow_transcript(1));
        assert_eq!(panel.scroll_from_bottom(), 0);
    }
}
