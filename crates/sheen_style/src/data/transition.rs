//! Cross-fade overlay for page transitions
//!
//! When a container switches pages, the outgoing page is captured and shown
//! on top of the incoming one while it fades. The style does not render the
//! overlay itself: the paint routine asks for an [`OverlayState`] and draws
//! the captured snapshot with the given opacity.

use std::time::{Duration, Instant};

use sheen_animation::{digitize, Animation, SchedulerHandle};

use crate::geometry::Rect;
use crate::widget::Snapshot;

/// Render budget used when none is configured
pub const DEFAULT_MAX_RENDER_TIME: Duration = Duration::from_millis(50);

/// What the paint routine needs to draw a transition
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayState {
    pub visible: bool,
    pub opacity: f64,
    pub geometry: Rect,
    pub start: Option<Snapshot>,
}

/// The fading overlay of one transition
pub struct TransitionOverlay {
    animation: Animation,
    opacity: f64,
    steps: u32,
    geometry: Rect,
    start: Option<Snapshot>,
    visible: bool,
}

impl TransitionOverlay {
    pub fn new(scheduler: &SchedulerHandle, duration_ms: u32) -> Self {
        Self {
            animation: Animation::new(scheduler, duration_ms),
            opacity: 0.0,
            steps: 0,
            geometry: Rect::EMPTY,
            start: None,
            visible: false,
        }
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Set the quantized opacity; returns true if it changed
    pub fn set_opacity(&mut self, value: f64) -> bool {
        let value = digitize(value, self.steps);
        if self.opacity == value {
            return false;
        }
        self.opacity = value;
        true
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.steps = steps;
    }

    pub fn set_duration(&mut self, duration_ms: u32) {
        self.animation.set_duration(duration_ms);
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Rect) {
        self.geometry = geometry;
    }

    pub fn start_snapshot(&self) -> Option<&Snapshot> {
        self.start.as_ref()
    }

    pub fn set_start_snapshot(&mut self, snapshot: Option<Snapshot>) {
        self.start = snapshot;
    }

    pub fn reset_start_snapshot(&mut self) {
        self.start = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_animated(&self) -> bool {
        self.animation.is_running()
    }

    /// Run the fade from the start
    pub fn animate(&mut self) {
        self.animation.restart();
        let value = self.animation.value();
        self.set_opacity(value);
    }

    /// Stop the fade where it is
    pub fn end_animation(&mut self) {
        if self.animation.is_running() {
            self.animation.stop();
        }
    }

    pub fn state(&self) -> OverlayState {
        OverlayState {
            visible: self.visible,
            opacity: self.opacity,
            geometry: self.geometry,
            start: self.start.clone(),
        }
    }
}

/// Transition bookkeeping shared by container data
///
/// Capturing a page can be expensive. The render clock measures the capture;
/// when it exceeds the budget the transition is skipped.
pub struct TransitionData {
    overlay: TransitionOverlay,
    max_render_time: Duration,
    clock: Option<Instant>,
}

impl TransitionData {
    pub fn new(scheduler: &SchedulerHandle, duration_ms: u32) -> Self {
        Self {
            overlay: TransitionOverlay::new(scheduler, duration_ms),
            max_render_time: DEFAULT_MAX_RENDER_TIME,
            clock: None,
        }
    }

    pub fn overlay(&self) -> &TransitionOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut TransitionOverlay {
        &mut self.overlay
    }

    pub fn max_render_time(&self) -> Duration {
        self.max_render_time
    }

    pub fn set_max_render_time(&mut self, max_render_time: Duration) {
        self.max_render_time = max_render_time;
    }

    /// Start measuring a capture
    pub fn start_clock(&mut self) {
        self.clock = Some(Instant::now());
    }

    /// True when the last capture took longer than the budget
    ///
    /// An unstarted clock counts as slow.
    pub fn slow(&self) -> bool {
        match self.clock {
            Some(clock) => clock.elapsed() > self.max_render_time,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use sheen_animation::AnimationScheduler;

    #[test]
    fn test_overlay_fade() {
        let scheduler = AnimationScheduler::new();
        let mut overlay = TransitionOverlay::new(&scheduler.handle(), 100);

        overlay.show();
        overlay.animate();
        assert!(overlay.is_animated());
        assert_eq!(overlay.opacity(), 0.0);

        overlay.end_animation();
        assert!(!overlay.is_animated());
        assert!(overlay.is_visible());
    }

    #[test]
    fn test_overlay_opacity_quantized() {
        let scheduler = AnimationScheduler::new();
        let mut overlay = TransitionOverlay::new(&scheduler.handle(), 100);
        overlay.set_steps(4);

        assert!(overlay.set_opacity(0.63));
        assert_eq!(overlay.opacity(), 0.5);
        assert!(!overlay.set_opacity(0.7));
    }

    #[test]
    fn test_overlay_state_snapshot() {
        let scheduler = AnimationScheduler::new();
        let mut overlay = TransitionOverlay::new(&scheduler.handle(), 100);
        let snapshot = Snapshot::new(Size::new(2, 2), vec![1, 2, 3, 4].into());

        overlay.set_geometry(Rect::new(0, 0, 2, 2));
        overlay.set_start_snapshot(Some(snapshot.clone()));
        let state = overlay.state();
        assert_eq!(state.start, Some(snapshot));
        assert_eq!(state.geometry, Rect::new(0, 0, 2, 2));
        assert!(!state.visible);

        overlay.reset_start_snapshot();
        assert!(overlay.start_snapshot().is_none());
    }

    #[test]
    fn test_render_clock() {
        let scheduler = AnimationScheduler::new();
        let mut transition = TransitionData::new(&scheduler.handle(), 100);
        assert_eq!(transition.max_render_time(), DEFAULT_MAX_RENDER_TIME);
        assert!(transition.slow());

        transition.start_clock();
        assert!(!transition.slow());

        transition.set_max_render_time(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert!(transition.slow());
    }
}
