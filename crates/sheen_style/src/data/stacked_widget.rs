//! Page transition of a stacked container

use std::cell::RefCell;
use std::rc::Rc;

use sheen_animation::{AnimationTarget, SchedulerHandle};

use super::{animation_target, AnimationData, DataCore, OverlayState, TransitionData};
use crate::widget::WidgetRef;

/// Transition state of one stacked container
///
/// The data remembers the page index it last saw. On a page change it
/// captures the outgoing page and fades the capture out over the incoming
/// one.
pub struct StackedWidgetData {
    core: DataCore,
    transition: TransitionData,
    index: Option<usize>,
}

impl StackedWidgetData {
    const OPACITY: &'static str = "opacity";

    pub fn new(target: &WidgetRef, scheduler: &SchedulerHandle, duration_ms: u32) -> Rc<RefCell<Self>> {
        let index = target.as_stacked().and_then(|stacked| stacked.current_index());
        let data = Rc::new(RefCell::new(Self {
            core: DataCore::new(target),
            transition: TransitionData::new(scheduler, duration_ms),
            index,
        }));
        data.borrow()
            .transition
            .overlay()
            .animation()
            .bind(animation_target(&data), Self::OPACITY);
        data
    }

    /// Last page index seen
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn transition(&self) -> &TransitionData {
        &self.transition
    }

    pub fn transition_mut(&mut self) -> &mut TransitionData {
        &mut self.transition
    }

    /// Overlay state for the paint routine
    pub fn overlay(&self) -> OverlayState {
        self.transition.overlay().state()
    }

    /// Capture the outgoing page after a page change
    ///
    /// Returns true if the transition should play. Any change of index is
    /// recorded, even one that can't be animated.
    pub fn initialize_animation(&mut self) -> bool {
        let Some(target) = self.core.target() else {
            return false;
        };
        if !target.is_visible() {
            return false;
        }
        let Some(stacked) = target.as_stacked() else {
            return false;
        };

        let current = stacked.current_index();
        if current == self.index {
            return false;
        }

        let previous = std::mem::replace(&mut self.index, current);
        let (Some(previous), Some(_)) = (previous, current) else {
            return false;
        };
        let Some(geometry) = stacked.page_geometry(previous) else {
            return false;
        };

        let overlay = self.transition.overlay_mut();
        overlay.set_opacity(0.0);
        self.transition.start_clock();
        let Some(snapshot) = stacked.grab_page(previous) else {
            tracing::debug!(
                "StackedWidgetData: page {} could not be captured, switching instantly",
                previous
            );
            self.transition.overlay_mut().reset_start_snapshot();
            return false;
        };
        let overlay = self.transition.overlay_mut();
        overlay.set_geometry(geometry);
        overlay.set_start_snapshot(Some(snapshot));

        let slow = self.transition.slow();
        if slow {
            tracing::debug!(
                "StackedWidgetData: capture of page {} exceeded {:?}, skipping transition",
                previous,
                self.transition.max_render_time()
            );
        }
        !slow
    }

    /// React to a page change
    ///
    /// Returns true if a transition was started.
    pub fn animate(&mut self) -> bool {
        if !self.core.enabled() {
            return false;
        }
        if !self.initialize_animation() {
            return false;
        }

        let overlay = self.transition.overlay_mut();
        overlay.show();
        overlay.animate();
        self.core.set_dirty();
        true
    }

    /// Drop the overlay once the fade is over and repaint the new page
    pub fn finish_animation(&mut self) {
        let overlay = self.transition.overlay_mut();
        overlay.hide();
        overlay.reset_start_snapshot();
        self.core.set_dirty();
    }
}

impl AnimationTarget for StackedWidgetData {
    fn set_property(&mut self, property: &str, value: f64) {
        if property == Self::OPACITY && self.transition.overlay_mut().set_opacity(value) {
            self.core.set_dirty();
        }
    }

    fn animation_finished(&mut self, property: &str) {
        if property == Self::OPACITY {
            self.finish_animation();
        }
    }
}

impl AnimationData for StackedWidgetData {
    fn core(&self) -> &DataCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DataCore {
        &mut self.core
    }

    fn set_duration(&mut self, duration_ms: u32) {
        self.transition.overlay_mut().set_duration(duration_ms);
    }

    fn is_animated(&self) -> bool {
        self.core.is_alive() && self.transition.overlay().is_animated()
    }

    fn set_steps(&mut self, steps: u32) {
        self.core.set_steps(steps);
        self.transition.overlay_mut().set_steps(steps);
    }

    fn target_destroyed(&mut self) {
        self.core.set_enabled(false);
        self.core.clear_target();
        let overlay = self.transition.overlay_mut();
        overlay.end_animation();
        overlay.hide();
        overlay.reset_start_snapshot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{widget_ref, MockStacked};
    use crate::geometry::Rect;
    use sheen_animation::AnimationScheduler;
    use std::time::Duration;

    #[test]
    fn test_page_change_plays_transition() {
        let scheduler = AnimationScheduler::new();
        let stacked = MockStacked::new(3);
        let data = StackedWidgetData::new(&widget_ref(&stacked), &scheduler.handle(), 100);
        assert_eq!(data.borrow().index(), Some(0));

        stacked.current.set(Some(2));
        assert!(data.borrow_mut().animate());
        assert_eq!(data.borrow().index(), Some(2));
        assert_eq!(*stacked.grabs.borrow(), vec![0]);

        let overlay = data.borrow().overlay();
        assert!(overlay.visible);
        assert!(overlay.start.is_some());
        assert_eq!(overlay.geometry, Rect::new(0, 0, 100, 50));
        assert!(data.borrow().is_animated());

        scheduler.advance(50.0);
        assert!((data.borrow().overlay().opacity - 0.5).abs() < 1e-9);

        scheduler.advance(50.0);
        let overlay = data.borrow().overlay();
        assert!(!overlay.visible);
        assert!(overlay.start.is_none());
        assert!(!data.borrow().is_animated());
    }

    #[test]
    fn test_unchanged_index_does_nothing() {
        let scheduler = AnimationScheduler::new();
        let stacked = MockStacked::new(3);
        let data = StackedWidgetData::new(&widget_ref(&stacked), &scheduler.handle(), 100);

        assert!(!data.borrow_mut().animate());
        assert!(stacked.grabs.borrow().is_empty());
    }

    #[test]
    fn test_invalid_index_is_tracked_without_capture() {
        let scheduler = AnimationScheduler::new();
        let stacked = MockStacked::new(3);
        let data = StackedWidgetData::new(&widget_ref(&stacked), &scheduler.handle(), 100);

        stacked.current.set(None);
        assert!(!data.borrow_mut().animate());
        assert_eq!(data.borrow().index(), None);
        assert!(stacked.grabs.borrow().is_empty());

        // Coming back from an invalid index doesn't animate either
        stacked.current.set(Some(1));
        assert!(!data.borrow_mut().animate());
        assert_eq!(data.borrow().index(), Some(1));
        assert!(stacked.grabs.borrow().is_empty());
    }

    #[test]
    fn test_hidden_container_is_not_animated() {
        let scheduler = AnimationScheduler::new();
        let stacked = MockStacked::new(3);
        let data = StackedWidgetData::new(&widget_ref(&stacked), &scheduler.handle(), 100);

        stacked.visible.set(false);
        stacked.current.set(Some(1));
        assert!(!data.borrow_mut().animate());
        assert_eq!(data.borrow().index(), Some(0));
    }

    #[test]
    fn test_slow_capture_skips_transition() {
        let scheduler = AnimationScheduler::new();
        let stacked = MockStacked::with_grab_delay(3, 20);
        let data = StackedWidgetData::new(&widget_ref(&stacked), &scheduler.handle(), 100);
        data.borrow_mut()
            .transition_mut()
            .set_max_render_time(Duration::from_millis(1));

        stacked.current.set(Some(1));
        assert!(!data.borrow_mut().animate());
        assert_eq!(data.borrow().index(), Some(1));
        assert!(!data.borrow().overlay().visible);
        assert!(!data.borrow().is_animated());
    }

    #[test]
    fn test_failed_capture_switches_instantly() {
        let scheduler = AnimationScheduler::new();
        let stacked = MockStacked::new(3);
        let data = StackedWidgetData::new(&widget_ref(&stacked), &scheduler.handle(), 100);
        stacked.grab_fails.set(true);

        stacked.current.set(Some(2));
        assert!(!data.borrow_mut().animate());
        assert_eq!(data.borrow().index(), Some(2));
        assert_eq!(*stacked.grabs.borrow(), vec![0]);

        let overlay = data.borrow().overlay();
        assert!(!overlay.visible);
        assert!(overlay.start.is_none());
        assert!(!data.borrow().is_animated());
        assert_eq!(scheduler.running_count(), 0);
    }

    #[test]
    fn test_disabled_data_keeps_index() {
        let scheduler = AnimationScheduler::new();
        let stacked = MockStacked::new(3);
        let data = StackedWidgetData::new(&widget_ref(&stacked), &scheduler.handle(), 100);
        data.borrow_mut().set_enabled(false);

        stacked.current.set(Some(1));
        assert!(!data.borrow_mut().animate());
        assert_eq!(data.borrow().index(), Some(0));
    }

    #[test]
    fn test_target_destroyed_releases_overlay() {
        let scheduler = AnimationScheduler::new();
        let stacked = MockStacked::new(3);
        let data = StackedWidgetData::new(&widget_ref(&stacked), &scheduler.handle(), 100);
        stacked.current.set(Some(1));
        data.borrow_mut().animate();

        data.borrow_mut().target_destroyed();
        let overlay = data.borrow().overlay();
        assert!(!overlay.visible);
        assert!(overlay.start.is_none());
        assert!(!data.borrow().enabled());
        assert_eq!(scheduler.running_count(), 0);
    }

    #[test]
    fn test_finish_repaints_container() {
        let scheduler = AnimationScheduler::new();
        let stacked = MockStacked::new(2);
        let data = StackedWidgetData::new(&widget_ref(&stacked), &scheduler.handle(), 100);
        stacked.current.set(Some(1));
        data.borrow_mut().animate();

        let updates = stacked.updates.get();
        data.borrow_mut().finish_animation();
        assert!(stacked.updates.get() > updates);
    }
}
