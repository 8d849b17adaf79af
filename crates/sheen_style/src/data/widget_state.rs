//! Boolean widget state with a single fading opacity

use std::cell::RefCell;
use std::rc::Rc;

use sheen_animation::{Animation, AnimationTarget, Direction, SchedulerHandle};

use super::{animation_target, AnimationData, DataCore, StateData};
use crate::widget::WidgetRef;

/// Hover, focus or pressed state of one widget
///
/// Activating the state fades the opacity in, deactivating fades it out.
/// A change while the fade is still running reverses it in place.
pub struct WidgetStateData {
    core: DataCore,
    animation: Animation,
    state: bool,
    opacity: f64,
}

impl WidgetStateData {
    pub(crate) const OPACITY: &'static str = "opacity";

    /// Unbound data; the caller binds the animation to its own cell
    pub(crate) fn unbound(
        target: &WidgetRef,
        scheduler: &SchedulerHandle,
        duration_ms: u32,
        state: bool,
    ) -> Self {
        Self {
            core: DataCore::new(target),
            animation: Animation::new(scheduler, duration_ms),
            state,
            opacity: if state { 1.0 } else { 0.0 },
        }
    }

    /// Build data whose state starts as `state`
    pub fn with_state(
        target: &WidgetRef,
        scheduler: &SchedulerHandle,
        duration_ms: u32,
        state: bool,
    ) -> Rc<RefCell<Self>> {
        let data = Rc::new(RefCell::new(Self::unbound(
            target,
            scheduler,
            duration_ms,
            state,
        )));
        data.borrow()
            .animation
            .bind(animation_target(&data), Self::OPACITY);
        data
    }

    /// Set the opacity, quantized; unchanged values don't repaint
    pub fn set_opacity(&mut self, value: f64) {
        let value = self.core.digitize(value);
        if self.opacity == value {
            return;
        }
        self.opacity = value;
        self.core.set_dirty();
    }

    /// Bring the opacity in line with the animation after a start
    fn sync_opacity(&mut self) {
        let value = self.animation.value();
        self.set_opacity(value);
    }
}

impl AnimationTarget for WidgetStateData {
    fn set_property(&mut self, property: &str, value: f64) {
        if property == Self::OPACITY {
            self.set_opacity(value);
        }
    }
}

impl AnimationData for WidgetStateData {
    fn core(&self) -> &DataCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DataCore {
        &mut self.core
    }

    fn set_duration(&mut self, duration_ms: u32) {
        self.animation.set_duration(duration_ms);
    }

    fn is_animated(&self) -> bool {
        self.core.is_alive() && self.animation.is_running()
    }
}

impl StateData for WidgetStateData {
    fn create(target: &WidgetRef, scheduler: &SchedulerHandle, duration_ms: u32) -> Rc<RefCell<Self>> {
        Self::with_state(target, scheduler, duration_ms, false)
    }

    fn update_state(&mut self, value: bool) -> bool {
        if !self.core.is_alive() || self.state == value {
            return false;
        }

        self.state = value;
        let direction = if value {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.animation.set_direction(direction);

        if !self.core.enabled() {
            self.animation.stop();
            self.set_opacity(direction.end_value());
            return true;
        }

        if !self.animation.is_running() {
            self.animation.start();
        }
        self.sync_opacity();
        true
    }

    fn state(&self) -> bool {
        self.state
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn animation(&self) -> &Animation {
        &self.animation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{widget_ref, MockWidget};
    use sheen_animation::AnimationScheduler;

    #[test]
    fn test_update_state_reports_changes_once() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = WidgetStateData::create(&widget_ref(&widget), &scheduler.handle(), 100);

        assert!(data.borrow_mut().update_state(true));
        assert!(!data.borrow_mut().update_state(true));
        assert!(data.borrow().state());
        assert!(data.borrow().is_animated());
        assert_eq!(data.borrow().animation().direction(), Direction::Forward);
    }

    #[test]
    fn test_opacity_follows_animation() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = WidgetStateData::create(&widget_ref(&widget), &scheduler.handle(), 100);

        data.borrow_mut().update_state(true);
        assert_eq!(data.borrow().opacity(), 0.0);

        scheduler.advance(50.0);
        assert!((data.borrow().opacity() - 0.5).abs() < 1e-9);
        assert!(widget.updates.get() > 0);

        scheduler.advance(50.0);
        assert_eq!(data.borrow().opacity(), 1.0);
        assert!(!data.borrow().is_animated());
    }

    #[test]
    fn test_deactivate_mid_fade_reverses_in_place() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = WidgetStateData::create(&widget_ref(&widget), &scheduler.handle(), 100);

        data.borrow_mut().update_state(true);
        scheduler.advance(60.0);
        assert!(data.borrow_mut().update_state(false));
        assert_eq!(data.borrow().animation().direction(), Direction::Backward);
        assert!((data.borrow().opacity() - 0.6).abs() < 1e-9);

        scheduler.advance(20.0);
        assert!((data.borrow().opacity() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_disabled_data_snaps() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = WidgetStateData::create(&widget_ref(&widget), &scheduler.handle(), 100);
        data.borrow_mut().set_enabled(false);

        assert!(data.borrow_mut().update_state(true));
        assert_eq!(data.borrow().opacity(), 1.0);
        assert!(!data.borrow().is_animated());
        assert!(data.borrow_mut().core_mut().take_dirty());

        assert!(data.borrow_mut().update_state(false));
        assert_eq!(data.borrow().opacity(), 0.0);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = WidgetStateData::create(&widget_ref(&widget), &scheduler.handle(), 0);

        assert!(data.borrow_mut().update_state(true));
        assert_eq!(data.borrow().opacity(), 1.0);
        assert!(!data.borrow().is_animated());
    }

    #[test]
    fn test_opacity_is_quantized() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = WidgetStateData::create(&widget_ref(&widget), &scheduler.handle(), 100);

        data.borrow_mut().set_steps(4);
        data.borrow_mut().set_opacity(0.63);
        assert_eq!(data.borrow().opacity(), 0.5);

        data.borrow_mut().set_steps(0);
        data.borrow_mut().set_opacity(0.63);
        assert_eq!(data.borrow().opacity(), 0.63);
    }

    #[test]
    fn test_unchanged_quantized_value_does_not_repaint() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = WidgetStateData::create(&widget_ref(&widget), &scheduler.handle(), 100);
        data.borrow_mut().set_steps(4);

        data.borrow_mut().set_opacity(0.55);
        let updates = widget.updates.get();
        data.borrow_mut().set_opacity(0.6);
        assert_eq!(widget.updates.get(), updates);
    }

    #[test]
    fn test_dead_target_is_inert() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = WidgetStateData::create(&widget_ref(&widget), &scheduler.handle(), 100);
        drop(widget);

        assert!(!data.borrow_mut().update_state(true));
        assert!(!data.borrow().is_animated());

        data.borrow_mut().target_destroyed();
        assert!(!data.borrow().enabled());
        assert!(data.borrow().core().target().is_none());
    }

    #[test]
    fn test_set_duration_propagates() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = WidgetStateData::create(&widget_ref(&widget), &scheduler.handle(), 100);

        data.borrow_mut().set_duration(250);
        assert_eq!(data.borrow().animation().duration(), 250);
    }
}
