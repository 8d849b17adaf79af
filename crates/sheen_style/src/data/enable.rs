//! Enabled/disabled fade

use std::cell::RefCell;
use std::rc::Rc;

use sheen_animation::{Animation, AnimationTarget, SchedulerHandle};

use super::{animation_target, AnimationData, DataCore, StateData, WidgetStateData};
use crate::widget::WidgetRef;

/// Fade between the enabled and disabled look of a widget
///
/// The state mirrors the target's enabled flag; the toolkit reports changes
/// through [`EnableData::enabled_changed`].
pub struct EnableData {
    inner: WidgetStateData,
}

impl EnableData {
    /// Re-read the target's enabled flag
    ///
    /// Returns true if the state changed.
    pub fn enabled_changed(&mut self) -> bool {
        match self.inner.core().target() {
            Some(target) => {
                let enabled = target.is_enabled();
                self.inner.update_state(enabled)
            }
            None => false,
        }
    }
}

impl AnimationTarget for EnableData {
    fn set_property(&mut self, property: &str, value: f64) {
        self.inner.set_property(property, value);
    }
}

impl AnimationData for EnableData {
    fn core(&self) -> &DataCore {
        self.inner.core()
    }

    fn core_mut(&mut self) -> &mut DataCore {
        self.inner.core_mut()
    }

    fn set_duration(&mut self, duration_ms: u32) {
        self.inner.set_duration(duration_ms);
    }

    fn is_animated(&self) -> bool {
        self.inner.is_animated()
    }
}

impl StateData for EnableData {
    fn create(target: &WidgetRef, scheduler: &SchedulerHandle, duration_ms: u32) -> Rc<RefCell<Self>> {
        let inner = WidgetStateData::unbound(target, scheduler, duration_ms, target.is_enabled());
        let data = Rc::new(RefCell::new(Self { inner }));
        data.borrow()
            .inner
            .animation()
            .bind(animation_target(&data), WidgetStateData::OPACITY);
        data
    }

    fn update_state(&mut self, value: bool) -> bool {
        self.inner.update_state(value)
    }

    fn state(&self) -> bool {
        self.inner.state()
    }

    fn opacity(&self) -> f64 {
        self.inner.opacity()
    }

    fn animation(&self) -> &Animation {
        self.inner.animation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{widget_ref, MockWidget};
    use sheen_animation::{AnimationScheduler, Direction};

    #[test]
    fn test_initial_state_mirrors_target() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        widget.enabled.set(false);

        let data = EnableData::create(&widget_ref(&widget), &scheduler.handle(), 100);
        assert!(!data.borrow().state());
        assert_eq!(data.borrow().opacity(), 0.0);
    }

    #[test]
    fn test_enabled_change_fades() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = EnableData::create(&widget_ref(&widget), &scheduler.handle(), 100);
        assert!(data.borrow().state());

        // No change reported while the flag is unchanged
        assert!(!data.borrow_mut().enabled_changed());

        widget.enabled.set(false);
        assert!(data.borrow_mut().enabled_changed());
        assert!(data.borrow().is_animated());
        assert_eq!(data.borrow().animation().direction(), Direction::Backward);

        scheduler.advance(100.0);
        assert_eq!(data.borrow().opacity(), 0.0);
    }

    #[test]
    fn test_enabled_change_after_destruction() {
        let scheduler = AnimationScheduler::new();
        let widget = MockWidget::new();
        let data = EnableData::create(&widget_ref(&widget), &scheduler.handle(), 100);
        drop(widget);

        assert!(!data.borrow_mut().enabled_changed());
    }
}
