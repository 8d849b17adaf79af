//! Per-widget animation data
//!
//! A data object binds one or more [`Animation`]s to one target widget. It
//! holds the widget weakly: once the widget is gone every accessor answers
//! with its inert default, and the destruction notification turns the data
//! off for good.
//!
//! Data objects live in `Rc<RefCell<_>>` so their animations can write the
//! animated properties back through [`AnimationTarget`].

mod enable;
mod scrollbar;
mod stacked_widget;
mod tabbar;
mod transition;
mod widget_state;

pub use enable::EnableData;
pub use scrollbar::ScrollBarData;
pub use stacked_widget::StackedWidgetData;
pub use tabbar::TabBarData;
pub use transition::{OverlayState, TransitionData, TransitionOverlay, DEFAULT_MAX_RENDER_TIME};
pub use widget_state::WidgetStateData;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use sheen_animation::{digitize, Animation, AnimationTarget, SchedulerHandle};

use crate::widget::{Widget, WidgetId, WidgetRef};

/// Opacity reported when nothing is animating
pub const OPACITY_INVALID: f64 = -1.0;

/// State shared by every data type: target, switches and repaint flag
pub struct DataCore {
    id: WidgetId,
    target: Option<Weak<dyn Widget>>,
    enabled: bool,
    dirty: bool,
    steps: u32,
}

impl DataCore {
    pub fn new(target: &WidgetRef) -> Self {
        Self {
            id: target.id(),
            target: Some(Rc::downgrade(target)),
            enabled: true,
            dirty: false,
            steps: 0,
        }
    }

    /// Identity of the target, kept after the target is gone
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The target, if it is still alive
    pub fn target(&self) -> Option<WidgetRef> {
        self.target.as_ref().and_then(Weak::upgrade)
    }

    /// Whether the target is still alive
    pub fn is_alive(&self) -> bool {
        self.target
            .as_ref()
            .is_some_and(|target| target.strong_count() > 0)
    }

    /// Release the target reference
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.steps = steps;
    }

    /// Apply the quantization policy
    pub fn digitize(&self, value: f64) -> f64 {
        digitize(value, self.steps)
    }

    /// Mark for repaint and ask a live target to repaint
    pub fn set_dirty(&mut self) {
        self.dirty = true;
        if let Some(target) = self.target() {
            target.update();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the repaint flag, returning its previous value
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Behavior shared by every data type
pub trait AnimationData: AnimationTarget {
    fn core(&self) -> &DataCore;

    fn core_mut(&mut self) -> &mut DataCore;

    /// Propagate a duration to every owned animation
    fn set_duration(&mut self, duration_ms: u32);

    /// True while any owned animation runs for a live target
    fn is_animated(&self) -> bool;

    fn enabled(&self) -> bool {
        self.core().enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.core_mut().set_enabled(enabled);
    }

    fn set_steps(&mut self, steps: u32) {
        self.core_mut().set_steps(steps);
    }

    /// Turn inert once the target is destroyed
    fn target_destroyed(&mut self) {
        self.set_enabled(false);
        self.core_mut().clear_target();
    }
}

/// Data driven by one boolean state (hover, focus, enable, pressed)
pub trait StateData: AnimationData {
    /// Build the data for `target`, with its animations bound to it
    fn create(target: &WidgetRef, scheduler: &SchedulerHandle, duration_ms: u32) -> Rc<RefCell<Self>>
    where
        Self: Sized;

    /// Record a new state; returns true on a visible change
    fn update_state(&mut self, value: bool) -> bool;

    fn state(&self) -> bool;

    fn opacity(&self) -> f64;

    fn animation(&self) -> &Animation;
}

/// Weak animation target for a freshly built data object
pub(crate) fn animation_target<T>(data: &Rc<RefCell<T>>) -> Weak<RefCell<dyn AnimationTarget>>
where
    T: AnimationTarget + 'static,
{
    let target = Rc::downgrade(data);
    let target: Weak<RefCell<dyn AnimationTarget>> = target;
    target
}
