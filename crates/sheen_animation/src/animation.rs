//! Directional property animation
//!
//! An [`Animation`] drives one numeric property of an [`AnimationTarget`]
//! between 0.0 and 1.0 over a fixed duration. [`Direction::Forward`] rises
//! from 0 to 1, [`Direction::Backward`] falls from 1 to 0.
//!
//! ```ignore
//! let fade = Animation::new(&scheduler.handle(), 150);
//! fade.bind(target, "opacity");
//!
//! fade.set_direction(Direction::Backward);
//! fade.start(); // target receives values from 1.0 down to 0.0
//! ```

use std::cell::RefCell;
use std::rc::Weak;

use crate::scheduler::{AnimationId, Binding, SchedulerHandle, Slot};

/// Receiver of animated property values
pub trait AnimationTarget {
    /// Called on every frame with the property's new value
    fn set_property(&mut self, property: &str, value: f64);

    /// Called once when the animation bound to `property` reaches its end
    fn animation_finished(&mut self, _property: &str) {}
}

/// Direction in which an animation runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From 0.0 to 1.0
    #[default]
    Forward,
    /// From 1.0 to 0.0
    Backward,
}

impl Direction {
    /// Value at which a run in this direction begins
    pub fn start_value(self) -> f64 {
        match self {
            Direction::Forward => 0.0,
            Direction::Backward => 1.0,
        }
    }

    /// Value at which a run in this direction ends
    pub fn end_value(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => 0.0,
        }
    }

    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// A cancellable, time-bounded transition of one property
///
/// The state lives in the scheduler; this value owns the slot and frees it
/// when dropped. An animation created from a dead scheduler handle is inert:
/// it never runs and reports idle defaults.
pub struct Animation {
    handle: SchedulerHandle,
    id: Option<AnimationId>,
}

impl Animation {
    /// Create an idle animation running forward for `duration_ms`
    pub fn new(handle: &SchedulerHandle, duration_ms: u32) -> Self {
        Self {
            handle: handle.clone(),
            id: handle.register(Slot::new(duration_ms)),
        }
    }

    /// Bind this animation to a property of `target`
    ///
    /// The target is held weakly; once it is gone, updates are dropped.
    pub fn bind(&self, target: Weak<RefCell<dyn AnimationTarget>>, property: &'static str) {
        self.with_slot_mut(|slot| slot.binding = Some(Binding { target, property }));
    }

    /// Name of the bound property, if any
    pub fn property(&self) -> Option<&'static str> {
        self.with_slot(|slot| slot.binding.as_ref().map(|b| b.property))
            .flatten()
    }

    /// Set the duration in milliseconds
    ///
    /// A running animation keeps its progress and continues at the new pace.
    pub fn set_duration(&self, duration_ms: u32) {
        self.with_slot_mut(|slot| slot.duration_ms = duration_ms);
    }

    /// Duration in milliseconds
    pub fn duration(&self) -> u32 {
        self.with_slot(|slot| slot.duration_ms).unwrap_or(0)
    }

    /// Set the direction
    ///
    /// Reversing a running animation keeps the current value and heads back.
    pub fn set_direction(&self, direction: Direction) {
        self.with_slot_mut(|slot| slot.direction = direction);
    }

    /// Current direction
    pub fn direction(&self) -> Direction {
        self.with_slot(|slot| slot.direction).unwrap_or_default()
    }

    /// Start from the beginning of the current direction
    ///
    /// Starting a running animation restarts it. A zero duration completes
    /// at once and leaves the value at the end of the current direction.
    pub fn start(&self) {
        if let Some(id) = self.id {
            let _ = self.handle.with_inner(|inner| inner.start(id));
        }
    }

    /// Stop immediately, leaving the value where it is
    pub fn stop(&self) {
        if let Some(id) = self.id {
            let _ = self.handle.with_inner(|inner| inner.stop(id));
        }
    }

    /// Stop, then start from the beginning
    pub fn restart(&self) {
        self.stop();
        self.start();
    }

    /// Check if the animation is running
    pub fn is_running(&self) -> bool {
        self.with_slot(|slot| slot.running).unwrap_or(false)
    }

    /// Current interpolated value in `[0, 1]`
    pub fn value(&self) -> f64 {
        self.with_slot(|slot| slot.progress).unwrap_or(0.0)
    }

    /// Current time in milliseconds, measured from the forward start
    pub fn current_time(&self) -> f64 {
        self.with_slot(|slot| slot.progress * f64::from(slot.duration_ms))
            .unwrap_or(0.0)
    }

    fn with_slot<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&Slot) -> R,
    {
        self.id.and_then(|id| self.handle.with_slot(id, f))
    }

    fn with_slot_mut<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Slot) -> R,
    {
        self.id.and_then(|id| self.handle.with_slot_mut(id, f))
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            let _ = self.handle.with_inner(|inner| inner.remove(id));
        }
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("duration", &self.duration())
            .field("direction", &self.direction())
            .field("running", &self.is_running())
            .field("value", &self.value())
            .finish()
    }
}
