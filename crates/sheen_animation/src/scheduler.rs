//! Animation scheduler
//!
//! Owns the state of every [`Animation`](crate::Animation) and advances the
//! running ones once per frame. The scheduler holds no thread and no timer:
//! the host event loop calls [`AnimationScheduler::advance`] with the time
//! elapsed since the previous frame.
//!
//! ```ignore
//! let scheduler = AnimationScheduler::new();
//! let fade = Animation::new(&scheduler.handle(), 150);
//! fade.start();
//!
//! // In the event loop
//! while scheduler.advance(16.0) {
//!     request_repaint();
//! }
//! ```
//!
//! Bound targets receive the interpolated value after the scheduler has
//! released its own borrow, so a target may freely query or restart
//! animations from inside its callbacks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::animation::{AnimationTarget, Direction};

new_key_type! {
    /// Handle to an animation slot owned by the scheduler
    pub struct AnimationId;
}

/// Property binding of an animation slot
#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) target: Weak<RefCell<dyn AnimationTarget>>,
    pub(crate) property: &'static str,
}

/// Per-animation state stored in the scheduler
#[derive(Clone)]
pub(crate) struct Slot {
    pub(crate) duration_ms: u32,
    pub(crate) direction: Direction,
    pub(crate) running: bool,
    /// Normalized position in `[0, 1]`, which is also the output value
    pub(crate) progress: f64,
    pub(crate) binding: Option<Binding>,
}

impl Slot {
    pub(crate) fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            direction: Direction::Forward,
            running: false,
            progress: 0.0,
            binding: None,
        }
    }

    /// Move the slot forward in time. Returns true when the end was reached.
    fn step(&mut self, dt_ms: f32) -> bool {
        if self.duration_ms == 0 {
            self.progress = self.direction.end_value();
            self.running = false;
            return true;
        }

        let delta = f64::from(dt_ms.max(0.0)) / f64::from(self.duration_ms);
        self.progress = match self.direction {
            Direction::Forward => (self.progress + delta).min(1.0),
            Direction::Backward => (self.progress - delta).max(0.0),
        };

        if self.progress == self.direction.end_value() {
            self.running = false;
            true
        } else {
            false
        }
    }
}

/// A value update produced by a tick, delivered once the scheduler is unlocked
struct Delivery {
    binding: Binding,
    value: f64,
    finished: bool,
}

impl Delivery {
    fn deliver(self) {
        let Some(target) = self.binding.target.upgrade() else {
            return;
        };
        let Ok(mut target) = target.try_borrow_mut() else {
            tracing::warn!(
                "AnimationScheduler: target for '{}' is busy, skipping update",
                self.binding.property
            );
            return;
        };
        target.set_property(self.binding.property, self.value);
        if self.finished {
            target.animation_finished(self.binding.property);
        }
    }
}

/// Internal state of the animation scheduler
#[derive(Default)]
pub(crate) struct SchedulerInner {
    pub(crate) slots: SlotMap<AnimationId, Slot>,
    /// Slots currently running; a tick only visits these
    running: Vec<AnimationId>,
}

impl SchedulerInner {
    pub(crate) fn start(&mut self, id: AnimationId) {
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };

        slot.progress = slot.direction.start_value();
        if slot.duration_ms == 0 {
            // Zero duration completes in place
            slot.progress = slot.direction.end_value();
            slot.running = false;
            return;
        }

        slot.running = true;
        if !self.running.contains(&id) {
            self.running.push(id);
        }
    }

    pub(crate) fn stop(&mut self, id: AnimationId) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.running = false;
        }
        self.running.retain(|running| *running != id);
    }

    pub(crate) fn remove(&mut self, id: AnimationId) {
        self.running.retain(|running| *running != id);
        let _ = self.slots.remove(id);
    }

    fn step(&mut self, dt_ms: f32) -> Vec<Delivery> {
        let mut deliveries = Vec::with_capacity(self.running.len());

        for &id in &self.running {
            let Some(slot) = self.slots.get_mut(id) else {
                continue;
            };
            if !slot.running {
                continue;
            }
            let finished = slot.step(dt_ms);
            if let Some(binding) = &slot.binding {
                deliveries.push(Delivery {
                    binding: binding.clone(),
                    value: slot.progress,
                    finished,
                });
            }
        }

        let slots = &self.slots;
        self.running
            .retain(|id| slots.get(*id).is_some_and(|slot| slot.running));

        deliveries
    }
}

/// The frame-driven scheduler that advances all running animations
///
/// Cloning the scheduler yields another reference to the same state.
#[derive(Clone, Default)]
pub struct AnimationScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl AnimationScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a weak handle for creating animations
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Advance every running animation by `dt_ms` milliseconds
    ///
    /// Bound targets are updated after the tick. Returns true if any
    /// animation is still running and another frame is needed.
    pub fn advance(&self, dt_ms: f32) -> bool {
        let deliveries = self.inner.borrow_mut().step(dt_ms);
        tracing::trace!(
            "AnimationScheduler: advanced {}ms, {} updates",
            dt_ms,
            deliveries.len()
        );
        for delivery in deliveries {
            delivery.deliver();
        }
        self.has_running_animations()
    }

    /// Check if any animation is running
    pub fn has_running_animations(&self) -> bool {
        !self.inner.borrow().running.is_empty()
    }

    /// Number of running animations
    pub fn running_count(&self) -> usize {
        self.inner.borrow().running.len()
    }

    /// Number of animations alive in the scheduler
    pub fn animation_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }
}

/// A weak handle to the animation scheduler
///
/// Animations hold one of these. It won't keep the scheduler alive, and every
/// operation becomes a no-op once the scheduler is dropped.
#[derive(Clone, Default)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub(crate) fn register(&self, slot: Slot) -> Option<AnimationId> {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().slots.insert(slot))
    }

    pub(crate) fn with_inner<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut SchedulerInner) -> R,
    {
        self.inner.upgrade().map(|inner| f(&mut inner.borrow_mut()))
    }

    pub(crate) fn with_slot<F, R>(&self, id: AnimationId, f: F) -> Option<R>
    where
        F: FnOnce(&Slot) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.borrow().slots.get(id).map(f))
    }

    pub(crate) fn with_slot_mut<F, R>(&self, id: AnimationId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Slot) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.borrow_mut().slots.get_mut(id).map(f))
    }
}
