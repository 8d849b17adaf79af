//! Animation engines
//!
//! An engine owns the data maps of one family of widgets and answers the
//! paint routine's questions about them. Every engine is a destruction
//! listener: it subscribes to each widget it registers and drops that
//! widget's data when the toolkit reports it destroyed.

mod scrollbar;
mod stacked_widget;
mod tabbar;
mod widget_state;

pub use scrollbar::ScrollBarEngine;
pub use stacked_widget::StackedWidgetEngine;
pub use tabbar::TabBarEngine;
pub use widget_state::WidgetStateEngine;

use std::rc::Weak;

use rustc_hash::FxHashSet;
use sheen_animation::SchedulerHandle;

use crate::lifecycle::{DestroyListener, Lifecycle, ListenerId};
use crate::widget::WidgetId;

/// Duration of engines created without configuration
pub const DEFAULT_DURATION_MS: u32 = 180;

/// Settings and lifecycle subscription shared by every engine
pub struct BaseEngine {
    scheduler: SchedulerHandle,
    lifecycle: Lifecycle,
    listener: ListenerId,
    enabled: bool,
    duration_ms: u32,
    steps: u32,
}

impl BaseEngine {
    /// Register `listener` with the hub for the life of the engine
    pub fn new(
        scheduler: SchedulerHandle,
        lifecycle: &Lifecycle,
        listener: Weak<dyn DestroyListener>,
    ) -> Self {
        let listener = lifecycle.add_listener(listener);
        Self {
            scheduler,
            lifecycle: lifecycle.clone(),
            listener,
            enabled: true,
            duration_ms: DEFAULT_DURATION_MS,
            steps: 0,
        }
    }

    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    /// Subscribe to the destruction of `widget`; repeated calls are no-ops
    pub fn watch(&self, widget: WidgetId) {
        self.lifecycle.subscribe(widget, self.listener);
    }

    /// Stop listening for `widget`
    pub fn unwatch(&self, widget: WidgetId) {
        self.lifecycle.unsubscribe(widget, self.listener);
    }

    pub fn is_watching(&self, widget: WidgetId) -> bool {
        self.lifecycle.is_subscribed(widget, self.listener)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn duration(&self) -> u32 {
        self.duration_ms
    }

    pub fn set_duration(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.steps = steps;
    }
}

impl Drop for BaseEngine {
    fn drop(&mut self) {
        self.lifecycle.remove_listener(self.listener);
    }
}

/// Settings and teardown common to every engine
pub trait Engine {
    fn base(&self) -> &BaseEngine;

    /// Enable or disable every animation of the engine
    fn set_enabled(&mut self, enabled: bool);

    /// Apply a duration to the engine and every live animation
    fn set_duration(&mut self, duration_ms: u32);

    /// Apply a quantization step count to every live data
    fn set_steps(&mut self, steps: u32);

    /// Forget `widget`; returns false if it wasn't registered
    fn unregister_widget(&self, widget: WidgetId) -> bool;

    /// Every widget with data in any map
    fn widgets(&self) -> FxHashSet<WidgetId>;

    fn enabled(&self) -> bool {
        self.base().enabled()
    }

    fn duration(&self) -> u32 {
        self.base().duration()
    }

    fn steps(&self) -> u32 {
        self.base().steps()
    }
}
