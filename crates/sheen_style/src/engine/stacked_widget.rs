//! Stacked container page transitions

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use rustc_hash::FxHashSet;
use sheen_animation::SchedulerHandle;

use super::{BaseEngine, Engine};
use crate::data::{AnimationData, OverlayState, StackedWidgetData, DEFAULT_MAX_RENDER_TIME};
use crate::data_map::DataMap;
use crate::lifecycle::{DestroyListener, Lifecycle};
use crate::widget::{WidgetId, WidgetRef};

impl DestroyListener for RefCell<DataMap<StackedWidgetData>> {
    fn widget_destroyed(&self, widget: WidgetId) {
        match self.try_borrow_mut() {
            Ok(mut map) => {
                map.unregister_widget(widget);
            }
            Err(_) => tracing::warn!(
                "StackedWidgetEngine: map busy, destruction of {:?} ignored",
                widget
            ),
        }
    }
}

/// Cross-fades between the pages of stacked containers
pub struct StackedWidgetEngine {
    data: Rc<RefCell<DataMap<StackedWidgetData>>>,
    base: BaseEngine,
    max_render_time: Duration,
}

impl StackedWidgetEngine {
    pub fn new(scheduler: SchedulerHandle, lifecycle: &Lifecycle) -> Self {
        let data = Rc::new(RefCell::new(DataMap::new()));
        let listener = Rc::downgrade(&data);
        let listener: Weak<dyn DestroyListener> = listener;
        Self {
            base: BaseEngine::new(scheduler, lifecycle, listener),
            data,
            max_render_time: DEFAULT_MAX_RENDER_TIME,
        }
    }

    /// Register a stacked container
    ///
    /// Returns false for widgets without the stacked capability.
    pub fn register_widget(&self, widget: &WidgetRef) -> bool {
        if widget.as_stacked().is_none() {
            return false;
        }

        let id = widget.id();
        {
            let mut map = self.data.borrow_mut();
            if !map.contains(id) {
                let data = StackedWidgetData::new(widget, self.base.scheduler(), self.base.duration());
                {
                    let mut data = data.borrow_mut();
                    data.set_steps(self.base.steps());
                    data.transition_mut()
                        .set_max_render_time(self.max_render_time);
                }
                map.insert(id, data, self.base.enabled());
            }
        }

        self.base.watch(id);
        tracing::debug!("StackedWidgetEngine: registered {:?}", id);
        true
    }

    pub fn is_registered(&self, widget: WidgetId) -> bool {
        self.data.borrow().contains(widget)
    }

    fn find(&self, widget: WidgetId) -> Option<Rc<RefCell<StackedWidgetData>>> {
        self.data.borrow().find(widget)
    }

    /// The container switched pages; returns true if a transition started
    pub fn current_changed(&self, widget: WidgetId) -> bool {
        let Some(data) = self.find(widget) else {
            return false;
        };
        let started = data.borrow_mut().animate();
        if started {
            tracing::trace!("StackedWidgetEngine: transition started on {:?}", widget);
        }
        started
    }

    /// Overlay to paint over `widget`
    pub fn overlay(&self, widget: WidgetId) -> Option<OverlayState> {
        self.find(widget).map(|data| data.borrow().overlay())
    }

    pub fn is_animated(&self, widget: WidgetId) -> bool {
        self.find(widget)
            .is_some_and(|data| data.borrow().is_animated())
    }

    pub fn max_render_time(&self) -> Duration {
        self.max_render_time
    }

    /// Longest acceptable page capture before a transition is skipped
    pub fn set_max_render_time(&mut self, max_render_time: Duration) {
        self.max_render_time = max_render_time;
        for data in self.data.borrow().values() {
            data.borrow_mut()
                .transition_mut()
                .set_max_render_time(max_render_time);
        }
    }
}

impl Engine for StackedWidgetEngine {
    fn base(&self) -> &BaseEngine {
        &self.base
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base.set_enabled(enabled);
        self.data.borrow_mut().set_enabled(enabled);
    }

    fn set_duration(&mut self, duration_ms: u32) {
        self.base.set_duration(duration_ms);
        self.data.borrow().set_duration(duration_ms);
    }

    fn set_steps(&mut self, steps: u32) {
        self.base.set_steps(steps);
        self.data.borrow().set_steps(steps);
    }

    fn unregister_widget(&self, widget: WidgetId) -> bool {
        let found = self.data.borrow_mut().unregister_widget(widget);
        self.base.unwatch(widget);
        found
    }

    fn widgets(&self) -> FxHashSet<WidgetId> {
        self.data.borrow().widgets().collect()
    }
}
