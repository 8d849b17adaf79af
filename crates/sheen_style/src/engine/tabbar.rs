//! Tab bar engine

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashSet;
use sheen_animation::SchedulerHandle;

use super::{BaseEngine, Engine};
use crate::data::{AnimationData, TabBarData, OPACITY_INVALID};
use crate::data_map::DataMap;
use crate::geometry::Point;
use crate::lifecycle::{DestroyListener, Lifecycle};
use crate::mode::AnimationMode;
use crate::widget::{WidgetId, WidgetRef};

struct TabBarMaps {
    hover: DataMap<TabBarData>,
    focus: DataMap<TabBarData>,
}

impl TabBarMaps {
    fn get(&self, mode: AnimationMode) -> Option<&DataMap<TabBarData>> {
        match mode {
            AnimationMode::Hover => Some(&self.hover),
            AnimationMode::Focus => Some(&self.focus),
            _ => None,
        }
    }

    fn unregister_widget(&mut self, widget: WidgetId) -> bool {
        let hover = self.hover.unregister_widget(widget);
        let focus = self.focus.unregister_widget(widget);
        hover || focus
    }
}

impl DestroyListener for RefCell<TabBarMaps> {
    fn widget_destroyed(&self, widget: WidgetId) {
        match self.try_borrow_mut() {
            Ok(mut maps) => {
                maps.unregister_widget(widget);
            }
            Err(_) => tracing::warn!(
                "TabBarEngine: maps busy, destruction of {:?} ignored",
                widget
            ),
        }
    }
}

/// Per-tab hover and focus highlights
pub struct TabBarEngine {
    maps: Rc<RefCell<TabBarMaps>>,
    base: BaseEngine,
}

impl TabBarEngine {
    pub fn new(scheduler: SchedulerHandle, lifecycle: &Lifecycle) -> Self {
        let maps = Rc::new(RefCell::new(TabBarMaps {
            hover: DataMap::new(),
            focus: DataMap::new(),
        }));
        let listener = Rc::downgrade(&maps);
        let listener: Weak<dyn DestroyListener> = listener;
        Self {
            base: BaseEngine::new(scheduler, lifecycle, listener),
            maps,
        }
    }

    /// Register a tab bar for hover and focus highlights
    pub fn register_widget(&self, widget: &WidgetRef) -> bool {
        let id = widget.id();
        let scheduler = self.base.scheduler();
        let duration = self.base.duration();
        let enabled = self.base.enabled();
        let steps = self.base.steps();

        {
            let mut maps = self.maps.borrow_mut();
            let maps = &mut *maps;
            for map in [&mut maps.hover, &mut maps.focus] {
                if !map.contains(id) {
                    let data = TabBarData::new(widget, scheduler, duration);
                    data.borrow_mut().set_steps(steps);
                    map.insert(id, data, enabled);
                }
            }
        }

        self.base.watch(id);
        tracing::debug!("TabBarEngine: registered {:?}", id);
        true
    }

    pub fn is_registered(&self, widget: WidgetId) -> bool {
        self.maps.borrow().hover.contains(widget)
    }

    fn data(&self, widget: WidgetId, mode: AnimationMode) -> Option<Rc<RefCell<TabBarData>>> {
        self.maps.borrow().get(mode)?.find(widget)
    }

    /// Record a hover or focus change of the tab under `position`
    pub fn update_state(
        &self,
        widget: WidgetId,
        position: Point,
        mode: AnimationMode,
        value: bool,
    ) -> bool {
        self.data(widget, mode)
            .is_some_and(|data| data.borrow_mut().update_state(position, value))
    }

    /// Fade out the hover highlight after the pointer left the bar
    pub fn hover_leave(&self, widget: WidgetId) -> bool {
        self.data(widget, AnimationMode::Hover)
            .is_some_and(|data| data.borrow_mut().clear_hover())
    }

    /// Whether the tab under `position` is animating
    pub fn is_animated(&self, widget: WidgetId, position: Point, mode: AnimationMode) -> bool {
        self.data(widget, mode).is_some_and(|data| {
            data.borrow()
                .animation(position)
                .is_some_and(|animation| animation.is_running())
        })
    }

    /// Opacity of the tab under `position`, [`OPACITY_INVALID`] unless running
    pub fn opacity(&self, widget: WidgetId, position: Point, mode: AnimationMode) -> f64 {
        if !self.is_animated(widget, position, mode) {
            return OPACITY_INVALID;
        }
        self.data(widget, mode)
            .map_or(OPACITY_INVALID, |data| data.borrow().opacity(position))
    }
}

impl Engine for TabBarEngine {
    fn base(&self) -> &BaseEngine {
        &self.base
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base.set_enabled(enabled);
        let mut maps = self.maps.borrow_mut();
        maps.hover.set_enabled(enabled);
        maps.focus.set_enabled(enabled);
    }

    fn set_duration(&mut self, duration_ms: u32) {
        self.base.set_duration(duration_ms);
        let maps = self.maps.borrow();
        maps.hover.set_duration(duration_ms);
        maps.focus.set_duration(duration_ms);
    }

    fn set_steps(&mut self, steps: u32) {
        self.base.set_steps(steps);
        let maps = self.maps.borrow();
        maps.hover.set_steps(steps);
        maps.focus.set_steps(steps);
    }

    fn unregister_widget(&self, widget: WidgetId) -> bool {
        let found = self.maps.borrow_mut().unregister_widget(widget);
        self.base.unwatch(widget);
        found
    }

    fn widgets(&self) -> FxHashSet<WidgetId> {
        let maps = self.maps.borrow();
        maps.hover.widgets().chain(maps.focus.widgets()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{widget_ref, MockTabBar};
    use sheen_animation::{AnimationScheduler, Direction};

    fn engine(scheduler: &AnimationScheduler, lifecycle: &Lifecycle) -> TabBarEngine {
        let mut engine = TabBarEngine::new(scheduler.handle(), lifecycle);
        engine.set_duration(100);
        engine
    }

    #[test]
    fn test_hover_two_tabs() {
        let scheduler = AnimationScheduler::new();
        let lifecycle = Lifecycle::new();
        let engine = engine(&scheduler, &lifecycle);
        let bar = MockTabBar::new(8);
        engine.register_widget(&widget_ref(&bar));

        assert!(engine.update_state(bar.id, bar.tab(2), AnimationMode::Hover, true));
        assert!(engine.update_state(bar.id, bar.tab(5), AnimationMode::Hover, true));

        assert!(engine.is_animated(bar.id, bar.tab(2), AnimationMode::Hover));
        assert!(engine.is_animated(bar.id, bar.tab(5), AnimationMode::Hover));
        assert!(!engine.is_animated(bar.id, bar.tab(3), AnimationMode::Hover));
        assert_eq!(engine.opacity(bar.id, bar.tab(2), AnimationMode::Hover), 1.0);
        assert_eq!(engine.opacity(bar.id, bar.tab(5), AnimationMode::Hover), 0.0);
        assert_eq!(
            engine.opacity(bar.id, bar.tab(3), AnimationMode::Hover),
            OPACITY_INVALID
        );

        let directions = engine.data(bar.id, AnimationMode::Hover).map(|data| {
            let data = data.borrow();
            (
                data.animation(bar.tab(2)).map(|a| a.direction()),
                data.animation(bar.tab(5)).map(|a| a.direction()),
            )
        });
        assert_eq!(
            directions,
            Some((Some(Direction::Backward), Some(Direction::Forward)))
        );
    }

    #[test]
    fn test_hover_and_focus_are_independent() {
        let scheduler = AnimationScheduler::new();
        let lifecycle = Lifecycle::new();
        let engine = engine(&scheduler, &lifecycle);
        let bar = MockTabBar::new(4);
        engine.register_widget(&widget_ref(&bar));

        engine.update_state(bar.id, bar.tab(1), AnimationMode::Focus, true);
        assert!(engine.is_animated(bar.id, bar.tab(1), AnimationMode::Focus));
        assert!(!engine.is_animated(bar.id, bar.tab(1), AnimationMode::Hover));

        // Categories without tab data
        assert!(!engine.update_state(bar.id, bar.tab(1), AnimationMode::Pressed, true));
        assert_eq!(
            engine.opacity(bar.id, bar.tab(1), AnimationMode::Enable),
            OPACITY_INVALID
        );
    }

    #[test]
    fn test_hover_leave() {
        let scheduler = AnimationScheduler::new();
        let lifecycle = Lifecycle::new();
        let engine = engine(&scheduler, &lifecycle);
        let bar = MockTabBar::new(4);
        engine.register_widget(&widget_ref(&bar));

        engine.update_state(bar.id, bar.tab(3), AnimationMode::Hover, true);
        scheduler.advance(100.0);
        assert!(engine.hover_leave(bar.id));
        assert!(!engine.hover_leave(bar.id));

        scheduler.advance(50.0);
        assert!((engine.opacity(bar.id, bar.tab(3), AnimationMode::Hover) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_register_twice_keeps_data() {
        let scheduler = AnimationScheduler::new();
        let lifecycle = Lifecycle::new();
        let engine = engine(&scheduler, &lifecycle);
        let bar = MockTabBar::new(4);
        let target = widget_ref(&bar);

        engine.register_widget(&target);
        let first = engine.data(bar.id, AnimationMode::Hover);
        engine.register_widget(&target);
        let second = engine.data(bar.id, AnimationMode::Hover);

        match (first, second) {
            (Some(first), Some(second)) => assert!(Rc::ptr_eq(&first, &second)),
            _ => panic!("tab data missing"),
        }
        assert_eq!(lifecycle.subscription_count(bar.id), 1);
    }

    #[test]
    fn test_destruction() {
        let scheduler = AnimationScheduler::new();
        let lifecycle = Lifecycle::new();
        let engine = engine(&scheduler, &lifecycle);
        let bar = MockTabBar::new(4);
        let id = bar.id;
        let position = bar.tab(1);
        engine.register_widget(&widget_ref(&bar));
        engine.update_state(id, position, AnimationMode::Hover, true);

        drop(bar);
        lifecycle.notify_destroyed(id);

        assert!(!engine.is_registered(id));
        assert!(!engine.is_animated(id, position, AnimationMode::Hover));
        assert_eq!(engine.opacity(id, position, AnimationMode::Hover), OPACITY_INVALID);
        assert!(engine.widgets().is_empty());
        assert_eq!(scheduler.animation_count(), 0);
    }
}
