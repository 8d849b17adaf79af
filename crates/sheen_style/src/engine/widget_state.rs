//! Hover, focus, enable and pressed state of generic widgets

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashSet;
use sheen_animation::SchedulerHandle;

use super::{BaseEngine, Engine};
use crate::data::{AnimationData, EnableData, StateData, WidgetStateData, OPACITY_INVALID};
use crate::data_map::DataMap;
use crate::lifecycle::{DestroyListener, Lifecycle};
use crate::mode::{AnimationMode, AnimationModes};
use crate::widget::{WidgetId, WidgetRef};

/// One data map per animation category
///
/// The hover map is generic so that specialized engines can keep richer
/// hover data while sharing the rest.
pub(crate) struct StateMaps<H> {
    pub(crate) hover: DataMap<H>,
    pub(crate) focus: DataMap<WidgetStateData>,
    pub(crate) enable: DataMap<EnableData>,
    pub(crate) pressed: DataMap<WidgetStateData>,
}

impl<H: StateData> StateMaps<H> {
    fn new() -> Self {
        Self {
            hover: DataMap::new(),
            focus: DataMap::new(),
            enable: DataMap::new(),
            pressed: DataMap::new(),
        }
    }

    fn unregister_widget(&mut self, widget: WidgetId) -> bool {
        let mut found = false;
        found |= self.hover.unregister_widget(widget);
        found |= self.focus.unregister_widget(widget);
        found |= self.enable.unregister_widget(widget);
        found |= self.pressed.unregister_widget(widget);
        found
    }

    fn contains(&self, widget: WidgetId, mode: AnimationMode) -> bool {
        match mode {
            AnimationMode::Hover => self.hover.contains(widget),
            AnimationMode::Focus => self.focus.contains(widget),
            AnimationMode::Enable => self.enable.contains(widget),
            AnimationMode::Pressed => self.pressed.contains(widget),
        }
    }
}

impl<H: StateData> DestroyListener for RefCell<StateMaps<H>> {
    fn widget_destroyed(&self, widget: WidgetId) {
        match self.try_borrow_mut() {
            Ok(mut maps) => {
                if maps.unregister_widget(widget) {
                    tracing::debug!("WidgetStateEngine: dropped data of destroyed {:?}", widget);
                }
            }
            Err(_) => tracing::warn!(
                "WidgetStateEngine: maps busy, destruction of {:?} ignored",
                widget
            ),
        }
    }
}

/// Engine for boolean widget states
///
/// Each widget gets independent data per requested category. All queries
/// answer with inert defaults for widgets that were never registered or have
/// since been destroyed.
///
/// ```ignore
/// let engine = WidgetStateEngine::<WidgetStateData>::new(scheduler.handle(), &lifecycle);
/// engine.register_widget(&button, AnimationModes::HOVER | AnimationModes::FOCUS);
///
/// engine.update_state(button.id(), AnimationMode::Hover, true);
/// scheduler.advance(16.0);
/// let opacity = engine.opacity(button.id(), AnimationMode::Hover);
/// ```
pub struct WidgetStateEngine<H: StateData + 'static = WidgetStateData> {
    pub(crate) maps: Rc<RefCell<StateMaps<H>>>,
    base: BaseEngine,
}

impl<H: StateData + 'static> WidgetStateEngine<H> {
    pub fn new(scheduler: SchedulerHandle, lifecycle: &Lifecycle) -> Self {
        let maps = Rc::new(RefCell::new(StateMaps::new()));
        let listener = Rc::downgrade(&maps);
        let listener: Weak<dyn DestroyListener> = listener;
        Self {
            base: BaseEngine::new(scheduler, lifecycle, listener),
            maps,
        }
    }

    /// Register `widget` for every category in `modes`
    ///
    /// Categories already registered keep their data. The destruction
    /// subscription is installed once, however often this is called.
    pub fn register_widget(&self, widget: &WidgetRef, modes: AnimationModes) -> bool {
        let id = widget.id();
        let scheduler = self.base.scheduler();
        let duration = self.base.duration();
        let enabled = self.base.enabled();
        let steps = self.base.steps();

        {
            let mut maps = self.maps.borrow_mut();
            if modes.has(AnimationMode::Hover) && !maps.hover.contains(id) {
                let data = H::create(widget, scheduler, duration);
                data.borrow_mut().set_steps(steps);
                maps.hover.insert(id, data, enabled);
            }
            if modes.has(AnimationMode::Focus) && !maps.focus.contains(id) {
                let data = WidgetStateData::create(widget, scheduler, duration);
                data.borrow_mut().set_steps(steps);
                maps.focus.insert(id, data, enabled);
            }
            if modes.has(AnimationMode::Enable) && !maps.enable.contains(id) {
                let data = EnableData::create(widget, scheduler, duration);
                data.borrow_mut().set_steps(steps);
                maps.enable.insert(id, data, enabled);
            }
            if modes.has(AnimationMode::Pressed) && !maps.pressed.contains(id) {
                let data = WidgetStateData::create(widget, scheduler, duration);
                data.borrow_mut().set_steps(steps);
                maps.pressed.insert(id, data, enabled);
            }
        }

        self.base.watch(id);
        tracing::debug!("WidgetStateEngine: registered {:?} for {:?}", id, modes);
        true
    }

    /// Widgets registered for any category in `modes`
    pub fn registered_widgets(&self, modes: AnimationModes) -> FxHashSet<WidgetId> {
        let maps = self.maps.borrow();
        let mut out = FxHashSet::default();
        if modes.has(AnimationMode::Hover) {
            out.extend(maps.hover.widgets());
        }
        if modes.has(AnimationMode::Focus) {
            out.extend(maps.focus.widgets());
        }
        if modes.has(AnimationMode::Enable) {
            out.extend(maps.enable.widgets());
        }
        if modes.has(AnimationMode::Pressed) {
            out.extend(maps.pressed.widgets());
        }
        out
    }

    /// Whether `widget` has data for `mode`
    pub fn is_registered(&self, widget: WidgetId, mode: AnimationMode) -> bool {
        self.maps.borrow().contains(widget, mode)
    }

    /// Data of `widget` for `mode`
    pub fn data(&self, widget: WidgetId, mode: AnimationMode) -> Option<Rc<RefCell<dyn StateData>>> {
        let maps = self.maps.borrow();
        match mode {
            AnimationMode::Hover => maps
                .hover
                .find(widget)
                .map(|data| data as Rc<RefCell<dyn StateData>>),
            AnimationMode::Focus => maps
                .focus
                .find(widget)
                .map(|data| data as Rc<RefCell<dyn StateData>>),
            AnimationMode::Enable => maps
                .enable
                .find(widget)
                .map(|data| data as Rc<RefCell<dyn StateData>>),
            AnimationMode::Pressed => maps
                .pressed
                .find(widget)
                .map(|data| data as Rc<RefCell<dyn StateData>>),
        }
    }

    /// Hover data with its concrete type
    pub fn hover_data(&self, widget: WidgetId) -> Option<Rc<RefCell<H>>> {
        self.maps.borrow().hover.find(widget)
    }

    /// Record a state change; returns true if it started a visible change
    pub fn update_state(&self, widget: WidgetId, mode: AnimationMode, value: bool) -> bool {
        let Some(data) = self.data(widget, mode) else {
            return false;
        };
        let changed = data.borrow_mut().update_state(value);
        if changed {
            tracing::trace!(
                "WidgetStateEngine: {:?} {:?} -> {}",
                widget,
                mode,
                value
            );
        }
        changed
    }

    /// Whether the `mode` animation of `widget` is running
    pub fn is_animated(&self, widget: WidgetId, mode: AnimationMode) -> bool {
        self.data(widget, mode).is_some_and(|data| {
            let data = data.borrow();
            data.core().is_alive() && data.animation().is_running()
        })
    }

    /// Opacity of the `mode` animation, [`OPACITY_INVALID`] unless running
    pub fn opacity(&self, widget: WidgetId, mode: AnimationMode) -> f64 {
        if !self.is_animated(widget, mode) {
            return OPACITY_INVALID;
        }
        self.data(widget, mode)
            .map_or(OPACITY_INVALID, |data| data.borrow().opacity())
    }

    /// Re-read the enabled flag of `widget`
    pub fn enabled_changed(&self, widget: WidgetId) -> bool {
        let data = self.maps.borrow().enable.find(widget);
        data.is_some_and(|data| data.borrow_mut().enabled_changed())
    }
}

impl<H: StateData + 'static> Engine for WidgetStateEngine<H> {
    fn base(&self) -> &BaseEngine {
        &self.base
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base.set_enabled(enabled);
        let mut maps = self.maps.borrow_mut();
        maps.hover.set_enabled(enabled);
        maps.focus.set_enabled(enabled);
        maps.enable.set_enabled(enabled);
        maps.pressed.set_enabled(enabled);
    }

    fn set_duration(&mut self, duration_ms: u32) {
        self.base.set_duration(duration_ms);
        let maps = self.maps.borrow();
        maps.hover.set_duration(duration_ms);
        maps.focus.set_duration(duration_ms);
        maps.enable.set_duration(duration_ms);
        maps.pressed.set_duration(duration_ms);
    }

    fn set_steps(&mut self, steps: u32) {
        self.base.set_steps(steps);
        let maps = self.maps.borrow();
        maps.hover.set_steps(steps);
        maps.focus.set_steps(steps);
        maps.enable.set_steps(steps);
        maps.pressed.set_steps(steps);
    }

    fn unregister_widget(&self, widget: WidgetId) -> bool {
        let found = self.maps.borrow_mut().unregister_widget(widget);
        self.base.unwatch(widget);
        if found {
            tracing::debug!("WidgetStateEngine: unregistered {:?}", widget);
        }
        found
    }

    fn widgets(&self) -> FxHashSet<WidgetId> {
        self.registered_widgets(AnimationModes::all())
    }
}
