//! Widget-keyed data registry

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::data::AnimationData;
use crate::widget::WidgetId;

/// Data of one animation category, keyed by widget
///
/// A disabled map keeps its entries but answers every lookup with `None`.
/// Style code queries the same widget many times per paint, so the last
/// lookup is cached; the cache is dropped on every insertion and removal.
pub struct DataMap<T> {
    map: FxHashMap<WidgetId, Rc<RefCell<T>>>,
    enabled: bool,
    last: RefCell<Option<(WidgetId, Option<Rc<RefCell<T>>>)>>,
}

impl<T> Default for DataMap<T> {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
            enabled: true,
            last: RefCell::new(None),
        }
    }
}

impl<T: AnimationData> DataMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` for `widget`, replacing any previous entry
    pub fn insert(&mut self, widget: WidgetId, data: Rc<RefCell<T>>, enabled: bool) {
        data.borrow_mut().set_enabled(enabled);
        self.map.insert(widget, data);
        self.invalidate();
    }

    pub fn contains(&self, widget: WidgetId) -> bool {
        self.map.contains_key(&widget)
    }

    /// Data of `widget`, `None` when absent or when the map is disabled
    pub fn find(&self, widget: WidgetId) -> Option<Rc<RefCell<T>>> {
        if !self.enabled {
            return None;
        }

        let mut last = self.last.borrow_mut();
        if let Some((id, data)) = last.as_ref() {
            if *id == widget {
                return data.clone();
            }
        }

        let data = self.map.get(&widget).cloned();
        *last = Some((widget, data.clone()));
        data
    }

    /// Remove and disable the data of `widget`
    ///
    /// Returns false if there was none.
    pub fn unregister_widget(&mut self, widget: WidgetId) -> bool {
        let Some(data) = self.map.remove(&widget) else {
            return false;
        };
        self.invalidate();

        match data.try_borrow_mut() {
            Ok(mut data) => data.target_destroyed(),
            Err(_) => tracing::warn!(
                "DataMap: data of {:?} is busy, dropping without notification",
                widget
            ),
        }
        true
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the map and every stored data
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        for data in self.map.values() {
            data.borrow_mut().set_enabled(enabled);
        }
    }

    pub fn set_duration(&self, duration_ms: u32) {
        for data in self.map.values() {
            data.borrow_mut().set_duration(duration_ms);
        }
    }

    pub fn set_steps(&self, steps: u32) {
        for data in self.map.values() {
            data.borrow_mut().set_steps(steps);
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Widgets with an entry
    pub fn widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.map.keys().copied()
    }

    /// Every stored data, including while the map is disabled
    pub fn values(&self) -> impl Iterator<Item = &Rc<RefCell<T>>> + '_ {
        self.map.values()
    }

    fn invalidate(&mut self) {
        *self.last.get_mut() = None;
    }
}
