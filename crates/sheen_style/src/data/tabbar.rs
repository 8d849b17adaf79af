//! Tab hover and focus highlight

use std::cell::RefCell;
use std::rc::Rc;

use sheen_animation::{Animation, AnimationTarget, Direction, SchedulerHandle};

use super::{animation_target, AnimationData, DataCore, OPACITY_INVALID};
use crate::geometry::Point;
use crate::widget::WidgetRef;

/// One highlighted tab and its fade
struct TabSlot {
    index: Option<usize>,
    animation: Animation,
    opacity: f64,
}

impl TabSlot {
    fn new(scheduler: &SchedulerHandle, duration_ms: u32, direction: Direction) -> Self {
        let animation = Animation::new(scheduler, duration_ms);
        animation.set_direction(direction);
        Self {
            index: None,
            animation,
            opacity: OPACITY_INVALID,
        }
    }
}

/// Highlight state of a tab bar
///
/// Two slots track the tab being highlighted (fading in) and the tab that
/// lost the highlight last (fading out). Moving to a third tab demotes the
/// current one and drops whatever was fading out before.
pub struct TabBarData {
    core: DataCore,
    current: TabSlot,
    previous: TabSlot,
}

impl TabBarData {
    const CURRENT_OPACITY: &'static str = "currentOpacity";
    const PREVIOUS_OPACITY: &'static str = "previousOpacity";

    pub fn new(target: &WidgetRef, scheduler: &SchedulerHandle, duration_ms: u32) -> Rc<RefCell<Self>> {
        let data = Rc::new(RefCell::new(Self {
            core: DataCore::new(target),
            current: TabSlot::new(scheduler, duration_ms, Direction::Forward),
            previous: TabSlot::new(scheduler, duration_ms, Direction::Backward),
        }));
        {
            let this = data.borrow();
            this.current
                .animation
                .bind(animation_target(&data), Self::CURRENT_OPACITY);
            this.previous
                .animation
                .bind(animation_target(&data), Self::PREVIOUS_OPACITY);
        }
        data
    }

    /// Index of the tab under `position`, if the data is live and enabled
    fn tab_at(&self, position: Point) -> Option<usize> {
        if !self.core.enabled() {
            return None;
        }
        let target = self.core.target()?;
        target.as_tab_bar()?.tab_at(position)
    }

    /// Record a hover or focus change of the tab under `position`
    ///
    /// Returns true if a fade was started.
    pub fn update_state(&mut self, position: Point, hovered: bool) -> bool {
        let Some(index) = self.tab_at(position) else {
            return false;
        };

        if hovered {
            if self.current.index == Some(index) {
                return false;
            }
            self.demote_current();
            self.current.index = Some(index);
            self.current.animation.restart();
            self.sync_current();
            true
        } else if self.current.index == Some(index) {
            self.demote_current();
            true
        } else {
            false
        }
    }

    /// Fade out the highlighted tab, if any
    ///
    /// Used when the pointer leaves the bar without crossing another tab.
    pub fn clear_hover(&mut self) -> bool {
        if !self.core.enabled() || self.current.index.is_none() {
            return false;
        }
        self.demote_current();
        true
    }

    fn demote_current(&mut self) {
        let Some(index) = self.current.index.take() else {
            return;
        };
        self.previous.index = Some(index);
        self.previous.animation.restart();
        self.sync_previous();
    }

    /// Animation of the tab under `position`
    pub fn animation(&self, position: Point) -> Option<&Animation> {
        let index = self.tab_at(position)?;
        if self.current.index == Some(index) {
            Some(&self.current.animation)
        } else if self.previous.index == Some(index) {
            Some(&self.previous.animation)
        } else {
            None
        }
    }

    /// Opacity of the tab under `position`
    pub fn opacity(&self, position: Point) -> f64 {
        match self.tab_at(position) {
            Some(index) if self.current.index == Some(index) => self.current.opacity,
            Some(index) if self.previous.index == Some(index) => self.previous.opacity,
            _ => OPACITY_INVALID,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current.index
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.previous.index
    }

    fn set_current_opacity(&mut self, value: f64) {
        let value = self.core.digitize(value);
        if self.current.opacity == value {
            return;
        }
        self.current.opacity = value;
        self.core.set_dirty();
    }

    fn set_previous_opacity(&mut self, value: f64) {
        let value = self.core.digitize(value);
        if self.previous.opacity == value {
            return;
        }
        self.previous.opacity = value;
        self.core.set_dirty();
    }

    fn sync_current(&mut self) {
        let value = self.current.animation.value();
        self.set_current_opacity(value);
    }

    fn sync_previous(&mut self) {
        let value = self.previous.animation.value();
        self.set_previous_opacity(value);
    }
}

impl AnimationTarget for TabBarData {
    fn set_property(&mut self, property: &str, value: f64) {
        match property {
            Self::CURRENT_OPACITY => self.set_current_opacity(value),
            Self::PREVIOUS_OPACITY => self.set_previous_opacity(value),
            _ => {}
        }
    }
}

impl AnimationData for TabBarData {
    fn core(&self) -> &DataCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DataCore {
        &mut self.core
    }

    fn set_duration(&mut self, duration_ms: u32) {
        self.current.animation.set_duration(duration_ms);
        self.previous.animation.set_duration(duration_ms);
    }

    fn is_animated(&self) -> bool {
        self.core.is_alive()
            && (self.current.animation.is_running() || self.previous.animation.is_running())
    }
}
