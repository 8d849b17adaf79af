//! Scroll bar hover state with independently fading regions

use std::cell::RefCell;
use std::rc::Rc;

use sheen_animation::{Animation, AnimationTarget, Direction, SchedulerHandle};

use super::{animation_target, AnimationData, DataCore, StateData, WidgetStateData, OPACITY_INVALID};
use crate::geometry::{Point, Rect};
use crate::widget::{SubControl, WidgetRef};

/// State of one scroll bar region
struct SubControlData {
    hovered: bool,
    animation: Animation,
    opacity: f64,
    rect: Rect,
}

impl SubControlData {
    fn new(scheduler: &SchedulerHandle, duration_ms: u32) -> Self {
        Self {
            hovered: false,
            animation: Animation::new(scheduler, duration_ms),
            opacity: OPACITY_INVALID,
            rect: Rect::EMPTY,
        }
    }

    /// Set the quantized opacity; returns true if it changed
    fn set_opacity(&mut self, core: &DataCore, value: f64) -> bool {
        let value = core.digitize(value);
        if self.opacity == value {
            return false;
        }
        self.opacity = value;
        true
    }
}

/// Hover data of a scroll bar
///
/// Besides the whole-bar hover state it tracks the two arrows and the groove
/// separately, so each can fade on its own as the pointer moves along the
/// bar.
pub struct ScrollBarData {
    base: WidgetStateData,
    add_line: SubControlData,
    sub_line: SubControlData,
    groove: SubControlData,
    position: Point,
}

impl ScrollBarData {
    const ADD_LINE_OPACITY: &'static str = "addLineOpacity";
    const SUB_LINE_OPACITY: &'static str = "subLineOpacity";
    const GROOVE_OPACITY: &'static str = "grooveOpacity";

    /// Animation of a region; unknown regions map to the whole bar
    pub fn sub_control_animation(&self, control: SubControl) -> &Animation {
        match control {
            SubControl::AddLine => &self.add_line.animation,
            SubControl::SubLine => &self.sub_line.animation,
            SubControl::Groove => &self.groove.animation,
            _ => self.base.animation(),
        }
    }

    /// Opacity of a region; unknown regions map to the whole bar
    pub fn sub_control_opacity(&self, control: SubControl) -> f64 {
        match control {
            SubControl::AddLine => self.add_line.opacity,
            SubControl::SubLine => self.sub_line.opacity,
            SubControl::Groove => self.groove.opacity,
            _ => self.base.opacity(),
        }
    }

    pub fn is_hovered(&self, control: SubControl) -> bool {
        match control {
            SubControl::AddLine => self.add_line.hovered,
            SubControl::SubLine => self.sub_line.hovered,
            SubControl::Groove => self.groove.hovered,
            _ => false,
        }
    }

    /// Last rectangle painted for an arrow
    pub fn sub_control_rect(&self, control: SubControl) -> Rect {
        match control {
            SubControl::AddLine => self.add_line.rect,
            SubControl::SubLine => self.sub_line.rect,
            _ => Rect::EMPTY,
        }
    }

    /// Remember where an arrow was painted
    pub fn set_sub_control_rect(&mut self, control: SubControl, rect: Rect) {
        match control {
            SubControl::AddLine => self.add_line.rect = rect,
            SubControl::SubLine => self.sub_line.rect = rect,
            _ => {}
        }
    }

    /// Last pointer position over the bar, [`Point::INVALID`] outside
    pub fn position(&self) -> Point {
        self.position
    }

    /// Pointer entered or moved over the bar
    pub fn hover_move(&mut self, position: Point) {
        let Some(target) = self.base.core().target() else {
            return;
        };
        let Some(scroll_bar) = target.as_scroll_bar() else {
            return;
        };
        if scroll_bar.is_slider_down() {
            return;
        }

        let control = scroll_bar.hit_test(position);
        self.update_add_line_arrow(control);
        self.update_sub_line_arrow(control);
        self.update_groove(control);
        self.position = position;
    }

    /// Pointer left the bar
    pub fn hover_leave(&mut self) {
        self.update_sub_line_arrow(SubControl::None);
        self.update_add_line_arrow(SubControl::None);
        self.update_groove(SubControl::None);
        self.position = Point::INVALID;
    }

    fn update_add_line_arrow(&mut self, control: SubControl) {
        self.update_slot(SubControl::AddLine, control == SubControl::AddLine);
    }

    fn update_sub_line_arrow(&mut self, control: SubControl) {
        self.update_slot(SubControl::SubLine, control == SubControl::SubLine);
    }

    fn update_groove(&mut self, control: SubControl) {
        let hovered = matches!(
            control,
            SubControl::Groove | SubControl::AddPage | SubControl::SubPage | SubControl::Slider
        );
        self.update_slot(SubControl::Groove, hovered);
    }

    fn update_slot(&mut self, control: SubControl, hovered: bool) {
        let enabled = self.base.core().enabled();
        let Some(slot) = self.slot_mut(control) else {
            return;
        };
        if slot.hovered == hovered {
            return;
        }
        slot.hovered = hovered;

        let direction = if hovered {
            Direction::Forward
        } else {
            Direction::Backward
        };
        slot.animation.set_direction(direction);

        if enabled {
            if !slot.animation.is_running() {
                slot.animation.start();
            }
            let value = slot.animation.value();
            self.set_slot_opacity(control, value);
            if !self.sub_control_animation(control).is_running() {
                self.slot_finished(control);
            }
        } else {
            self.set_slot_opacity(control, direction.end_value());
            self.base.core_mut().set_dirty();
            self.slot_finished(control);
        }
    }

    fn slot_mut(&mut self, control: SubControl) -> Option<&mut SubControlData> {
        match control {
            SubControl::AddLine => Some(&mut self.add_line),
            SubControl::SubLine => Some(&mut self.sub_line),
            SubControl::Groove => Some(&mut self.groove),
            _ => None,
        }
    }

    fn set_slot_opacity(&mut self, control: SubControl, value: f64) {
        let core = self.base.core();
        let changed = match control {
            SubControl::AddLine => self.add_line.set_opacity(core, value),
            SubControl::SubLine => self.sub_line.set_opacity(core, value),
            SubControl::Groove => self.groove.set_opacity(core, value),
            _ => false,
        };
        if changed {
            self.base.core_mut().set_dirty();
        }
    }

    /// An arrow's rect is dropped only once its fade-out is complete
    fn slot_finished(&mut self, control: SubControl) {
        let slot = match control {
            SubControl::AddLine => &mut self.add_line,
            SubControl::SubLine => &mut self.sub_line,
            _ => return,
        };
        if slot.animation.direction() == Direction::Backward {
            slot.rect = Rect::EMPTY;
        }
    }
}

impl AnimationTarget for ScrollBarData {
    fn set_property(&mut self, property: &str, value: f64) {
        match property {
            Self::ADD_LINE_OPACITY => self.set_slot_opacity(SubControl::AddLine, value),
            Self::SUB_LINE_OPACITY => self.set_slot_opacity(SubControl::SubLine, value),
            Self::GROOVE_OPACITY => self.set_slot_opacity(SubControl::Groove, value),
            _ => self.base.set_property(property, value),
        }
    }

    fn animation_finished(&mut self, property: &str) {
        match property {
            Self::ADD_LINE_OPACITY => self.slot_finished(SubControl::AddLine),
            Self::SUB_LINE_OPACITY => self.slot_finished(SubControl::SubLine),
            _ => {}
        }
    }
}

impl AnimationData for ScrollBarData {
    fn core(&self) -> &DataCore {
        self.base.core()
    }

    fn core_mut(&mut self) -> &mut DataCore {
        self.base.core_mut()
    }

    fn set_duration(&mut self, duration_ms: u32) {
        self.base.set_duration(duration_ms);
        self.add_line.animation.set_duration(duration_ms);
        self.sub_line.animation.set_duration(duration_ms);
        self.groove.animation.set_duration(duration_ms);
    }

    fn is_animated(&self) -> bool {
        self.base.is_animated()
            || (self.core().is_alive()
                && (self.add_line.animation.is_running()
                    || self.sub_line.animation.is_running()
                    || self.groove.animation.is_running()))
    }
}

impl StateData for ScrollBarData {
    fn create(target: &WidgetRef, scheduler: &SchedulerHandle, duration_ms: u32) -> Rc<RefCell<Self>> {
        let data = Rc::new(RefCell::new(Self {
            base: WidgetStateData::unbound(target, scheduler, duration_ms, false),
            add_line: SubControlData::new(scheduler, duration_ms),
            sub_line: SubControlData::new(scheduler, duration_ms),
            groove: SubControlData::new(scheduler, duration_ms),
            position: Point::INVALID,
        }));
        {
            let this = data.borrow();
            this.base
                .animation()
                .bind(animation_target(&data), WidgetStateData::OPACITY);
            this.add_line
                .animation
                .bind(animation_target(&data), Self::ADD_LINE_OPACITY);
            this.sub_line
                .animation
                .bind(animation_target(&data), Self::SUB_LINE_OPACITY);
            this.groove
                .animation
                .bind(animation_target(&data), Self::GROOVE_OPACITY);
        }
        data
    }

    fn update_state(&mut self, value: bool) -> bool {
        self.base.update_state(value)
    }

    fn state(&self) -> bool {
        self.base.state()
    }

    fn opacity(&self) -> f64 {
        self.base.opacity()
    }

    fn animation(&self) -> &Animation {
        self.base.animation()
    }
}
