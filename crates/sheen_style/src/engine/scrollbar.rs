//! Scroll bar engine

use super::WidgetStateEngine;
use crate::data::{ScrollBarData, OPACITY_INVALID};
use crate::geometry::{Point, Rect};
use crate::mode::AnimationMode;
use crate::widget::{SubControl, WidgetId};

/// Widget state engine whose hover data tracks scroll bar regions
///
/// Hover animations are per region. Focus and pressed animations cover the
/// whole bar and are reported for the groove only.
pub type ScrollBarEngine = WidgetStateEngine<ScrollBarData>;

impl WidgetStateEngine<ScrollBarData> {
    /// Whether the `mode` animation of `control` is running
    pub fn is_animated_sub(&self, widget: WidgetId, mode: AnimationMode, control: SubControl) -> bool {
        match mode {
            AnimationMode::Hover => self.hover_data(widget).is_some_and(|data| {
                data.borrow()
                    .sub_control_animation(control)
                    .is_running()
            }),
            _ if control == SubControl::Groove => self.is_animated(widget, mode),
            _ => false,
        }
    }

    /// The category animating `control`, hover first
    pub fn animation_mode(&self, widget: WidgetId, control: SubControl) -> Option<AnimationMode> {
        [
            AnimationMode::Hover,
            AnimationMode::Focus,
            AnimationMode::Pressed,
        ]
        .into_iter()
        .find(|mode| self.is_animated_sub(widget, *mode, control))
    }

    /// Opacity of whichever animation is running on `control`
    pub fn opacity_sub(&self, widget: WidgetId, control: SubControl) -> f64 {
        match self.animation_mode(widget, control) {
            Some(AnimationMode::Hover) => self
                .hover_data(widget)
                .map_or(OPACITY_INVALID, |data| {
                    data.borrow().sub_control_opacity(control)
                }),
            Some(mode) if control == SubControl::Groove => self
                .data(widget, mode)
                .map_or(OPACITY_INVALID, |data| data.borrow().opacity()),
            _ => OPACITY_INVALID,
        }
    }

    pub fn is_hovered(&self, widget: WidgetId, control: SubControl) -> bool {
        self.hover_data(widget)
            .is_some_and(|data| data.borrow().is_hovered(control))
    }

    pub fn sub_control_rect(&self, widget: WidgetId, control: SubControl) -> Rect {
        self.hover_data(widget)
            .map_or(Rect::EMPTY, |data| data.borrow().sub_control_rect(control))
    }

    pub fn set_sub_control_rect(&self, widget: WidgetId, control: SubControl, rect: Rect) {
        if let Some(data) = self.hover_data(widget) {
            data.borrow_mut().set_sub_control_rect(control, rect);
        }
    }

    /// Last pointer position over the bar
    pub fn position(&self, widget: WidgetId) -> Point {
        self.hover_data(widget)
            .map_or(Point::INVALID, |data| data.borrow().position())
    }

    pub fn hover_move(&self, widget: WidgetId, position: Point) {
        if let Some(data) = self.hover_data(widget) {
            data.borrow_mut().hover_move(position);
        }
    }

    pub fn hover_leave(&self, widget: WidgetId) {
        if let Some(data) = self.hover_data(widget) {
            data.borrow_mut().hover_leave();
        }
    }
}
