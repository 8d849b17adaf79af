//! Style-wide animation entry point
//!
//! [`Animations`] owns the scheduler and one engine per widget family. The
//! style registers widgets as they are polished, forwards toolkit events,
//! and drives the scheduler from its frame loop:
//!
//! ```ignore
//! let lifecycle = Lifecycle::new();
//! let mut animations = Animations::new(&lifecycle);
//! animations.setup_engines(&AnimationConfig::load_or_default(path));
//!
//! animations.register_widget(&button);
//! animations.handle_event(button.id(), &WidgetEvent::HoverEnter(pos));
//!
//! while animations.advance(16.0) {
//!     repaint();
//! }
//! ```

use std::time::Duration;

use sheen_animation::AnimationScheduler;

use crate::config::AnimationConfig;
use crate::engine::{Engine, ScrollBarEngine, StackedWidgetEngine, TabBarEngine, WidgetStateEngine};
use crate::lifecycle::Lifecycle;
use crate::mode::{AnimationMode, AnimationModes};
use crate::widget::{WidgetEvent, WidgetId, WidgetRef};

/// All animation engines of a style
pub struct Animations {
    widget_state: WidgetStateEngine,
    scroll_bar: ScrollBarEngine,
    tab_bar: TabBarEngine,
    stacked_widget: StackedWidgetEngine,
    stacked_widget_enabled: bool,
    lifecycle: Lifecycle,
    scheduler: AnimationScheduler,
}

impl Animations {
    /// Create the engines, listening for destruction on `lifecycle`
    pub fn new(lifecycle: &Lifecycle) -> Self {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        Self {
            widget_state: WidgetStateEngine::new(handle.clone(), lifecycle),
            scroll_bar: ScrollBarEngine::new(handle.clone(), lifecycle),
            tab_bar: TabBarEngine::new(handle.clone(), lifecycle),
            stacked_widget: StackedWidgetEngine::new(handle, lifecycle),
            stacked_widget_enabled: true,
            lifecycle: lifecycle.clone(),
            scheduler,
        }
    }

    /// Create the engines and apply `config`
    pub fn with_config(lifecycle: &Lifecycle, config: &AnimationConfig) -> Self {
        let mut animations = Self::new(lifecycle);
        animations.setup_engines(config);
        animations
    }

    /// Apply configuration to every engine and every live animation
    pub fn setup_engines(&mut self, config: &AnimationConfig) {
        let engines: [&mut dyn Engine; 3] = [
            &mut self.widget_state,
            &mut self.scroll_bar,
            &mut self.tab_bar,
        ];
        for engine in engines {
            engine.set_enabled(config.enabled);
            engine.set_duration(config.duration_ms);
            engine.set_steps(config.steps);
        }

        let stacked = &config.stacked_widget;
        self.stacked_widget_enabled = stacked.enabled;
        self.stacked_widget
            .set_enabled(config.enabled && stacked.enabled);
        self.stacked_widget
            .set_duration(config.stacked_widget_duration());
        self.stacked_widget.set_steps(config.steps);
        self.stacked_widget
            .set_max_render_time(Duration::from_millis(u64::from(stacked.max_render_time_ms)));

        tracing::debug!(
            "Animations: enabled={}, duration={}ms, steps={}, stacked={}",
            config.enabled,
            config.duration_ms,
            config.steps,
            stacked.enabled
        );
    }

    /// Register `widget` with the engine matching its capabilities
    ///
    /// Scroll bars, tab bars and stacked containers go to their dedicated
    /// engines; every other widget gets the categories it asks for through
    /// [`Widget::animation_modes`](crate::widget::Widget::animation_modes).
    pub fn register_widget(&self, widget: &WidgetRef) -> bool {
        if widget.as_scroll_bar().is_some() {
            self.scroll_bar
                .register_widget(widget, AnimationModes::HOVER | AnimationModes::FOCUS)
        } else if widget.as_tab_bar().is_some() {
            self.tab_bar.register_widget(widget)
        } else if widget.as_stacked().is_some() {
            self.stacked_widget_enabled && self.stacked_widget.register_widget(widget)
        } else {
            let modes = widget.animation_modes();
            !modes.is_empty() && self.widget_state.register_widget(widget, modes)
        }
    }

    /// Drop every data of `widget` from every engine
    pub fn unregister_widget(&self, widget: WidgetId) -> bool {
        let engines: [&dyn Engine; 4] = [
            &self.widget_state,
            &self.scroll_bar,
            &self.tab_bar,
            &self.stacked_widget,
        ];
        engines
            .into_iter()
            .fold(false, |found, engine| engine.unregister_widget(widget) | found)
    }

    /// Route a toolkit event to the engines
    ///
    /// Returns true if any animation state changed.
    pub fn handle_event(&self, widget: WidgetId, event: &WidgetEvent) -> bool {
        tracing::trace!("Animations: {:?} on {:?}", event, widget);
        match *event {
            WidgetEvent::HoverEnter(position) | WidgetEvent::HoverMove(position) => {
                let mut changed = self.widget_state.update_state(widget, AnimationMode::Hover, true);
                changed |= self.scroll_bar.update_state(widget, AnimationMode::Hover, true);
                self.scroll_bar.hover_move(widget, position);
                changed |= self
                    .tab_bar
                    .update_state(widget, position, AnimationMode::Hover, true);
                changed
            }
            WidgetEvent::HoverLeave => {
                let mut changed = self.widget_state.update_state(widget, AnimationMode::Hover, false);
                changed |= self.scroll_bar.update_state(widget, AnimationMode::Hover, false);
                self.scroll_bar.hover_leave(widget);
                changed |= self.tab_bar.hover_leave(widget);
                changed
            }
            WidgetEvent::FocusIn | WidgetEvent::FocusOut => {
                let focused = matches!(event, WidgetEvent::FocusIn);
                let changed = self.widget_state.update_state(widget, AnimationMode::Focus, focused);
                self.scroll_bar.update_state(widget, AnimationMode::Focus, focused) | changed
            }
            WidgetEvent::MousePress | WidgetEvent::MouseRelease => {
                let pressed = matches!(event, WidgetEvent::MousePress);
                self.widget_state
                    .update_state(widget, AnimationMode::Pressed, pressed)
            }
            WidgetEvent::EnabledChange => self.widget_state.enabled_changed(widget),
            WidgetEvent::CurrentChanged => self.stacked_widget.current_changed(widget),
        }
    }

    /// Advance every running animation; returns true while a frame is needed
    pub fn advance(&self, dt_ms: f32) -> bool {
        self.scheduler.advance(dt_ms)
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn widget_state_engine(&self) -> &WidgetStateEngine {
        &self.widget_state
    }

    pub fn scroll_bar_engine(&self) -> &ScrollBarEngine {
        &self.scroll_bar
    }

    pub fn tab_bar_engine(&self) -> &TabBarEngine {
        &self.tab_bar
    }

    pub fn stacked_widget_engine(&self) -> &StackedWidgetEngine {
        &self.stacked_widget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{widget_ref, MockScrollBar, MockStacked, MockTabBar, MockWidget};
    use crate::data::OPACITY_INVALID;
    use crate::geometry::Point;
    use crate::widget::SubControl;

    fn animations(lifecycle: &Lifecycle) -> Animations {
        let config = AnimationConfig {
            duration_ms: 100,
            ..AnimationConfig::default()
        };
        Animations::with_config(lifecycle, &config)
    }

    #[test]
    fn test_registration_by_capability() {
        let lifecycle = Lifecycle::new();
        let animations = animations(&lifecycle);
        let plain = MockWidget::new();
        let bar = MockScrollBar::new();
        let tabs = MockTabBar::new(3);
        let stacked = MockStacked::new(2);

        assert!(animations.register_widget(&widget_ref(&plain)));
        assert!(animations.register_widget(&widget_ref(&bar)));
        assert!(animations.register_widget(&widget_ref(&tabs)));
        assert!(animations.register_widget(&widget_ref(&stacked)));

        let generic = animations.widget_state_engine();
        assert!(generic.is_registered(plain.id, AnimationMode::Pressed));
        assert!(!generic.is_registered(bar.id, AnimationMode::Hover));
        assert!(animations.scroll_bar_engine().is_registered(bar.id, AnimationMode::Hover));
        assert!(!animations
            .scroll_bar_engine()
            .is_registered(bar.id, AnimationMode::Enable));
        assert!(animations.tab_bar_engine().is_registered(tabs.id));
        assert!(animations.stacked_widget_engine().is_registered(stacked.id));
    }

    #[test]
    fn test_widget_without_modes_is_skipped() {
        let lifecycle = Lifecycle::new();
        let animations = animations(&lifecycle);
        let widget = MockWidget::with_modes(AnimationModes::empty());

        assert!(!animations.register_widget(&widget_ref(&widget)));
        assert!(animations.widget_state_engine().widgets().is_empty());
    }

    #[test]
    fn test_stacked_transitions_can_be_disabled() {
        let lifecycle = Lifecycle::new();
        let mut config = AnimationConfig::default();
        config.stacked_widget.enabled = false;
        let animations = Animations::with_config(&lifecycle, &config);
        let stacked = MockStacked::new(2);

        assert!(!animations.register_widget(&widget_ref(&stacked)));
        assert!(!animations.stacked_widget_engine().is_registered(stacked.id));
    }

    #[test]
    fn test_events_drive_animations() {
        let lifecycle = Lifecycle::new();
        let animations = animations(&lifecycle);
        let button = MockWidget::new();
        animations.register_widget(&widget_ref(&button));

        assert!(animations.handle_event(button.id, &WidgetEvent::HoverEnter(Point::new(1, 1))));
        assert!(!animations.handle_event(button.id, &WidgetEvent::HoverMove(Point::new(2, 1))));
        assert!(animations.handle_event(button.id, &WidgetEvent::MousePress));
        assert!(animations.handle_event(button.id, &WidgetEvent::FocusIn));

        let engine = animations.widget_state_engine();
        for mode in [AnimationMode::Hover, AnimationMode::Pressed, AnimationMode::Focus] {
            assert!(engine.is_animated(button.id, mode));
        }

        assert!(animations.advance(50.0));
        assert!((engine.opacity(button.id, AnimationMode::Hover) - 0.5).abs() < 1e-9);
        assert!(!animations.advance(50.0));

        assert!(animations.handle_event(button.id, &WidgetEvent::HoverLeave));
        button.enabled.set(false);
        assert!(animations.handle_event(button.id, &WidgetEvent::EnabledChange));
        assert!(engine.is_animated(button.id, AnimationMode::Enable));
    }

    #[test]
    fn test_scroll_bar_events() {
        let lifecycle = Lifecycle::new();
        let animations = animations(&lifecycle);
        let bar = MockScrollBar::new();
        animations.register_widget(&widget_ref(&bar));

        assert!(animations.handle_event(bar.id, &WidgetEvent::HoverEnter(bar.add_line())));
        let engine = animations.scroll_bar_engine();
        assert!(engine.is_hovered(bar.id, SubControl::AddLine));
        assert!(engine.is_animated_sub(bar.id, AnimationMode::Hover, SubControl::AddLine));

        animations.handle_event(bar.id, &WidgetEvent::HoverLeave);
        assert!(!engine.is_hovered(bar.id, SubControl::AddLine));
        assert_eq!(engine.position(bar.id), Point::INVALID);
    }

    #[test]
    fn test_tab_bar_events() {
        let lifecycle = Lifecycle::new();
        let animations = animations(&lifecycle);
        let tabs = MockTabBar::new(4);
        animations.register_widget(&widget_ref(&tabs));

        assert!(animations.handle_event(tabs.id, &WidgetEvent::HoverMove(tabs.tab(1))));
        assert!(animations.handle_event(tabs.id, &WidgetEvent::HoverMove(tabs.tab(2))));
        let engine = animations.tab_bar_engine();
        assert!(engine.is_animated(tabs.id, tabs.tab(1), AnimationMode::Hover));
        assert!(engine.is_animated(tabs.id, tabs.tab(2), AnimationMode::Hover));

        assert!(animations.handle_event(tabs.id, &WidgetEvent::HoverLeave));
    }

    #[test]
    fn test_stacked_events() {
        let lifecycle = Lifecycle::new();
        let animations = animations(&lifecycle);
        let stacked = MockStacked::new(3);
        animations.register_widget(&widget_ref(&stacked));

        stacked.current.set(Some(2));
        assert!(animations.handle_event(stacked.id, &WidgetEvent::CurrentChanged));
        assert!(animations.stacked_widget_engine().is_animated(stacked.id));
    }

    #[test]
    fn test_setup_engines_reaches_live_data() {
        let lifecycle = Lifecycle::new();
        let mut animations = animations(&lifecycle);
        let button = MockWidget::new();
        animations.register_widget(&widget_ref(&button));

        let config = AnimationConfig {
            enabled: false,
            ..AnimationConfig::default()
        };
        animations.setup_engines(&config);

        assert!(!animations.handle_event(button.id, &WidgetEvent::HoverEnter(Point::new(1, 1))));
        assert_eq!(
            animations
                .widget_state_engine()
                .opacity(button.id, AnimationMode::Hover),
            OPACITY_INVALID
        );
        assert!(!animations.stacked_widget_engine().enabled());
        assert_eq!(animations.tab_bar_engine().duration(), 180);
    }

    #[test]
    fn test_destruction_reaches_every_engine() {
        let lifecycle = Lifecycle::new();
        let animations = animations(&lifecycle);
        let button = MockWidget::new();
        let bar = MockScrollBar::new();
        let ids = [button.id, bar.id];
        animations.register_widget(&widget_ref(&button));
        animations.register_widget(&widget_ref(&bar));
        animations.handle_event(button.id, &WidgetEvent::HoverEnter(Point::new(1, 1)));

        drop(button);
        drop(bar);
        for id in ids {
            assert_eq!(lifecycle.notify_destroyed(id), 1);
        }

        assert!(animations.widget_state_engine().widgets().is_empty());
        assert!(animations.scroll_bar_engine().widgets().is_empty());
        assert_eq!(animations.scheduler().animation_count(), 0);
        assert!(!animations.advance(16.0));
    }

    #[test]
    fn test_explicit_unregister() {
        let lifecycle = Lifecycle::new();
        let animations = animations(&lifecycle);
        let tabs = MockTabBar::new(2);
        animations.register_widget(&widget_ref(&tabs));

        assert!(animations.unregister_widget(tabs.id));
        assert!(!animations.unregister_widget(tabs.id));
        assert_eq!(lifecycle.subscription_count(tabs.id), 0);
    }
}
