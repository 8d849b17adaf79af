//! Sheen Style Animations
//!
//! Per-widget animation state for a desktop widget style. The paint routine
//! asks the engines how far a hover highlight, focus frame or page
//! transition has progressed and blends accordingly.
//!
//! - **Engines**: one per widget family, keyed by widget identity
//! - **Automatic Cleanup**: data is dropped when the toolkit reports a widget destroyed
//! - **Sub-control State**: scroll bar arrows and groove, individual tabs
//! - **Page Transitions**: cross-fade overlays for stacked containers
//! - **Configuration**: TOML preferences applied to every engine at once
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use sheen_style::{AnimationMode, Animations, Lifecycle, Widget, WidgetEvent, WidgetId, WidgetRef};
//! use sheen_style::geometry::Point;
//!
//! struct Button(WidgetId);
//!
//! impl Widget for Button {
//!     fn id(&self) -> WidgetId {
//!         self.0
//!     }
//! }
//!
//! let lifecycle = Lifecycle::new();
//! let animations = Animations::new(&lifecycle);
//!
//! let button: WidgetRef = Rc::new(Button(WidgetId::next()));
//! animations.register_widget(&button);
//! animations.handle_event(button.id(), &WidgetEvent::HoverEnter(Point::new(4, 4)));
//!
//! animations.advance(16.0);
//! let opacity = animations
//!     .widget_state_engine()
//!     .opacity(button.id(), AnimationMode::Hover);
//! assert!(opacity > 0.0 && opacity < 1.0);
//! ```

pub mod animations;
pub mod config;
pub mod data;
pub mod data_map;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod mode;
pub mod widget;

pub use animations::Animations;
pub use config::{AnimationConfig, StackedWidgetConfig};
pub use data::{
    AnimationData, DataCore, EnableData, OverlayState, ScrollBarData, StackedWidgetData,
    StateData, TabBarData, TransitionData, TransitionOverlay, WidgetStateData, OPACITY_INVALID,
};
pub use data_map::DataMap;
pub use engine::{
    BaseEngine, Engine, ScrollBarEngine, StackedWidgetEngine, TabBarEngine, WidgetStateEngine,
};
pub use error::{ConfigError, Result};
pub use lifecycle::{DestroyListener, Lifecycle, ListenerId};
pub use mode::{AnimationMode, AnimationModes};
pub use widget::{
    ScrollBar, Snapshot, StackedContainer, SubControl, TabBar, Widget, WidgetEvent, WidgetId,
    WidgetRef,
};

pub use sheen_animation::{Animation, AnimationScheduler, Direction, SchedulerHandle};
