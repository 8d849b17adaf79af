//! Hover Fade Demo
//!
//! Drives a button and a scroll bar through hover, press and leave events
//! with a simulated 60 Hz frame loop and prints the opacities a paint
//! routine would see.
//!
//! Run with: RUST_LOG=sheen_style=debug cargo run -p sheen_style --example hover_fade

use std::rc::Rc;

use sheen_style::geometry::Point;
use sheen_style::{
    AnimationConfig, AnimationMode, Animations, Lifecycle, ScrollBar, SubControl, Widget,
    WidgetEvent, WidgetId, WidgetRef,
};

const FRAME_MS: f32 = 1000.0 / 60.0;

struct Button {
    id: WidgetId,
}

impl Widget for Button {
    fn id(&self) -> WidgetId {
        self.id
    }
}

/// A 16x200 vertical scroll bar with 16 pixel arrows
struct VerticalScrollBar {
    id: WidgetId,
}

impl Widget for VerticalScrollBar {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn as_scroll_bar(&self) -> Option<&dyn ScrollBar> {
        Some(self)
    }
}

impl ScrollBar for VerticalScrollBar {
    fn hit_test(&self, position: Point) -> SubControl {
        match position.y {
            y if !(0..200).contains(&y) || !(0..16).contains(&position.x) => SubControl::None,
            y if y < 16 => SubControl::SubLine,
            y if y >= 184 => SubControl::AddLine,
            _ => SubControl::Groove,
        }
    }
}

fn run_frames(animations: &Animations, label: &str, report: impl Fn() -> f64) {
    let mut frame = 0;
    while animations.advance(FRAME_MS) {
        frame += 1;
        if frame % 3 == 0 {
            println!("  {label} frame {frame:>2}: opacity {:.3}", report());
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = AnimationConfig::from_toml_str("duration_ms = 150\nsteps = 0")
        .unwrap_or_else(|err| {
            tracing::warn!("{}", err);
            AnimationConfig::default()
        });

    let lifecycle = Lifecycle::new();
    let animations = Animations::with_config(&lifecycle, &config);

    let button: WidgetRef = Rc::new(Button {
        id: WidgetId::next(),
    });
    let scroll_bar: WidgetRef = Rc::new(VerticalScrollBar {
        id: WidgetId::next(),
    });
    animations.register_widget(&button);
    animations.register_widget(&scroll_bar);

    let button_id = button.id();
    let engine = animations.widget_state_engine();

    println!("button hover in");
    animations.handle_event(button_id, &WidgetEvent::HoverEnter(Point::new(4, 4)));
    run_frames(&animations, "hover", || {
        engine.opacity(button_id, AnimationMode::Hover)
    });

    println!("button hover out, interrupted halfway by a new hover");
    animations.handle_event(button_id, &WidgetEvent::HoverLeave);
    for _ in 0..4 {
        animations.advance(FRAME_MS);
    }
    animations.handle_event(button_id, &WidgetEvent::HoverEnter(Point::new(4, 4)));
    run_frames(&animations, "hover", || {
        engine.opacity(button_id, AnimationMode::Hover)
    });

    let bar_id = scroll_bar.id();
    let bars = animations.scroll_bar_engine();

    println!("scroll bar: pointer over the bottom arrow");
    animations.handle_event(bar_id, &WidgetEvent::HoverEnter(Point::new(8, 190)));
    run_frames(&animations, "add line", || {
        bars.opacity_sub(bar_id, SubControl::AddLine)
    });

    println!("scroll bar: pointer moves to the groove");
    animations.handle_event(bar_id, &WidgetEvent::HoverMove(Point::new(8, 100)));
    run_frames(&animations, "groove", || {
        bars.opacity_sub(bar_id, SubControl::Groove)
    });

    drop(button);
    drop(scroll_bar);
    lifecycle.notify_destroyed(button_id);
    lifecycle.notify_destroyed(bar_id);
    println!(
        "after destruction: {} animations alive",
        animations.scheduler().animation_count()
    );
}
