//! Toolkit seam
//!
//! The style never owns widgets. The toolkit hands them over as
//! `Rc<dyn Widget>`; the style keeps only weak references and learns about
//! destruction through the [`Lifecycle`](crate::lifecycle::Lifecycle) hub.
//!
//! Composite widgets expose their extra behavior through capability
//! queries. A widget that answers `None` simply gets no specialized
//! animation, never an error.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::{Point, Rect, Size};
use crate::mode::AnimationModes;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a widget, stable for the widget's whole life
///
/// Identities are never reused: a widget created after another one was
/// destroyed always gets a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh identity
    pub fn next() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw toolkit identifier
    pub const fn from_raw(raw: u64) -> Self {
        WidgetId(raw)
    }

    /// Raw identifier
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// A live widget as seen by the style
pub trait Widget {
    /// Identity used as registry key
    fn id(&self) -> WidgetId;

    /// Whether the widget is currently shown
    fn is_visible(&self) -> bool {
        true
    }

    /// Whether the widget currently accepts input
    fn is_enabled(&self) -> bool {
        true
    }

    /// Schedule a repaint
    fn update(&self) {}

    /// Categories the widget wants animated when registered generically
    fn animation_modes(&self) -> AnimationModes {
        AnimationModes::HOVER | AnimationModes::FOCUS | AnimationModes::ENABLE
    }

    /// Tab bar capability
    fn as_tab_bar(&self) -> Option<&dyn TabBar> {
        None
    }

    /// Scroll bar capability
    fn as_scroll_bar(&self) -> Option<&dyn ScrollBar> {
        None
    }

    /// Stacked container capability
    fn as_stacked(&self) -> Option<&dyn StackedContainer> {
        None
    }
}

/// Shared widget reference handed over by the toolkit
pub type WidgetRef = Rc<dyn Widget>;

/// A row of tabs
pub trait TabBar {
    /// Index of the tab under `position`
    fn tab_at(&self, position: Point) -> Option<usize>;
}

/// Named regions of a scroll bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubControl {
    /// The arrow moving towards the maximum (down/right)
    AddLine,
    /// The arrow moving towards the minimum (up/left)
    SubLine,
    /// The track behind the slider
    Groove,
    /// Page region after the slider
    AddPage,
    /// Page region before the slider
    SubPage,
    /// The draggable slider
    Slider,
    /// Outside every region
    None,
}

/// A scroll bar
pub trait ScrollBar {
    /// Region under `position`
    fn hit_test(&self, position: Point) -> SubControl;

    /// Whether the slider is being dragged
    fn is_slider_down(&self) -> bool {
        false
    }
}

/// Captured image of a page, opaque to the style
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub size: Size,
    pub pixels: Rc<[u32]>,
}

impl Snapshot {
    pub fn new(size: Size, pixels: Rc<[u32]>) -> Self {
        Self { size, pixels }
    }
}

/// A container showing one page at a time
pub trait StackedContainer {
    /// Index of the visible page, `None` when empty
    fn current_index(&self) -> Option<usize>;

    /// Geometry of the page at `index`, `None` if there is no such page
    fn page_geometry(&self, index: usize) -> Option<Rect>;

    /// Capture the page at `index`
    fn grab_page(&self, index: usize) -> Option<Snapshot>;
}

/// Toolkit notifications routed to the animation engines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    HoverEnter(Point),
    HoverMove(Point),
    HoverLeave,
    FocusIn,
    FocusOut,
    MousePress,
    MouseRelease,
    EnabledChange,
    CurrentChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_ids_are_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
        assert_eq!(WidgetId::from_raw(a.to_raw()), a);
    }
}
