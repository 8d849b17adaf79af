//! Integer widget geometry
//!
//! Positions and rectangles in widget-local pixel coordinates, as handed
//! over by the toolkit for hit testing and transition overlays.

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Sentinel for "no known position"
    pub const INVALID: Point = Point { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// The empty rectangle
    pub const EMPTY: Rect = Rect {
        origin: Point::ZERO,
        size: Size {
            width: 0,
            height: 0,
        },
    };

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> i32 {
        self.origin.x
    }

    pub fn y(&self) -> i32 {
        self.origin.y
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// True when the rectangle covers no pixel
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0 || self.size.height <= 0
    }

    /// Check if a point lies inside the rectangle
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.origin.x
            && point.x < self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y < self.origin.y + self.size.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 10, 20, 5);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(29, 14)));
        assert!(!rect.contains(Point::new(30, 14)));
        assert!(!rect.contains(Point::new(15, 15)));
    }

    #[test]
    fn test_empty_rect() {
        assert!(Rect::EMPTY.is_empty());
        assert!(Rect::default().is_empty());
        assert!(!Rect::EMPTY.contains(Point::ZERO));
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }
}
